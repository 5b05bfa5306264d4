use chrono::DateTime;

use crate::model::event::{RawEvent, RawTeam};
use crate::model::match_record::MatchRecord;

/// Fallback for any name missing from the upstream payload.
pub const UNKNOWN: &str = "Unknown";

/// Rendered in place of an absent team id; downstream has always received it this way.
pub const MISSING_TEAM_ID: &str = "None";

/// Format a UNIX timestamp (seconds) as `YYYY-MM-DD HH:MM` in UTC.
/// Returns None when the timestamp is outside the representable range.
pub fn format_match_date(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// `{api_base}/team/{id}/image`
pub fn team_image_url(api_base: &str, team_id: Option<&str>) -> String {
    format!("{}/team/{}/image", api_base, team_id.unwrap_or(MISSING_TEAM_ID))
}

fn team_name(team: Option<&RawTeam>) -> String {
    team.and_then(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Map one upstream event into a [`MatchRecord`].
///
/// Events without a start time (absent or zero) produce no record. Every other missing
/// field falls back to [`UNKNOWN`] independently.
pub fn map_event(event: &RawEvent, api_base: &str) -> Option<MatchRecord> {
    let start = event.start_timestamp.filter(|ts| *ts != 0)?;
    let match_date = format_match_date(start)?;

    let home = event.home_team.as_ref();
    let away = event.away_team.as_ref();
    let tournament = event.tournament.as_ref();
    let category = tournament.and_then(|t| t.category.as_ref());

    Some(MatchRecord {
        match_date,
        home_team: team_name(home),
        home_team_image: team_image_url(api_base, home.and_then(|t| t.id.as_deref())),
        away_team: team_name(away),
        away_team_image: team_image_url(api_base, away.and_then(|t| t.id.as_deref())),
        country: category
            .and_then(|c| c.country.as_ref())
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        league: tournament
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        sport: category
            .and_then(|c| c.sport.as_ref())
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
    })
}
