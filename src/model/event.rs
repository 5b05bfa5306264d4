use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `GET /sport/{sport}/scheduled-events/{date}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScheduledEventsResponse {
    #[serde(default)]
    pub events: Option<Vec<RawEvent>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_timestamp: Option<i64>,
    #[serde(default)]
    pub home_team: Option<RawTeam>,
    #[serde(default)]
    pub away_team: Option<RawTeam>,
    #[serde(default)]
    pub tournament: Option<RawTournament>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawTeam {
    /// Kept as text so numeric and string ids both survive.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawTournament {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategory>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub country: Option<NamedRef>,
    #[serde(default)]
    pub sport: Option<NamedRef>,
}

/// Any `{ "name": ... }` leaf (country, sport).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Whole seconds from an integer or fractional number; anything else counts as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.floor() as i64)
        }),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
