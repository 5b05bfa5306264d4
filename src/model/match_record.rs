use serde::{Deserialize, Serialize};

/// Normalized scheduled match as accepted by the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_date: String,
    pub home_team: String,
    pub home_team_image: String,
    pub away_team: String,
    pub away_team_image: String,
    pub country: String,
    pub league: String,
    pub sport: String,
}
