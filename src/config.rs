use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::pacing::DelayPolicy;

pub const DEFAULT_API_BASE: &str = "https://api.sofascore.com/api/v1";
pub const DEFAULT_INGEST_URL: &str = "http://localhost:8000/match/create";
pub const DEFAULT_SPORTS: [&str; 3] = ["football", "basketball", "tennis"];
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Headers sent with every upstream request so SofaScore treats us like its own web client.
pub const BROWSER_HEADERS: [(&str, &str); 5] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    ),
    ("Accept", "application/json"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Referer", "https://www.sofascore.com/"),
    ("Origin", "https://www.sofascore.com"),
];

/// Status-based retry applied by the schedule client.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub backoff_max: Duration,
    pub status_forcelist: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 0.5,
            backoff_max: Duration::from_secs(120),
            status_forcelist: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    pub fn should_retry(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Delay before the `retry`-th retry (1-based). The first retry goes out immediately,
    /// later ones wait `backoff_factor * 2^(retry - 1)` up to `backoff_max`.
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).map_or(self.backoff_max, |d| d.min(self.backoff_max))
    }
}

/// Everything one run of the job needs. `Default` carries the production constants.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub sports: Vec<String>,
    pub api_base: String,
    pub ingest_url: String,
    pub headers: Vec<(String, String)>,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub delays: DelayPolicy,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            sports: DEFAULT_SPORTS.iter().map(|s| s.to_string()).collect(),
            api_base: DEFAULT_API_BASE.to_string(),
            ingest_url: DEFAULT_INGEST_URL.to_string(),
            headers: BROWSER_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
            delays: DelayPolicy::default(),
        }
    }
}

impl JobConfig {
    /// `{api_base}/sport/{sport}/scheduled-events/{YYYY-MM-DD}`
    pub fn schedule_url(&self, sport: &str, date: NaiveDate) -> String {
        format!(
            "{}/sport/{}/scheduled-events/{}",
            self.api_base,
            sport,
            date.format("%Y-%m-%d")
        )
    }
}

/// The day whose schedule we fetch: the UTC calendar day after `now`.
pub fn target_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() + chrono::Duration::days(1)
}
