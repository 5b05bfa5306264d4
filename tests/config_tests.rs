use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use sports_schedule_forwarder::config::{JobConfig, RetryPolicy, target_date};

#[test]
fn target_date_is_next_utc_day() {
    // One second before midnight still resolves to the following day
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 59).unwrap();
    assert_eq!(target_date(now), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());

    // Year rollover
    let new_year = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
    assert_eq!(target_date(new_year), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

    // 2024 is a leap year
    let leap = Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap();
    assert_eq!(target_date(leap), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[test]
fn schedule_urls_follow_template_for_every_default_sport() {
    // Arrange: a fixed morning on 2025-03-09 so tomorrow is 2025-03-10
    let config = JobConfig::default();
    let date = target_date(Utc.with_ymd_and_hms(2025, 3, 9, 8, 0, 0).unwrap());

    // Act
    let urls: Vec<String> = config.sports.iter().map(|s| config.schedule_url(s, date)).collect();

    // Assert
    assert_eq!(
        urls,
        vec![
            "https://api.sofascore.com/api/v1/sport/football/scheduled-events/2025-03-10",
            "https://api.sofascore.com/api/v1/sport/basketball/scheduled-events/2025-03-10",
            "https://api.sofascore.com/api/v1/sport/tennis/scheduled-events/2025-03-10",
        ]
    );
}

#[test]
fn defaults_match_production_constants() {
    let config = JobConfig::default();

    assert_eq!(config.sports, vec!["football", "basketball", "tennis"]);
    assert_eq!(config.ingest_url, "http://localhost:8000/match/create");
    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.status_forcelist, vec![429, 500, 502, 503, 504]);
    assert_eq!(config.delays.after_http_error, Duration::from_secs(10));
    assert_eq!(config.delays.after_failure, Duration::from_secs(5));

    let names: Vec<&str> = config.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["User-Agent", "Accept", "Accept-Language", "Referer", "Origin"]);
}

#[test]
fn retry_backoff_grows_exponentially_and_caps() {
    let policy = RetryPolicy::default();

    // First retry is immediate, then 0.5 * 2^(n-1)
    assert_eq!(policy.backoff(1), Duration::ZERO);
    assert_eq!(policy.backoff(2), Duration::from_secs(1));
    assert_eq!(policy.backoff(3), Duration::from_secs(2));
    assert_eq!(policy.backoff(5), Duration::from_secs(8));
    assert_eq!(policy.backoff(40), Duration::from_secs(120));

    assert!(policy.should_retry(503));
    assert!(policy.should_retry(429));
    assert!(!policy.should_retry(403));
    assert!(!policy.should_retry(501));
}
