use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info_span, instrument, warn};
use ureq::Agent;
use ureq::http::Response;

use crate::config::{JobConfig, RetryPolicy};
use crate::model::event::{RawEvent, ScheduledEventsResponse};
use crate::pacing::Sleeper;

/// Statuses whose `Retry-After` header takes precedence over the computed backoff.
const RETRY_AFTER_STATUSES: [u16; 2] = [429, 503];

/// Why a sport's schedule could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for url: {url}")]
    Status { status: u16, url: String },

    #[error("gave up on {url} after {retries} retries (last status {status})")]
    RetriesExhausted { url: String, retries: u32, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Final HTTP status when the upstream answered with a non-success code that was not retried away.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Blocking SofaScore client shared by every sport request of a run.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    agent: Agent,
    headers: Vec<(String, String)>,
    retry: RetryPolicy,
}

impl ScheduleClient {
    pub fn new(config: &JobConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.request_timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            headers: config.headers.clone(),
            retry: config.retry.clone(),
        }
    }

    /// GET a scheduled-events URL and return its `events` array (empty when the key is absent).
    /// Backoff between retries goes through `sleeper`.
    #[instrument(level = "info", skip(self, sleeper))]
    pub fn fetch_events<S: Sleeper + ?Sized>(
        &self,
        url: &str,
        sleeper: &mut S,
    ) -> Result<Vec<RawEvent>, FetchError> {
        let body = self.get_with_retry(url, sleeper)?;
        let parsed = Self::deserialize_events(url, &body)?;
        Ok(parsed.events.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
    fn deserialize_events(url: &str, body: &str) -> Result<ScheduledEventsResponse, FetchError> {
        serde_json::from_str::<ScheduledEventsResponse>(body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn get_with_retry<S: Sleeper + ?Sized>(&self, url: &str, sleeper: &mut S) -> Result<String, FetchError> {
        let mut retries: u32 = 0;
        loop {
            let response_result = {
                let _span = info_span!("sofascore_fetch", url = %url, attempt = retries + 1).entered();
                let mut request = self.agent.get(url);
                for (name, value) in &self.headers {
                    request = request.header(name.as_str(), value.as_str());
                }
                request.call()
            };
            let mut response = response_result.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

            let status = response.status().as_u16();
            if self.retry.should_retry(status) {
                if retries >= self.retry.max_retries {
                    return Err(FetchError::RetriesExhausted {
                        url: url.to_string(),
                        retries,
                        status,
                    });
                }
                retries += 1;
                let delay = self
                    .retry_after(&response, status)
                    .unwrap_or_else(|| self.retry.backoff(retries));
                warn!(status, retry = retries, delay_ms = delay.as_millis() as u64, "Retrying schedule request");
                sleeper.sleep(delay);
                continue;
            }

            if !(200..300).contains(&status) {
                return Err(FetchError::Status {
                    status,
                    url: url.to_string(),
                });
            }

            // A full day of football can exceed ureq's default 10 MiB body cap.
            let body = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()
                .map_err(|source| FetchError::Body {
                    url: url.to_string(),
                    source,
                })?;
            debug!(status, bytes = body.len(), retries, "Schedule response received");
            return Ok(body);
        }
    }

    /// Seconds-valued `Retry-After`, bounded by the policy's `backoff_max`.
    fn retry_after<B>(&self, response: &Response<B>, status: u16) -> Option<Duration> {
        if !RETRY_AFTER_STATUSES.contains(&status) {
            return None;
        }
        response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs).min(self.retry.backoff_max))
    }
}
