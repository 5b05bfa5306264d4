use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, instrument};
use ureq::Agent;

use crate::model::match_record::MatchRecord;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to send matches to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },
}

/// What the ingestion endpoint said about a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// HTTP 200.
    Accepted { count: usize },
    /// Any other status, with the response body as text.
    Rejected { status: u16, body: String },
}

/// Client for the local match ingestion endpoint.
#[derive(Debug, Clone)]
pub struct IngestClient {
    agent: Agent,
    url: String,
}

impl IngestClient {
    pub fn new(url: String, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, url }
    }

    /// POST the whole batch as one JSON array. No retry.
    #[instrument(level = "info", skip(self, matches), fields(count = matches.len()))]
    pub fn post(&self, matches: &[MatchRecord]) -> Result<ForwardOutcome, ForwardError> {
        let mut resp = match self.agent.post(&self.url).send_json(matches) {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, url = %self.url, "Failed to reach ingestion endpoint");
                return Err(ForwardError::Transport {
                    url: self.url.clone(),
                    source: e,
                });
            }
        };

        let status = resp.status().as_u16();
        info!(status, "Ingestion endpoint responded");
        if status == 200 {
            return Ok(ForwardOutcome::Accepted { count: matches.len() });
        }
        let body = resp
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        Ok(ForwardOutcome::Rejected { status, body })
    }
}
