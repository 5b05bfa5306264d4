use std::time::Duration;

use chrono::NaiveDate;
use tracing::{error, info, warn};

/// Something noteworthy that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    JobStarted { date: NaiveDate, sports: usize },
    FetchStarted { sport: String, url: String },
    MatchAdded { sport: String, home_team: String, away_team: String },
    SportCompleted { sport: String, events: usize, records: usize },
    Waiting { delay: Duration },
    /// Upstream answered 403.
    SportBlocked { sport: String },
    SportHttpError { sport: String, status: u16, error: String },
    SportFailed { sport: String, error: String },
    Forwarding { count: usize },
    Forwarded { count: usize },
    ForwardRejected { status: u16, body: String },
    NothingToForward,
    Unexpected { error: String },
}

pub trait JobObserver {
    fn notify(&mut self, event: JobEvent);
}

impl<O: JobObserver + ?Sized> JobObserver for &mut O {
    fn notify(&mut self, event: JobEvent) {
        (**self).notify(event)
    }
}

/// Turns job events into log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl JobObserver for TracingObserver {
    fn notify(&mut self, event: JobEvent) {
        match event {
            JobEvent::JobStarted { date, sports } => {
                info!(date = %date, sports, "Fetching scheduled events");
            }
            JobEvent::FetchStarted { sport, url } => {
                info!(sport = %sport, url = %url, "Fetching {} matches...", sport);
            }
            JobEvent::MatchAdded { sport, home_team, away_team } => {
                info!(sport = %sport, "Added match: {} vs {}", home_team, away_team);
            }
            JobEvent::SportCompleted { sport, events, records } => {
                info!(sport = %sport, events, records, "Finished sport");
            }
            JobEvent::Waiting { delay } => {
                info!("Waiting {:.2} seconds before next request...", delay.as_secs_f64());
            }
            JobEvent::SportBlocked { sport } => {
                error!(
                    sport = %sport,
                    "403 Forbidden error for {}. API may require authentication or is blocking requests.",
                    sport
                );
            }
            JobEvent::SportHttpError { sport, status, error } => {
                error!(sport = %sport, status, "HTTP Error for {}: {}", sport, error);
            }
            JobEvent::SportFailed { sport, error } => {
                error!(sport = %sport, "Error fetching {} matches: {}", sport, error);
            }
            JobEvent::Forwarding { count } => {
                info!(count, "Sending {} matches to the local API...", count);
            }
            JobEvent::Forwarded { count } => {
                info!(count, "Successfully sent {} matches", count);
            }
            JobEvent::ForwardRejected { status, body } => {
                error!(status, "Failed to send matches: {} - {}", status, body);
            }
            JobEvent::NothingToForward => {
                warn!("No matches were collected to send");
            }
            JobEvent::Unexpected { error } => {
                error!(error = %error, "Unexpected error");
            }
        }
    }
}
