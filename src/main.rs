use chrono::Utc;
use sports_schedule_forwarder::config::JobConfig;
use sports_schedule_forwarder::job::{ForwardStep, Job};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize structured logging with tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let mut job = Job::new(JobConfig::default());
    let report = job.run(Utc::now());

    let forwarded = matches!(report.forward, ForwardStep::Sent(_));
    info!(date = %report.date, matches = report.matches.len(), forwarded, "Job finished");
}
