use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{JobConfig, target_date};
use crate::ingest::{ForwardError, ForwardOutcome, IngestClient};
use crate::mapper::map_event;
use crate::model::match_record::MatchRecord;
use crate::observer::{JobEvent, JobObserver, TracingObserver};
use crate::pacing::{Sleeper, ThreadSleeper};
use crate::sofascore::ScheduleClient;

/// How the forward step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardStep {
    /// Nothing was collected, so nothing was sent.
    Skipped,
    Sent(ForwardOutcome),
    /// The POST itself failed; carries the error text.
    Failed(String),
}

/// Summary of one run.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub date: NaiveDate,
    pub matches: Vec<MatchRecord>,
    pub forward: ForwardStep,
}

/// One fetch-and-forward pass: every configured sport for the target day, then one POST.
pub struct Job<S, O, R> {
    config: JobConfig,
    schedule: ScheduleClient,
    ingest: IngestClient,
    sleeper: S,
    observer: O,
    rng: R,
}

impl Job<ThreadSleeper, TracingObserver, StdRng> {
    /// Production wiring: real sleeps, log output, entropy-seeded pacing.
    pub fn new(config: JobConfig) -> Self {
        Self::with_parts(config, ThreadSleeper, TracingObserver, StdRng::from_entropy())
    }
}

impl<S: Sleeper, O: JobObserver, R: Rng> Job<S, O, R> {
    pub fn with_parts(config: JobConfig, sleeper: S, observer: O, rng: R) -> Self {
        let schedule = ScheduleClient::new(&config);
        let ingest = IngestClient::new(config.ingest_url.clone(), config.request_timeout);
        Self {
            config,
            schedule,
            ingest,
            sleeper,
            observer,
            rng,
        }
    }

    /// Fetch tomorrow's (relative to `now`, UTC) schedule and forward it.
    /// Every failure is reported to the observer; the run itself never fails.
    pub fn run(&mut self, now: DateTime<Utc>) -> JobReport {
        let date = target_date(now);
        self.observer.notify(JobEvent::JobStarted {
            date,
            sports: self.config.sports.len(),
        });

        let matches = self.collect_matches(date);
        let forward = match self.forward(&matches) {
            Ok(None) => ForwardStep::Skipped,
            Ok(Some(outcome)) => ForwardStep::Sent(outcome),
            Err(e) => {
                let error = e.to_string();
                self.observer.notify(JobEvent::Unexpected { error: error.clone() });
                ForwardStep::Failed(error)
            }
        };

        JobReport { date, matches, forward }
    }

    /// Fetch each configured sport in order and map its events.
    /// A failing sport contributes no records; later sports are still fetched.
    pub fn collect_matches(&mut self, date: NaiveDate) -> Vec<MatchRecord> {
        let mut matches: Vec<MatchRecord> = Vec::new();

        for sport in &self.config.sports {
            let url = self.config.schedule_url(sport, date);
            self.observer.notify(JobEvent::FetchStarted {
                sport: sport.clone(),
                url: url.clone(),
            });

            match self.schedule.fetch_events(&url, &mut self.sleeper) {
                Ok(events) => {
                    let before = matches.len();
                    for event in &events {
                        if let Some(record) = map_event(event, &self.config.api_base) {
                            self.observer.notify(JobEvent::MatchAdded {
                                sport: sport.clone(),
                                home_team: record.home_team.clone(),
                                away_team: record.away_team.clone(),
                            });
                            matches.push(record);
                        }
                    }
                    self.observer.notify(JobEvent::SportCompleted {
                        sport: sport.clone(),
                        events: events.len(),
                        records: matches.len() - before,
                    });

                    let delay = self.config.delays.pacing_delay(&mut self.rng);
                    self.observer.notify(JobEvent::Waiting { delay });
                    self.sleeper.sleep(delay);
                }
                Err(err) => match err.http_status() {
                    Some(403) => {
                        self.observer.notify(JobEvent::SportBlocked { sport: sport.clone() });
                        self.sleeper.sleep(self.config.delays.after_http_error);
                    }
                    Some(status) => {
                        self.observer.notify(JobEvent::SportHttpError {
                            sport: sport.clone(),
                            status,
                            error: err.to_string(),
                        });
                        self.sleeper.sleep(self.config.delays.after_http_error);
                    }
                    None => {
                        self.observer.notify(JobEvent::SportFailed {
                            sport: sport.clone(),
                            error: err.to_string(),
                        });
                        self.sleeper.sleep(self.config.delays.after_failure);
                    }
                },
            }
        }

        matches
    }

    /// Send the collected records in one POST. Returns `Ok(None)` without touching the
    /// network when there is nothing to send.
    pub fn forward(&mut self, matches: &[MatchRecord]) -> Result<Option<ForwardOutcome>, ForwardError> {
        if matches.is_empty() {
            self.observer.notify(JobEvent::NothingToForward);
            return Ok(None);
        }

        self.observer.notify(JobEvent::Forwarding { count: matches.len() });
        let outcome = self.ingest.post(matches)?;
        match &outcome {
            ForwardOutcome::Accepted { count } => {
                self.observer.notify(JobEvent::Forwarded { count: *count });
            }
            ForwardOutcome::Rejected { status, body } => {
                self.observer.notify(JobEvent::ForwardRejected {
                    status: *status,
                    body: body.clone(),
                });
            }
        }
        Ok(Some(outcome))
    }
}
