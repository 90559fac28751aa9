use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tracing::{debug, warn};

use crate::domain::{Credential, Diagnosis, ErrorClassifier, InvokeError, ProviderId};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(2);

/// Drives an invocation thunk to completion: up to `max_attempts` calls,
/// doubling the pause between them, retrying only failures whose classified
/// kind is transient.
///
/// Classification happens here, once per failure, so the retry decision and
/// the diagnosis the caller finally sees always agree. The diagnosis is
/// scrubbed of the caller's credential at the same point, before it reaches
/// any log record.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            // A policy that never attempts would turn every submission into
            // a silent no-op.
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `attempt` until it succeeds, fails non-transiently, or the
    /// attempt budget runs out. Returns the raw response text on success and
    /// the classified diagnosis of the last failure otherwise. Every
    /// diagnosis is scrubbed of `credential` before it is logged or
    /// returned.
    pub async fn execute<F, Fut>(
        &self,
        provider: ProviderId,
        credential: &Credential,
        mut attempt: F,
    ) -> Result<String, Diagnosis>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, InvokeError>>,
    {
        let mut state = RetryState::new(self);

        loop {
            let attempt_no = state.begin_attempt();
            match attempt().await {
                Ok(text) => {
                    debug!("Attempt {}/{} succeeded", attempt_no, self.max_attempts);
                    return Ok(text);
                }
                Err(cause) => {
                    // Scrub at classification; provider error bodies
                    // sometimes echo the key that was sent.
                    let diagnosis = ErrorClassifier::classify(&cause, provider)
                        .redacted(credential.expose());
                    if diagnosis.is_transient() && state.has_attempts_left() {
                        let delay = state.next_delay();
                        warn!(
                            "Attempt {}/{} failed ({}); retrying in {:.0?}",
                            attempt_no,
                            self.max_attempts,
                            diagnosis.message(),
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        warn!(
                            "Giving up after attempt {}/{}: {}",
                            attempt_no, self.max_attempts, diagnosis
                        );
                        return Err(diagnosis);
                    }
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INITIAL_BACKOFF)
    }
}

/// Attempt counter and backoff schedule for one `execute` call. Created
/// fresh per submission, so no delay state bleeds between requests.
struct RetryState {
    attempts_made: u32,
    max_attempts: u32,
    fallback_delay: Duration,
    schedule: ExponentialBackoff,
}

impl RetryState {
    fn new(policy: &RetryPolicy) -> Self {
        let schedule = ExponentialBackoff {
            current_interval: policy.initial_backoff,
            initial_interval: policy.initial_backoff,
            // Deterministic delays; the attempt budget is too small for
            // jitter to matter.
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: Duration::from_secs(120),
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        };
        Self {
            attempts_made: 0,
            max_attempts: policy.max_attempts,
            fallback_delay: policy.initial_backoff,
            schedule,
        }
    }

    fn begin_attempt(&mut self) -> u32 {
        self.attempts_made += 1;
        self.attempts_made
    }

    fn has_attempts_left(&self) -> bool {
        self.attempts_made < self.max_attempts
    }

    fn next_delay(&mut self) -> Duration {
        // With max_elapsed_time unset the schedule never exhausts, but the
        // Backoff contract still returns an Option.
        self.schedule.next_backoff().unwrap_or(self.fallback_delay)
    }
}
