//! Notification dispatch with a per-attempt deadline and linear backoff

use std::sync::Arc;
use std::time::Duration;

use crate::io::HttpClient;
use crate::PingerError;

/// Deadline applied to every attempt
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Total attempts per dispatch (one initial try plus two retries)
pub const MAX_ATTEMPTS: u32 = 3;

/// Unit of the linear backoff between attempts
pub const BACKOFF_STEP: Duration = Duration::from_millis(500);

/// Timing constants for one dispatch.
///
/// The default is the only production policy; other values exist so tests can
/// run with shorter delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempt_timeout: Duration,
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: ATTEMPT_TIMEOUT,
            max_attempts: MAX_ATTEMPTS,
            backoff_step: BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after `attempt` (1-based) has failed
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

/// Outcome of one dispatch to one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Success { status: u16, body: String },
    Failure { error: String },
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Success { .. })
    }
}

/// Sends a JSON POST to a single URL, retrying transient failures
pub struct Dispatcher {
    http: Arc<dyn HttpClient>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .finish()
    }
}

impl Dispatcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_policy(http, RetryPolicy::default())
    }

    pub fn with_policy(http: Arc<dyn HttpClient>, policy: RetryPolicy) -> Self {
        Self { http, policy }
    }

    /// Deliver `body` to `url`.
    ///
    /// Never returns an error: exhausting every attempt yields
    /// [`DispatchResult::Failure`] carrying the last error.
    pub async fn dispatch(&self, url: &str, body: &serde_json::Value) -> DispatchResult {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt(url, body).await {
                Ok((status, body)) => return DispatchResult::Success { status, body },
                Err(e) => {
                    tracing::warn!("Attempt {}/{} to {} failed: {}", attempt, max_attempts, url, e);
                    if attempt >= max_attempts {
                        return DispatchResult::Failure {
                            error: e.to_string(),
                        };
                    }
                }
            }

            tokio::time::sleep(self.policy.backoff_after(attempt)).await;
            attempt += 1;
        }
    }

    /// One attempt. The deadline covers the wait for a status, not the body.
    async fn attempt(&self, url: &str, body: &serde_json::Value) -> crate::Result<(u16, String)> {
        let response = self
            .http
            .post_json(url, body, self.policy.attempt_timeout)
            .await?;

        if !response.is_success() {
            return Err(PingerError::Status {
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }
        Ok((response.status, response.body))
    }
}
