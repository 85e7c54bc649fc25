//! Pinger - periodic endpoint notification service
//!
//! POSTs `{}` to every configured endpoint once at startup and then every
//! minute, retrying transient failures, until interrupted.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod logging;
pub mod scheduler;

pub use config::{load_config, Config};
pub use dispatch::{DispatchResult, Dispatcher, RetryPolicy};
pub use error::{PingerError, Result};
pub use scheduler::{EndpointOutcome, Scheduler, Ticker};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::scheduler::TICK_INTERVAL;

/// Builder for the pinger service.
///
/// Production code only supplies a [`Config`]; tests inject an HTTP client,
/// retry policy, or tick interval.
pub struct PingerBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    policy: RetryPolicy,
    interval: Duration,
}

impl PingerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            policy: RetryPolicy::default(),
            interval: TICK_INTERVAL,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn build(self) -> Pinger {
        let http = self
            .http
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let dispatcher = Arc::new(Dispatcher::with_policy(http, self.policy));

        tracing::info!("Configured {} endpoints", self.config.endpoints.len());
        for url in &self.config.endpoints {
            tracing::debug!("Endpoint: {}", url);
        }

        let ticker = Ticker::new(self.config.endpoints, dispatcher);
        Pinger {
            scheduler: Scheduler::with_interval(ticker, self.interval),
        }
    }
}

/// A built pinger, ready to run
#[derive(Debug)]
pub struct Pinger {
    scheduler: Scheduler,
}

impl Pinger {
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run ticks until `shutdown` resolves, then stop the timer.
    ///
    /// Ticks still in flight are not awaited; they end when the runtime does.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.scheduler.start();
        shutdown.await;
        self.scheduler.stop();
        tracing::info!("Shutting down");
        Ok(())
    }
}
