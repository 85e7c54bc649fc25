//! Tick scheduling: fan one dispatch out per endpoint on a repeating timer

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::dispatch::{DispatchResult, Dispatcher};

/// Time between the starts of consecutive ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(60_000);

/// Outcome for one endpoint within one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointOutcome {
    pub url: String,
    pub result: DispatchResult,
}

/// Runs one dispatch round over the immutable endpoint list
#[derive(Debug, Clone)]
pub struct Ticker {
    endpoints: Arc<[String]>,
    dispatcher: Arc<Dispatcher>,
}

impl Ticker {
    pub fn new(endpoints: Vec<String>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            endpoints: endpoints.into(),
            dispatcher,
        }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Dispatch `{}` to every endpoint concurrently and wait for all of them.
    ///
    /// Outcomes are returned in completion order. A failing or slow endpoint
    /// never cancels or delays its siblings.
    pub async fn tick(&self) -> Vec<EndpointOutcome> {
        tracing::info!("Starting tick, calling {} endpoints", self.endpoints.len());

        let mut tasks = JoinSet::new();
        for url in self.endpoints.iter() {
            let url = url.clone();
            let dispatcher = Arc::clone(&self.dispatcher);
            tasks.spawn(async move {
                let result = dispatcher.dispatch(&url, &json!({})).await;
                match &result {
                    DispatchResult::Success { status, .. } => {
                        tracing::info!("OK {} -> {}", url, status);
                    }
                    DispatchResult::Failure { error } => {
                        tracing::error!("FAILED {} -> {}", url, error);
                    }
                }
                EndpointOutcome { url, result }
            });
        }

        let mut outcomes = Vec::with_capacity(self.endpoints.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::error!("Dispatch task did not complete: {}", e),
            }
        }
        outcomes
    }
}

/// Owns the repeating timer that drives ticks
#[derive(Debug)]
pub struct Scheduler {
    ticker: Ticker,
    interval: Duration,
    cancel: CancellationToken,
    timer: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(ticker: Ticker) -> Self {
        Self::with_interval(ticker, TICK_INTERVAL)
    }

    pub fn with_interval(ticker: Ticker, interval: Duration) -> Self {
        Self {
            ticker,
            interval,
            cancel: CancellationToken::new(),
            timer: None,
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Fire a tick now, then one every interval until [`Scheduler::stop`].
    ///
    /// Ticks are spawned rather than awaited, so a slow tick may overlap the
    /// next one.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            tracing::debug!("Scheduler already started");
            return;
        }
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }

        let ticker = self.ticker.clone();
        let interval = self.interval;
        let cancel = self.cancel.clone();
        tracing::debug!("Starting scheduler with interval {:?}", interval);

        self.timer = Some(tokio::spawn(async move {
            timer_loop(ticker, interval, cancel).await;
        }));
    }

    /// Stop scheduling further ticks. In-flight ticks are left running.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if self.timer.take().is_some() {
            tracing::debug!("Scheduler stopped");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn timer_loop(ticker: Ticker, interval: Duration, cancel: CancellationToken) {
    // The first tick of a tokio interval completes immediately.
    let mut timer = tokio::time::interval(interval);
    // After a stall or suspend, fire once and restart the cadence from there.
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Timer loop cancelled");
                break;
            }
            _ = timer.tick() => {
                let ticker = ticker.clone();
                tokio::spawn(async move {
                    ticker.tick().await;
                });
            }
        }
    }
}
