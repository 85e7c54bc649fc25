//! BDD test world for pinger service

use std::sync::Arc;
use std::time::Duration;

use cucumber::World;
use pinger::io::HttpClient;
use pinger::{DispatchResult, Dispatcher, EndpointOutcome, RetryPolicy, Ticker};
use tokio::task::JoinHandle;

use crate::scripted_client::ScriptedHttpClient;

/// Retry policy with the production shape but shorter delays
pub fn scenario_policy() -> RetryPolicy {
    RetryPolicy {
        attempt_timeout: Duration::from_millis(200),
        max_attempts: 3,
        backoff_step: Duration::from_millis(20),
    }
}

#[derive(Debug, Default, World)]
pub struct PingerWorld {
    pub client: Arc<ScriptedHttpClient>,
    pub endpoints: Vec<String>,

    // Dispatch
    pub dispatch_result: Option<DispatchResult>,
    pub dispatch_elapsed: Option<Duration>,

    // Ticks
    pub tick_outcomes: Option<Vec<EndpointOutcome>>,
    pub background_tick: Option<JoinHandle<Vec<EndpointOutcome>>>,

    // Lifecycle
    pub interval: Option<Duration>,
    pub shutdown_result: Option<pinger::Result<()>>,
    pub shutdown_elapsed: Option<Duration>,
}

impl PingerWorld {
    pub fn http(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.client) as Arc<dyn HttpClient>
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::with_policy(self.http(), scenario_policy())
    }

    pub fn ticker(&self) -> Ticker {
        Ticker::new(self.endpoints.clone(), Arc::new(self.dispatcher()))
    }
}
