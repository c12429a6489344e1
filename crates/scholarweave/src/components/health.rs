//! Backend health indicator with periodic polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::HealthResponse;

/// What the health indicator currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    /// A check is in flight.
    Loading,
    /// The last check failed with this message.
    Error(String),
    /// The last check succeeded but returned no payload.
    NoData,
    /// The last check succeeded.
    Healthy(HealthResponse),
}

impl HealthState {
    /// Map a health check outcome to a display state.
    #[must_use]
    pub fn from_result(result: ClientResult<Option<HealthResponse>>) -> Self {
        match result {
            Ok(Some(health)) => Self::Healthy(health),
            Ok(None) => Self::NoData,
            Err(err) => Self::Error(err.user_message()),
        }
    }

    /// Whether a check is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Run a single health check.
pub async fn check_health(client: &ApiClient) -> HealthState {
    HealthState::from_result(client.health().await)
}

/// A mounted health indicator.
///
/// Mounting spawns a task that checks health immediately and then at a fixed
/// interval. The task is aborted when the indicator is dropped.
#[derive(Debug)]
pub struct HealthIndicator {
    state: watch::Receiver<HealthState>,
    task: JoinHandle<()>,
}

impl HealthIndicator {
    /// Mount the indicator and start polling.
    #[must_use]
    pub fn mount(client: Arc<ApiClient>, interval: Duration) -> Self {
        let (tx, state) = watch::channel(HealthState::Loading);
        let task = tokio::spawn(poll(client, interval, tx));

        tracing::debug!(interval_secs = interval.as_secs_f64(), "Health indicator mounted");
        Self { state, task }
    }

    /// Latest state.
    #[must_use]
    pub fn state(&self) -> HealthState {
        self.state.borrow().clone()
    }

    /// Wait until the current check has finished and return its state.
    pub async fn settled(&mut self) -> HealthState {
        let settled = self.state.wait_for(|state| !state.is_loading()).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    /// Wait for the next state change. Returns `None` once polling has stopped.
    pub async fn changed(&mut self) -> Option<HealthState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }
}

impl Drop for HealthIndicator {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Health indicator unmounted");
    }
}

async fn poll(client: Arc<ApiClient>, interval: Duration, tx: watch::Sender<HealthState>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        tx.send_replace(HealthState::Loading);
        let state = check_health(&client).await;

        if let HealthState::Error(message) = &state {
            tracing::warn!(%message, "Health check failed");
        }

        if tx.send(state).is_err() {
            break;
        }
    }
}
