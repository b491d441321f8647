//! Fixed-rate background task that moves the mower along its pattern.
//!
//! The ticker locks the shared simulator once per period and applies a
//! single [`Simulator::tick`](crate::simulator::Simulator::tick). It has
//! no stop condition of its own; the owner aborts the returned
//! [`JoinHandle`] at shutdown.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::simulator::SharedSimulator;

/// Run the position tick every `period`, forever.
///
/// The first tick fires one full period after the call.
pub async fn run_ticker(simulator: SharedSimulator, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        simulator.lock().await.tick();
    }
}

/// Spawn [`run_ticker`] on a background Tokio task.
pub fn spawn_ticker(simulator: SharedSimulator, period: Duration) -> JoinHandle<()> {
    let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
    info!(period_ms, "Position ticker started");
    tokio::spawn(run_ticker(simulator, period))
}
