//! Shared application state for the status API.

use std::sync::Arc;

use mower_core::{SharedSimulator, Simulator};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// simulator is the only mutable state; it is also handed to the
/// background ticker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The simulated mower, behind the one mutex every caller locks.
    pub simulator: SharedSimulator,
}

impl AppState {
    /// Create application state around an existing shared simulator.
    pub const fn new(simulator: SharedSimulator) -> Self {
        Self { simulator }
    }

    /// Create application state with a default simulator.
    pub fn with_defaults() -> Arc<Self> {
        Arc::new(Self::new(Simulator::default().into_shared()))
    }
}
