//! Status API server for the simulated robotic mower.
//!
//! This crate provides an Axum HTTP server that the mobile app talks to
//! during development:
//!
//! - `GET /api/status` -- poll telemetry (advances the simulated job)
//! - `POST /api/command` -- `emergency_stop`, `pause`, `resume`
//! - `POST /api/pattern` -- accept a mowing pattern upload
//! - `POST /api/field-config` -- set the field size and anchors
//!
//! # Architecture
//!
//! All handlers share one [`Simulator`](mower_core::Simulator) behind a
//! single mutex in [`AppState`]. The background ticker from
//! [`mower_core::ticker`] locks the same mutex, so every read and write
//! of mower state is serialized.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
