//! Simulation core for the robotic mower status API.
//!
//! There is no hardware behind this crate. The [`Simulator`] owns the
//! telemetry record, the optional field configuration, and the mower's
//! position on that field, and advances them on two clocks:
//!
//! - every status poll moves the job forward by one percent, and
//! - the background [`ticker`] moves the mower along its mowing pattern.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `mower-config.yaml` into
//!   strongly-typed structs.
//! - [`simulator`] -- The simulated mower and its arithmetic.
//! - [`ticker`] -- Fixed-rate background task driving the position tick.
//!
//! [`Simulator`]: simulator::Simulator

pub mod config;
pub mod simulator;
pub mod ticker;

pub use config::{ConfigError, LoggingConfig, MowerConfig, ServerSection, SimulationConfig};
pub use simulator::{SharedSimulator, Simulator};
pub use ticker::{run_ticker, spawn_ticker};
