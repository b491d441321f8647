//! Shared type definitions for the robotic mower status API.
//!
//! These are the JSON shapes exchanged with the mobile app. Field names
//! are serialized in `camelCase` to match what the app expects, and all
//! types flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`status`] -- Mower telemetry snapshot and position diagnostics
//! - [`field`] -- Field boundary configuration (dimensions + anchors)
//! - [`command`] -- Control commands and API acknowledgement bodies

pub mod command;
pub mod field;
pub mod status;

pub use command::{
    AckResponse, CommandRequest, FieldConfigResponse, MowerCommand, UnknownCommand,
};
pub use field::{
    Anchor, AnchorCorner, FieldConfig, FieldConfigError, FieldDimensions, REQUIRED_ANCHORS,
};
pub use status::{MowerPosition, MowerState, PositionDebug};
