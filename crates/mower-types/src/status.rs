//! Mower telemetry served by `GET /api/status`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A point on the field, in meters from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MowerPosition {
    /// Distance along the field width.
    pub x: f64,
    /// Distance along the field height.
    pub y: f64,
}

impl MowerPosition {
    /// Create a position from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Simulated localisation diagnostics.
///
/// The triangulated position is the ground truth of the simulation and is
/// always marked valid. The dead-reckoning estimate is offset from it along
/// the x axis by `position_error` meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PositionDebug {
    /// Position estimate integrated from wheel motion.
    pub dead_reckoning: MowerPosition,
    /// Position derived from the field anchors.
    pub triangulated: MowerPosition,
    /// Distance between the two estimates, in meters.
    pub position_error: f64,
    /// Set when `position_error` exceeds the warning threshold.
    pub position_warning: bool,
    /// Whether the anchor fix is usable.
    pub triangulation_valid: bool,
}

/// Full telemetry snapshot of the mower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MowerState {
    /// Whether the mower is currently cutting.
    pub is_mowing: bool,
    /// Battery charge in percent, within `[0, 100]`.
    pub battery_level: f64,
    /// Estimated minutes of battery left.
    pub battery_minutes: u32,
    /// Job completion in percent, within `[0, 100]`.
    pub mowing_progress: u32,
    /// Area already mowed, in square meters.
    pub mowed_area: f64,
    /// Area still to mow, in square meters. Never negative.
    pub remaining_area: f64,
    /// Total job area, in square meters.
    pub total_area: f64,
    /// Distance travelled, in kilometers.
    pub total_distance: f64,
    /// Whole hours of runtime.
    pub runtime_hours: u32,
    /// Minutes past the last whole runtime hour.
    pub runtime_minutes: u32,
    /// Minutes until the next charge is due.
    pub next_charge_minutes: u32,
    /// Current position, present once a field is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub position: Option<MowerPosition>,
    /// Localisation diagnostics, present once a field is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub position_debug: Option<PositionDebug>,
}

impl Default for MowerState {
    /// Mid-job snapshot the app sees right after the server starts.
    fn default() -> Self {
        Self {
            is_mowing: true,
            battery_level: 75.0,
            battery_minutes: 90,
            mowing_progress: 42,
            mowed_area: 168.0,
            remaining_area: 232.0,
            total_area: 400.0,
            total_distance: 2.4,
            runtime_hours: 1,
            runtime_minutes: 24,
            next_charge_minutes: 45,
            position: None,
            position_debug: None,
        }
    }
}
