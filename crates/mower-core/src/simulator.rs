//! The simulated mower.
//!
//! [`Simulator`] is the single mutable record behind the API: telemetry,
//! field configuration, and position. Callers share it as a
//! [`SharedSimulator`] and hold the lock for the duration of one
//! operation; every operation is constant-time arithmetic.

use std::sync::Arc;

use mower_types::{
    AnchorCorner, FieldConfig, FieldDimensions, MowerCommand, MowerPosition, MowerState,
    PositionDebug,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::SimulationConfig;

/// Upper bound of `mowing_progress`.
const PROGRESS_COMPLETE: u32 = 100;

/// Upper bound of `battery_level`.
const BATTERY_FULL: f64 = 100.0;

/// Simulator shared between HTTP handlers and the ticker.
pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// In-memory mower: telemetry, field, and position.
#[derive(Debug, Clone)]
pub struct Simulator {
    params: SimulationConfig,
    state: MowerState,
    field: Option<FieldConfig>,
    position: MowerPosition,
}

impl Simulator {
    /// Create a simulator starting from the default telemetry snapshot.
    pub fn new(params: SimulationConfig) -> Self {
        Self::with_state(params, MowerState::default())
    }

    /// Create a simulator starting from `state`.
    pub fn with_state(params: SimulationConfig, state: MowerState) -> Self {
        let position = params.start_position;
        Self {
            params,
            state,
            field: None,
            position,
        }
    }

    /// Wrap the simulator for sharing across tasks.
    pub fn into_shared(self) -> SharedSimulator {
        Arc::new(Mutex::new(self))
    }

    /// Current telemetry, without advancing it.
    pub const fn state(&self) -> &MowerState {
        &self.state
    }

    /// The configured field, if any.
    pub const fn field(&self) -> Option<&FieldConfig> {
        self.field.as_ref()
    }

    /// Current position on the field.
    pub const fn position(&self) -> MowerPosition {
        self.position
    }

    /// Simulation constants in use.
    pub const fn params(&self) -> &SimulationConfig {
        &self.params
    }

    /// Advance the job by one poll and return the resulting telemetry.
    ///
    /// While cutting and below 100 %, each poll adds one percent of
    /// progress, moves `progress_area_step` from remaining to mowed area,
    /// and drains the battery. Once a field is configured the snapshot
    /// also carries the position and its diagnostics.
    pub fn poll_status(&mut self) -> MowerState {
        if self.state.is_mowing && self.state.mowing_progress < PROGRESS_COMPLETE {
            let step = self.params.progress_area_step;
            self.state.mowing_progress = self
                .state
                .mowing_progress
                .saturating_add(1)
                .min(PROGRESS_COMPLETE);
            self.state.mowed_area += step;
            self.state.remaining_area = (self.state.remaining_area - step).max(0.0);
            self.state.battery_level = (self.state.battery_level
                - self.params.battery_drain_per_poll)
                .clamp(0.0, BATTERY_FULL);
        }

        if self.field.is_some() {
            self.state.position = Some(self.position);
            self.state.position_debug = Some(self.position_debug());
        }

        self.state.clone()
    }

    /// Localisation diagnostics for the current position and progress.
    ///
    /// Every `warning_cycle`-th progress value reports `warning_error`
    /// of drift, which is above the warning threshold with the default
    /// constants. All other values report `nominal_error`.
    pub fn position_debug(&self) -> PositionDebug {
        let warning_poll = self
            .state
            .mowing_progress
            .checked_rem(self.params.warning_cycle)
            .is_some_and(|r| r == 0);
        let error = if warning_poll {
            self.params.warning_error
        } else {
            self.params.nominal_error
        };

        PositionDebug {
            dead_reckoning: MowerPosition::new(self.position.x + error, self.position.y),
            triangulated: self.position,
            position_error: error,
            position_warning: error > self.params.warning_threshold,
            triangulation_valid: true,
        }
    }

    /// Apply a control command. Only the cutting flag changes.
    pub fn apply_command(&mut self, command: MowerCommand) {
        self.state.is_mowing = command.is_mowing_after();
        debug!(%command, is_mowing = self.state.is_mowing, "Command applied");
    }

    /// Replace the field configuration and return the mower to its start
    /// position, pulled inside the field if the field is smaller.
    pub fn configure_field(&mut self, config: FieldConfig) -> &FieldConfig {
        for corner in AnchorCorner::ALL {
            if config.anchor(corner).is_none() {
                debug!(%corner, "No anchor tagged for corner");
            }
        }
        let FieldDimensions { width, height } = config.size();
        let start = self.params.start_position;
        self.position = MowerPosition::new(
            start.x.min(width).max(0.0),
            start.y.min(height).max(0.0),
        );
        self.field.insert(config)
    }

    /// Advance the position by one tick of the mowing pattern.
    ///
    /// Does nothing unless the mower is cutting on a configured field.
    /// The mower moves `step_per_tick` along x; once it reaches the far
    /// margin it stays there and steps one row along y per tick until the
    /// far y margin is reached too. Returns whether a tick was applied.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_mowing {
            return false;
        }
        let Some(FieldDimensions { width, height }) = self.field.as_ref().map(FieldConfig::size)
        else {
            return false;
        };

        let x_limit = width - self.params.edge_margin;
        let y_limit = height - self.params.edge_margin;
        let pos = &mut self.position;

        pos.x += self.params.step_per_tick;
        if pos.x >= x_limit {
            pos.x = x_limit;
            pos.y += self.params.row_spacing;
            if pos.y >= y_limit {
                pos.y = y_limit;
            }
        }

        pos.x = pos.x.min(width).max(0.0);
        pos.y = pos.y.min(height).max(0.0);

        debug!(x = pos.x, y = pos.y, "Position advanced");
        true
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn field(width: f64, height: f64) -> FieldConfig {
        let body = json!({
            "anchors": [{}, {}, {}],
            "dimensions": {"width": width, "height": height},
        });
        let Ok(config) = FieldConfig::from_request(&body) else {
            panic!("test field must be valid");
        };
        config
    }

    #[test]
    fn poll_advances_job_while_mowing() {
        let mut sim = Simulator::default();
        let before = sim.state().clone();

        let after = sim.poll_status();

        assert_eq!(after.mowing_progress, before.mowing_progress + 1);
        assert!(close(after.mowed_area, before.mowed_area + 4.0));
        assert!(close(after.remaining_area, before.remaining_area - 4.0));
        assert!(close(after.battery_level, before.battery_level - 0.25));
        assert!(after.position.is_none());
        assert!(after.position_debug.is_none());
    }

    #[test]
    fn poll_is_idle_when_paused() {
        let mut sim = Simulator::default();
        sim.apply_command(MowerCommand::Pause);
        let before = sim.state().clone();

        let after = sim.poll_status();

        assert_eq!(after, before);
    }

    #[test]
    fn progress_saturates_at_complete() {
        let mut sim = Simulator::default();
        for _ in 0..200 {
            sim.poll_status();
        }
        let done = sim.state().clone();
        assert_eq!(done.mowing_progress, 100);

        let again = sim.poll_status();
        assert_eq!(again.mowing_progress, 100);
        assert!(close(again.mowed_area, done.mowed_area));
        assert!(close(again.remaining_area, done.remaining_area));
        assert!(close(again.battery_level, done.battery_level));
    }

    #[test]
    fn remaining_area_and_battery_floor_at_zero() {
        let state = MowerState {
            mowing_progress: 0,
            remaining_area: 2.0,
            battery_level: 0.1,
            ..MowerState::default()
        };
        let mut sim = Simulator::with_state(SimulationConfig::default(), state);

        let after = sim.poll_status();

        assert!(close(after.remaining_area, 0.0));
        assert!(close(after.battery_level, 0.0));
    }

    #[test]
    fn commands_toggle_mowing() {
        let mut sim = Simulator::default();
        sim.apply_command(MowerCommand::EmergencyStop);
        assert!(!sim.state().is_mowing);
        sim.apply_command(MowerCommand::Resume);
        assert!(sim.state().is_mowing);
        sim.apply_command(MowerCommand::Pause);
        assert!(!sim.state().is_mowing);
    }

    #[test]
    fn warning_on_every_twentieth_progress() {
        let state = MowerState {
            mowing_progress: 18,
            ..MowerState::default()
        };
        let mut sim = Simulator::with_state(SimulationConfig::default(), state);
        sim.configure_field(field(10.0, 10.0));

        let at_19 = sim.poll_status();
        let Some(debug_19) = at_19.position_debug else {
            panic!("configured field must report diagnostics");
        };
        assert!(!debug_19.position_warning);
        assert!(close(debug_19.position_error, 0.05));

        let at_20 = sim.poll_status();
        assert_eq!(at_20.mowing_progress, 20);
        let Some(debug_20) = at_20.position_debug else {
            panic!("configured field must report diagnostics");
        };
        assert!(debug_20.position_warning);
        assert!(close(debug_20.position_error, 1.5));
        assert!(debug_20.triangulation_valid);
        assert!(close(
            debug_20.dead_reckoning.x,
            debug_20.triangulated.x + 1.5
        ));
    }

    #[test]
    fn configure_field_resets_position() {
        let mut sim = Simulator::default();
        sim.configure_field(field(10.0, 10.0));
        for _ in 0..5 {
            sim.tick();
        }
        assert!(sim.position().x > 0.5);

        sim.configure_field(field(20.0, 20.0));

        assert_eq!(sim.position(), MowerPosition::new(0.5, 0.5));
        assert!(sim.field().is_some_and(|f| close(f.size().width, 20.0)));
    }

    #[test]
    fn tick_requires_mowing_and_field() {
        let mut sim = Simulator::default();
        assert!(!sim.tick());

        sim.configure_field(field(10.0, 10.0));
        sim.apply_command(MowerCommand::Pause);
        assert!(!sim.tick());
        assert_eq!(sim.position(), MowerPosition::new(0.5, 0.5));

        sim.apply_command(MowerCommand::Resume);
        assert!(sim.tick());
        assert!(close(sim.position().x, 0.8));
        assert!(close(sim.position().y, 0.5));
    }

    #[test]
    fn tick_changes_row_at_far_edge() {
        let mut sim = Simulator::default();
        sim.configure_field(field(10.0, 10.0));

        // Run until the mower reaches the x margin.
        let mut ticks = 0;
        while sim.position().x < 9.5 && ticks < 100 {
            sim.tick();
            ticks += 1;
        }
        let at_edge = sim.position();
        assert!(close(at_edge.x, 9.5));
        assert!(close(at_edge.y, 1.0));

        sim.tick();
        assert!(close(sim.position().x, 9.5));
        assert!(close(sim.position().y, 1.5));
    }

    #[test]
    fn tick_saturates_in_far_corner() {
        let mut sim = Simulator::default();
        sim.configure_field(field(10.0, 10.0));
        for _ in 0..200 {
            sim.tick();
        }

        let pos = sim.position();
        assert!(close(pos.x, 9.5));
        assert!(close(pos.y, 9.5));

        sim.tick();
        assert_eq!(sim.position(), pos);
    }

    #[test]
    fn position_stays_inside_tiny_field() {
        let mut sim = Simulator::default();
        sim.configure_field(field(0.2, 0.2));
        assert_eq!(sim.position(), MowerPosition::new(0.2, 0.2));
        sim.tick();

        let pos = sim.position();
        assert!((0.0..=0.2).contains(&pos.x));
        assert!((0.0..=0.2).contains(&pos.y));
    }
}
