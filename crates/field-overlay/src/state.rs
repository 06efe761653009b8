//! Run state derivation for the overlay drivers.
//!
//! The pause conditions (overlay toggled off, page hidden, viewport moving)
//! can overlap in any combination, so they are never stored as separate
//! flags with their own pause/resume calls. They are inputs to a single
//! derivation with a fixed precedence, and every combination has exactly
//! one answer.

use serde::{Deserialize, Serialize};

/// What the simulation loop should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    PausedByVisibility,
    PausedByMovement,
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

/// The three input conditions a driver tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayInputs {
    /// The overlay layer is toggled on.
    pub enabled: bool,
    /// The hosting page is visible (not a background tab).
    pub page_visible: bool,
    /// The map viewport is actively being dragged or zoomed.
    pub viewport_moving: bool,
}

impl OverlayInputs {
    /// Initial state: toggled off, page visible, viewport at rest.
    pub fn new() -> Self {
        Self {
            enabled: false,
            page_visible: true,
            viewport_moving: false,
        }
    }

    /// Derive the run state. Precedence: a toggled-off overlay is Stopped
    /// no matter what; a hidden page wins over movement; movement wins over
    /// running.
    pub fn run_state(&self) -> RunState {
        if !self.enabled {
            RunState::Stopped
        } else if !self.page_visible {
            RunState::PausedByVisibility
        } else if self.viewport_moving {
            RunState::PausedByMovement
        } else {
            RunState::Running
        }
    }
}

impl Default for OverlayInputs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(enabled: bool, page_visible: bool, viewport_moving: bool) -> OverlayInputs {
        OverlayInputs {
            enabled,
            page_visible,
            viewport_moving,
        }
    }

    #[test]
    fn test_disabled_is_stopped_regardless_of_other_inputs() {
        for visible in [true, false] {
            for moving in [true, false] {
                assert_eq!(inputs(false, visible, moving).run_state(), RunState::Stopped);
            }
        }
    }

    #[test]
    fn test_hidden_page_wins_over_movement() {
        assert_eq!(
            inputs(true, false, true).run_state(),
            RunState::PausedByVisibility
        );
    }

    #[test]
    fn test_movement_pauses_visible_overlay() {
        assert_eq!(
            inputs(true, true, true).run_state(),
            RunState::PausedByMovement
        );
    }

    #[test]
    fn test_all_clear_runs() {
        assert_eq!(inputs(true, true, false).run_state(), RunState::Running);
    }
}
