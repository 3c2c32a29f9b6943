use serde::{Deserialize, Serialize};

use crate::core::position::Position;

/// Whether the map is shown yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppPhase {
    #[default]
    Loading,
    Ready,
}

/// Gates the loading screen.
///
/// Moves to [`AppPhase::Ready`] once both the minimum loading time has passed
/// and a position with non-zero latitude and longitude has arrived, in either
/// order. There is no way back to loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseController {
    minimum_time_elapsed: bool,
    real_fix_received: bool,
    phase: AppPhase,
}

impl PhaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == AppPhase::Ready
    }

    /// Returns true if this call moved the phase to ready
    pub fn mark_minimum_time_elapsed(&mut self) -> bool {
        self.minimum_time_elapsed = true;
        self.advance()
    }

    /// Returns true if this call moved the phase to ready.
    ///
    /// A `0, 0` sample is not a fix and leaves the phase alone.
    pub fn mark_position_received(&mut self, position: &Position) -> bool {
        if position.is_real_fix() {
            self.real_fix_received = true;
        }
        self.advance()
    }

    fn advance(&mut self) -> bool {
        if self.phase == AppPhase::Loading && self.minimum_time_elapsed && self.real_fix_received {
            self.phase = AppPhase::Ready;
            log::info!("tracker ready");
            true
        } else {
            false
        }
    }
}
