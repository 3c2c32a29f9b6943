pub mod phase;
pub mod reconcile;
pub mod source;

pub use phase::{AppPhase, PhaseController};
pub use reconcile::{ReconciliationEngine, TickOutcome};
pub use source::PositionSource;

#[cfg(feature = "http")]
pub use source::HttpPositionSource;
