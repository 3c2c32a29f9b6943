//! # sattrack
//!
//! View-state reconciliation for tracking a satellite on an interactive map.
//!
//! Periodic position samples, user pan/zoom gestures and a chosen map theme
//! are merged into one render state. Automatic recentering follows the
//! satellite without undoing the zoom level the user picked.

pub mod core;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod tracking;
pub mod ui;

pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::TrackerConfig,
    geo::LatLng,
    position::Position,
    view_state::ViewState,
    viewport::{CameraState, Dimension},
};

pub use tracking::{
    phase::{AppPhase, PhaseController},
    reconcile::{ReconciliationEngine, TickOutcome},
    source::PositionSource,
};

#[cfg(feature = "http")]
pub use tracking::source::HttpPositionSource;

pub use ui::{
    dashboard::DashboardReadout,
    render::{RenderFrame, Renderer},
    style::{MapTheme, StyleRef, ThemeSelector},
};

#[cfg(feature = "tokio-runtime")]
pub use runtime::{TrackerController, TrackerHandle, ViewEvent};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Malformed sample: {0}")]
    MalformedSample(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Error type alias for convenience
pub type Error = TrackerError;
