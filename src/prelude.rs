//! Prelude module for common sattrack types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use sattrack::prelude::*;`

pub use crate::core::{
    config::{CameraConfig, PollingConfig, SourceConfig, TrackerConfig, TrackerProfile},
    geo::LatLng,
    position::Position,
    view_state::ViewState,
    viewport::{CameraState, Dimension},
};

pub use crate::tracking::{
    phase::{AppPhase, PhaseController},
    reconcile::{ReconciliationEngine, TickOutcome},
    source::PositionSource,
};

#[cfg(feature = "http")]
pub use crate::tracking::source::HttpPositionSource;

pub use crate::ui::{
    dashboard::DashboardReadout,
    render::{MainView, RecordingRenderer, RenderFrame, Renderer},
    style::{MapTheme, StyleCatalog, StyleRef, ThemeSelector},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{TrackerController, TrackerHandle, ViewEvent};

pub use crate::{Error as TrackerError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};
