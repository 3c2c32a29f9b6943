//! Reconciliation of automatic position updates with user camera control
//!
//! [`ReconciliationEngine`] owns the current [`ViewState`], the loading gate
//! and the chosen theme. Every event replaces the view state with the result
//! of a pure transition, so an event either applies completely or not at all.
//!
//! Ordering is last-writer-wins on the camera: a sample is applied against
//! whatever camera exists when it arrives, even if the user moved the map
//! while the fetch was in flight. Zoom is the exception. It is captured from
//! every camera change and reused by every recenter, so a user's zoom is
//! never lost to an automatic update.

use crate::core::config::TrackerConfig;
use crate::core::position::Position;
use crate::core::view_state::ViewState;
use crate::core::viewport::CameraState;
use crate::tracking::phase::{AppPhase, PhaseController};
use crate::ui::dashboard::DashboardReadout;
use crate::ui::render::{MainView, RenderFrame};
use crate::ui::style::{MapTheme, StyleCatalog, StyleRef, ThemeSelector};
use crate::Result;

/// What happened to a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Applied,
    /// Fetch failed or the sample was malformed; nothing changed
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    view: ViewState,
    phase: PhaseController,
    themes: ThemeSelector,
    theme: MapTheme,
}

impl ReconciliationEngine {
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_catalog(config, StyleCatalog::default())
    }

    pub fn with_catalog(config: &TrackerConfig, catalog: StyleCatalog) -> Self {
        Self {
            view: ViewState::new(&config.camera),
            phase: PhaseController::new(),
            themes: ThemeSelector::new(catalog),
            theme: MapTheme::FALLBACK,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn camera(&self) -> CameraState {
        self.view.current_camera()
    }

    pub fn persisted_zoom(&self) -> f64 {
        self.view.persisted_zoom()
    }

    pub fn phase(&self) -> AppPhase {
        self.phase.phase()
    }

    pub fn is_ready(&self) -> bool {
        self.phase.is_ready()
    }

    pub fn theme(&self) -> MapTheme {
        self.theme
    }

    pub fn style(&self) -> &StyleRef {
        self.themes.catalog().style(self.theme)
    }

    /// Applies a new sample: recenter at the persisted zoom and feed the
    /// loading gate. Malformed samples are skipped.
    pub fn on_tick(&mut self, sample: Position) -> TickOutcome {
        if let Err(e) = sample.validate() {
            log::warn!("skipping tick: {}", e);
            return TickOutcome::Skipped;
        }

        self.view = self.view.apply_position(&sample);
        self.phase.mark_position_received(&sample);
        log::debug!(
            "recentered on ({:.4}, {:.4}) at zoom {}",
            sample.latitude,
            sample.longitude,
            self.view.persisted_zoom()
        );
        TickOutcome::Applied
    }

    /// Applies the outcome of one fetch. Errors are logged and the tick is
    /// skipped; nothing reaches the renderer.
    pub fn on_fetch_result(&mut self, result: Result<Position>) -> TickOutcome {
        match result {
            Ok(sample) => self.on_tick(sample),
            Err(e) => {
                log::warn!("position fetch failed, skipping tick: {}", e);
                TickOutcome::Skipped
            }
        }
    }

    /// Takes the camera the renderer reports after a gesture.
    pub fn on_user_interaction(&mut self, camera: CameraState) {
        self.view = self.view.apply_user_camera(camera);
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.view = self.view.apply_resize(width, height);
    }

    /// Selects a theme by free-form name. Unknown names select streets.
    pub fn on_theme_selected(&mut self, name: &str) -> &StyleRef {
        self.theme = self.themes.theme_for(name);
        log::debug!("theme {:?} -> {}", name, self.theme);
        self.style()
    }

    /// Returns true if this moved the phase to ready
    pub fn on_minimum_time_elapsed(&mut self) -> bool {
        self.phase.mark_minimum_time_elapsed()
    }

    /// The frame for the current state
    pub fn frame(&self) -> RenderFrame {
        match self.view.last_position() {
            Some(position) if self.phase.is_ready() => RenderFrame::Main(MainView {
                camera: self.view.current_camera(),
                style: self.style().clone(),
                marker: position.coordinates(),
                dashboard: DashboardReadout::from_position(position),
                position: *position,
            }),
            _ => RenderFrame::Loading,
        }
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}
