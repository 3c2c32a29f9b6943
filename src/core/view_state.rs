//! Immutable view state and its transitions
//!
//! A [`ViewState`] is a plain value. Every transition returns a new record and
//! leaves the old one untouched, so the owner decides when a change becomes
//! visible. All transitions finish by running the zoom capture rule: if the
//! resulting camera's zoom differs from the persisted zoom, the persisted
//! zoom takes the camera's value. Recentering on a new position always reads
//! the persisted zoom, which is what keeps a user-chosen zoom alive across
//! automatic updates.

use serde::{Deserialize, Serialize};

use crate::core::config::CameraConfig;
use crate::core::position::Position;
use crate::core::viewport::{CameraState, Dimension};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    camera: CameraState,
    persisted_zoom: f64,
    last_position: Option<Position>,
}

impl ViewState {
    /// Initial state: the fallback origin at the initial zoom, which is also
    /// the first persisted zoom.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            camera: CameraState::new(config.fallback_origin, config.initial_zoom),
            persisted_zoom: config.initial_zoom,
            last_position: None,
        }
    }

    pub fn current_camera(&self) -> CameraState {
        self.camera
    }

    /// Zoom the next automatic recenter will use
    pub fn persisted_zoom(&self) -> f64 {
        self.persisted_zoom
    }

    /// The most recently applied sample, if any
    pub fn last_position(&self) -> Option<&Position> {
        self.last_position.as_ref()
    }

    /// Recenters on `sample` at the persisted zoom. Size is unchanged.
    pub fn apply_position(&self, sample: &Position) -> Self {
        let camera = self
            .camera
            .with_center(sample.coordinates())
            .with_zoom(self.persisted_zoom);

        Self {
            camera,
            last_position: Some(*sample),
            ..*self
        }
        .observe()
    }

    /// Takes the renderer's camera verbatim after a user gesture.
    pub fn apply_user_camera(&self, camera: CameraState) -> Self {
        Self { camera, ..*self }.observe()
    }

    /// Resizes to the viewport in pixels.
    ///
    /// The centre goes back to the last known position rather than to the
    /// initial origin. Before the first position the current centre is kept.
    pub fn apply_resize(&self, width: f64, height: f64) -> Self {
        let center = self
            .last_position
            .map(|position| position.coordinates())
            .unwrap_or_else(|| self.camera.center());

        let camera = self
            .camera
            .with_center(center)
            .with_zoom(self.persisted_zoom)
            .with_size(Dimension::Pixels(width), Dimension::Pixels(height));

        Self { camera, ..*self }.observe()
    }

    /// Zoom capture. A non-finite zoom from the renderer stays on the camera
    /// but is never persisted.
    fn observe(self) -> Self {
        if self.camera.zoom.is_finite() && self.camera.zoom != self.persisted_zoom {
            log::debug!(
                "persisted zoom {} -> {}",
                self.persisted_zoom,
                self.camera.zoom
            );
            Self {
                persisted_zoom: self.camera.zoom,
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
