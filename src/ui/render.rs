//! Boundary between the engine and whatever draws the map
//!
//! The engine never draws. After each state change it hands a [`RenderFrame`]
//! to a [`Renderer`]. Drawing tiles, the marker icon and the dashboard widgets
//! is the renderer's job.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;
use crate::core::position::Position;
use crate::core::viewport::CameraState;
use crate::ui::dashboard::DashboardReadout;
use crate::ui::style::StyleRef;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderFrame {
    /// Loading screen: minimum time not reached or no real fix yet
    Loading,
    Main(MainView),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainView {
    pub camera: CameraState,
    pub style: StyleRef,
    /// Where the satellite marker goes
    pub marker: LatLng,
    pub dashboard: DashboardReadout,
    pub position: Position,
}

impl RenderFrame {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn main_view(&self) -> Option<&MainView> {
        match self {
            Self::Main(view) => Some(view),
            Self::Loading => None,
        }
    }
}

/// Receives frames from the engine
pub trait Renderer: Send {
    fn render(&mut self, frame: &RenderFrame);
}

impl<F> Renderer for F
where
    F: FnMut(&RenderFrame) + Send,
{
    fn render(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}

/// Renderer that keeps every frame it is given.
///
/// Clones share the same frame list, so one clone can be handed to the
/// controller while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<RenderFrame>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<RenderFrame> {
        self.frames.lock().ok()?.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().map(|frames| frames.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame.clone());
        }
    }
}
