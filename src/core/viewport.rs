use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;

/// One rendered dimension of the map.
///
/// Before the first resize event the map fills its container (`100%`); after
/// that the renderer reports exact pixel sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dimension {
    Percent(f64),
    Pixels(f64),
}

impl Dimension {
    /// Fill the parent container
    pub const FULL: Dimension = Dimension::Percent(100.0);
}

impl Default for Dimension {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{}%", value),
            Self::Pixels(value) => write!(f, "{}px", value),
        }
    }
}

/// The map camera: centre, zoom and rendered size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub width: Dimension,
    pub height: Dimension,
}

impl CameraState {
    /// Creates a full-container camera at the given centre and zoom
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            zoom,
            width: Dimension::FULL,
            height: Dimension::FULL,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn with_center(self, center: LatLng) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            ..self
        }
    }

    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    pub fn with_size(self, width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}
