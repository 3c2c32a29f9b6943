//! Configuration for the tracker's timing, camera defaults and position source
//!
//! Options are grouped the same way the engine uses them. A profile resolves
//! to a full [`TrackerConfig`]; a config can also be read from JSON, where any
//! missing field falls back to its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_ENDPOINT, DEFAULT_FALLBACK_ORIGIN, DEFAULT_INITIAL_ZOOM, DEFAULT_MINIMUM_LOADING_MS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use crate::core::geo::LatLng;
use crate::{Result, TrackerError};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TrackerProfile {
    /// Three second polling, two second loading screen
    #[default]
    Standard,
    /// Faster polling for local sources or demos
    Responsive,
    Custom(TrackerConfig),
}

impl TrackerProfile {
    pub fn resolve(&self) -> TrackerConfig {
        match self {
            Self::Standard => TrackerConfig {
                polling: PollingConfig {
                    poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
                    minimum_loading_ms: DEFAULT_MINIMUM_LOADING_MS,
                },
                camera: CameraConfig::default(),
                source: SourceConfig::default(),
            },
            Self::Responsive => TrackerConfig {
                polling: PollingConfig {
                    poll_interval_ms: 1_000,
                    minimum_loading_ms: 500,
                },
                camera: CameraConfig::default(),
                source: SourceConfig {
                    request_timeout_ms: 900,
                    ..SourceConfig::default()
                },
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub polling: PollingConfig,
    pub camera: CameraConfig,
    pub source: SourceConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerProfile::default().resolve()
    }
}

impl TrackerConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.polling.poll_interval_ms == 0 {
            return Err(TrackerError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.camera.initial_zoom.is_finite() || self.camera.initial_zoom < 0.0 {
            return Err(TrackerError::Config(format!(
                "initial_zoom must be a finite, non-negative number (got {})",
                self.camera.initial_zoom
            )));
        }
        if !self.camera.fallback_origin.is_valid() {
            return Err(TrackerError::Config(format!(
                "fallback_origin is out of range: {:?}",
                self.camera.fallback_origin
            )));
        }
        if self.source.endpoint.trim().is_empty() {
            return Err(TrackerError::Config("source endpoint is empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub poll_interval_ms: u64,
    pub minimum_loading_ms: u64,
}

impl PollingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn minimum_loading(&self) -> Duration {
        Duration::from_millis(self.minimum_loading_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            minimum_loading_ms: DEFAULT_MINIMUM_LOADING_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom of the first camera; also the first persisted zoom
    pub initial_zoom: f64,
    /// Camera centre until the first position arrives
    pub fallback_origin: LatLng,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            fallback_origin: LatLng::new(DEFAULT_FALLBACK_ORIGIN.0, DEFAULT_FALLBACK_ORIGIN.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub request_timeout_ms: u64,
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
