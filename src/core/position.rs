use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;
use crate::{Result, TrackerError};

/// One reported fix of the tracked object.
///
/// Samples are never merged: a new one replaces the previous one wholesale.
/// On the wire the fields are named `latitude`, `longitude`, `timestamp`,
/// `velocity` and `altitude`; any other fields in the payload are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "timestamp")]
    pub timestamp_seconds: i64,
    #[serde(rename = "velocity")]
    pub velocity_km_s: f64,
    #[serde(rename = "altitude")]
    pub altitude_km: f64,
}

impl Position {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timestamp_seconds: i64,
        velocity_km_s: f64,
        altitude_km: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_seconds,
            velocity_km_s,
            altitude_km,
        }
    }

    pub fn coordinates(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// True once the source reports a non-zero latitude and longitude
    pub fn is_real_fix(&self) -> bool {
        self.coordinates().is_real_fix()
    }

    /// Rejects samples the engine must not apply.
    pub fn validate(&self) -> Result<()> {
        if !self.coordinates().is_valid() {
            return Err(TrackerError::MalformedSample(format!(
                "coordinates out of range: ({}, {})",
                self.latitude, self.longitude
            )));
        }
        if !self.velocity_km_s.is_finite() || !self.altitude_km.is_finite() {
            return Err(TrackerError::MalformedSample(
                "non-finite velocity or altitude".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates one sample from a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let position: Position = serde_json::from_str(payload)?;
        position.validate()?;
        Ok(position)
    }
}
