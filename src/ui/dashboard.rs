use serde::{Deserialize, Serialize};

use crate::core::constants::COORDINATE_DISPLAY_DECIMALS;
use crate::core::position::Position;

/// Display strings for the dashboard sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReadout {
    pub latitude: String,
    pub longitude: String,
    pub velocity: String,
    pub altitude: String,
}

impl DashboardReadout {
    pub fn from_position(position: &Position) -> Self {
        Self {
            latitude: truncate_coordinate(position.latitude),
            longitude: truncate_coordinate(position.longitude),
            velocity: format!("{} km/s", round_half_up(position.velocity_km_s)),
            altitude: format!("{} km", round_half_up(position.altitude_km)),
        }
    }

    /// `(label, value)` rows in display order
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Latitude", self.latitude.as_str()),
            ("Longitude", self.longitude.as_str()),
            ("Velocity", self.velocity.as_str()),
            ("Altitude", self.altitude.as_str()),
        ]
    }
}

/// Shortest decimal text of `value`, cut (not rounded) after six fractional digits.
pub fn truncate_coordinate(value: f64) -> String {
    let text = value.to_string();
    match text.find('.') {
        Some(dot) => {
            let end = (dot + 1 + COORDINATE_DISPLAY_DECIMALS).min(text.len());
            text[..end].to_string()
        }
        None => text,
    }
}

/// Nearest integer with ties going up, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.0}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_for_london_pass() {
        let position = Position::new(51.5, -0.12, 1_700_000_000, 7.66, 408.0);
        let readout = DashboardReadout::from_position(&position);
        assert_eq!(readout.latitude, "51.5");
        assert_eq!(readout.longitude, "-0.12");
        assert_eq!(readout.velocity, "8 km/s");
        assert_eq!(readout.altitude, "408 km");
    }

    #[test]
    fn test_coordinates_are_truncated_not_rounded() {
        assert_eq!(truncate_coordinate(12.3456789), "12.345678");
        assert_eq!(truncate_coordinate(-0.123456789), "-0.123456");
        assert_eq!(truncate_coordinate(-122.4376), "-122.4376");
        assert_eq!(truncate_coordinate(45.0), "45");
        assert_eq!(truncate_coordinate(0.9999999), "0.999999");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_half_up(7.66), "8");
        assert_eq!(round_half_up(408.0), "408");
        assert_eq!(round_half_up(408.49), "408");
        assert_eq!(round_half_up(2.5), "3");
        assert_eq!(round_half_up(-2.5), "-2");
        assert_eq!(round_half_up(-0.2), "0");
        assert_eq!(round_half_up(27600.4), "27600");
    }

    #[test]
    fn test_rows_order() {
        let readout = DashboardReadout::from_position(&Position::new(1.0, 2.0, 0, 3.0, 4.0));
        let labels: Vec<_> = readout.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Latitude", "Longitude", "Velocity", "Altitude"]);
    }
}
