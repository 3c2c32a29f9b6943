//! Core constants for the tracker.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// How often the position source is polled, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;

/// Minimum time the loading screen stays up, in milliseconds.
pub const DEFAULT_MINIMUM_LOADING_MS: u64 = 2_000;

/// Zoom used until the user picks one.
pub const DEFAULT_INITIAL_ZOOM: f64 = 2.0;

/// Camera centre before the first fix arrives (San Francisco).
pub const DEFAULT_FALLBACK_ORIGIN: (f64, f64) = (37.7577, -122.4376);

/// Public ISS position endpoint (NORAD id 25544).
pub const DEFAULT_ENDPOINT: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// User-Agent sent with every position request.
pub const DEFAULT_USER_AGENT: &str = "sattrack/0.1";

/// Per-request timeout, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_500;

/// Digits kept after the decimal point for dashboard coordinates.
pub const COORDINATE_DISPLAY_DECIMALS: usize = 6;
