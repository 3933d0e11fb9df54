//! Constants shared across the scanning and routing pipelines.

/// Recognized spans must score strictly above this to contribute numbers.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Delay between opening the camera and grabbing the frame, in milliseconds.
///
/// Many webcams deliver dark or half-exposed frames right after opening.
pub const DEFAULT_WARMUP_MS: u64 = 1_000;

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Meters in one kilometer.
pub const METERS_PER_KM: f64 = 1000.0;

/// Default number of detour candidates evaluated at the same time.
pub const DEFAULT_DETOUR_CONCURRENCY: usize = 1;

/// Default timeout for a single distance query, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
