//! Configuration for the capture-and-scan operation.

use crate::core::constants::{DEFAULT_MIN_CONFIDENCE, DEFAULT_WARMUP_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for a single capture-and-scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Spans must score strictly above this to contribute numbers.
    /// Default: 0.5
    #[serde(default = "ScanConfig::default_min_confidence")]
    pub min_confidence: f32,

    /// Milliseconds to wait between opening the device and reading the frame.
    /// Default: 1000
    #[serde(default = "ScanConfig::default_warmup_ms")]
    pub warmup_ms: u64,
}

impl ScanConfig {
    /// Create a new ScanConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum span confidence.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set the warm-up delay in milliseconds.
    pub fn with_warmup_ms(mut self, warmup_ms: u64) -> Self {
        self.warmup_ms = warmup_ms;
        self
    }

    /// The warm-up delay as a [`Duration`].
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    fn default_min_confidence() -> f32 {
        DEFAULT_MIN_CONFIDENCE
    }

    fn default_warmup_ms() -> u64 {
        DEFAULT_WARMUP_MS
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_confidence: Self::default_min_confidence(),
            warmup_ms: Self::default_warmup_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_behaviour() {
        let config = ScanConfig::default();
        assert_eq!(config.min_confidence, 0.5);
        assert_eq!(config.warmup(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"warmup_ms": 0}"#).unwrap();
        assert_eq!(config.warmup_ms, 0);
        assert_eq!(config.min_confidence, DEFAULT_MIN_CONFIDENCE);
    }
}
