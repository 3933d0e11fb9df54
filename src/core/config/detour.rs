//! Configuration for detour ranking.

use crate::core::constants::DEFAULT_DETOUR_CONCURRENCY;
use serde::{Deserialize, Serialize};

/// How candidate waypoints are evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetourConfig {
    /// Number of candidate sites evaluated at the same time.
    /// 1 keeps the queries strictly sequential.
    /// Default: 1
    #[serde(default = "DetourConfig::default_concurrency")]
    pub concurrency: usize,
}

impl DetourConfig {
    /// Create a new DetourConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate concurrency. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    fn default_concurrency() -> usize {
        DEFAULT_DETOUR_CONCURRENCY
    }
}

impl Default for DetourConfig {
    fn default() -> Self {
        Self {
            concurrency: Self::default_concurrency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(DetourConfig::new().concurrency, 1);
        let parsed: DetourConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.concurrency, 1);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        assert_eq!(DetourConfig::new().with_concurrency(0).concurrency, 1);
        assert_eq!(DetourConfig::new().with_concurrency(4).concurrency, 4);
    }
}
