//! Configuration types for the server and CLI.

use gasly::core::{DetourConfig, ScanConfig};
use gasly::routing::{DistanceUnit, FuelAdvisor, Location, TravelMode};
use std::path::PathBuf;
use std::time::Duration;

/// Model files for the text recognizer
#[derive(Clone, Debug, Default)]
pub struct RecognizerConfig {
    pub det_model: Option<PathBuf>,
    pub rec_model: Option<PathBuf>,
    pub dict_path: Option<PathBuf>,
}

/// Configuration for capture-and-scan
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Device index, `/dev/videoN`, or path to a still image
    pub camera: String,
    pub scan: ScanConfig,
    pub recognizer: RecognizerConfig,
}

/// Configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub capture: CaptureConfig,
    pub host: String,
    pub port: u16,
}

/// Configuration for a detour ranking run
#[derive(Clone, Debug)]
pub struct DetourRunConfig {
    pub api_key: String,
    pub start: Location,
    pub end: Location,
    pub sites: Vec<Location>,
    pub mode: TravelMode,
    pub detour: DetourConfig,
    pub unit: DistanceUnit,
    pub timeout: Duration,
    pub fuel: Option<FuelAdvisor>,
}
