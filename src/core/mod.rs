//! The core module shared by both pipelines.
//!
//! This module contains:
//! - Configuration types for scanning and detour ranking
//! - Constants used throughout the crate
//! - Error handling
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;

pub use config::{DetourConfig, ScanConfig};
pub use constants::*;
pub use errors::{CaptureError, RecognitionError, RouteError, RouteResult, ScanError, ScanResult};
