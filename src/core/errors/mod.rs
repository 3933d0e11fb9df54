//! Error types for the scanning and routing pipelines.

pub mod types;

pub use types::{CaptureError, RecognitionError, RouteError, RouteResult, ScanError, ScanResult};
