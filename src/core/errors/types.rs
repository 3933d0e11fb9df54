//! Core error types for both pipelines.
//!
//! Capture, recognition and scan errors belong to the number scanning service;
//! [`RouteError`] belongs to the detour calculator. Every variant renders a
//! message that is safe to hand back to an HTTP caller.

use thiserror::Error;

/// Errors raised while acquiring a frame from a capture device.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device could not be opened.
    #[error("Could not open webcam '{source_uri}'")]
    Open {
        /// The device index, path or URI that was requested.
        source_uri: String,
    },
    /// The device opened but did not deliver a frame.
    #[error("Failed to capture frame: {0}")]
    Frame(String),
    /// A still image could not be decoded.
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// The requested backend is not compiled into this build.
    #[error("capture backend '{0}' is not enabled in this build")]
    BackendUnavailable(&'static str),
}

/// Errors raised by a text recognizer.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The recognizer could not be constructed.
    #[error("Invalid recognizer configuration: {0}")]
    Config(String),
    /// Recognition ran but failed.
    #[error("OCR processing failed: {0}")]
    Processing(String),
}

/// Errors that abort a capture-and-scan operation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    /// The blocking worker running the scan panicked or was cancelled.
    #[error("scan worker failed: {0}")]
    Worker(String),
}

/// Errors from a distance query against a mapping provider.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The provider rejected the request as a whole (e.g. `REQUEST_DENIED`).
    #[error("distance request rejected with status {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        /// The top-level status reported by the provider.
        status: String,
        /// Optional human readable explanation.
        message: Option<String>,
    },

    /// No route exists for this origin/destination pair (e.g. `ZERO_RESULTS`).
    #[error("no route between '{origin}' and '{destination}': {status}")]
    NoRoute {
        origin: String,
        destination: String,
        status: String,
    },

    /// The response did not have the expected shape.
    #[error("malformed distance response: {0}")]
    Malformed(String),
}

/// Convenience alias for scan results.
pub type ScanResult<T> = Result<T, ScanError>;

/// Convenience alias for routing results.
pub type RouteResult<T> = Result<T, RouteError>;
