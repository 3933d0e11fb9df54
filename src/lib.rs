//! # gasly
//!
//! Two small pipelines around external capabilities:
//!
//! * [`vision`] - capture one webcam frame, run OCR on it and report the most
//!   confident number found in the recognized text.
//! * [`routing`] - rank candidate waypoints by how much distance and time they
//!   add to a direct route, using a mapping distance API.
//!
//! OCR, frame capture and distance measurement sit behind traits
//! ([`vision::TextRecognizer`], [`vision::FrameSource`],
//! [`routing::DistanceProvider`]) so the glue logic runs without devices,
//! models or network access.

pub mod core;
pub mod routing;
pub mod utils;
pub mod vision;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CaptureError, DetourConfig, RecognitionError, RouteError, ScanConfig, ScanError,
    };
    pub use crate::routing::{
        DetourCalculator, DetourResult, DistanceProvider, DistanceUnit, FuelAdvisor,
        FuelDecision, GoogleDistanceMatrix, Location, Measurement, TravelMode,
    };
    pub use crate::vision::{
        FrameSource, NumberSelection, NumericCandidate, RecognizedSpan, ScanOutcome, ScanService,
        TextRecognizer,
    };
}
