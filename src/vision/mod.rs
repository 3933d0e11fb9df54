//! Number scanning pipeline.
//!
//! A frame is pulled from a [`capture::FrameSource`], handed to a
//! [`recognition::TextRecognizer`], and the recognized spans are searched for
//! numbers by [`numbers`]. [`scan::ScanService`] ties the steps together.

pub mod capture;
pub mod fake;
pub mod numbers;
pub mod recognition;
pub mod scan;

pub use capture::{open_source, parse_device_index, CaptureSession, FrameSource, ImageFileSource};
pub use numbers::{
    classify, extract_candidates, select_number, NumberSelection, NumericCandidate, ScanOutcome,
};
pub use recognition::{RecognizedSpan, TextRecognizer};
pub use scan::{ScanService, SharedScanService};

#[cfg(feature = "opencv")]
pub use capture::OpenCvCamera;
#[cfg(feature = "oar")]
pub use recognition::{OarModelPaths, OarRecognizer};
