//! Scan service construction and response types shared between CLI and server modes.

use crate::config::{CaptureConfig, RecognizerConfig};
use gasly::core::RecognitionError;
use gasly::vision::{
    open_source, NumberSelection, ScanOutcome, ScanService, TextRecognizer,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Body returned by `POST /scan` and by `scan --output json`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanResponse {
    Found {
        success: bool,
        #[serde(flatten)]
        selection: NumberSelection,
    },
    NotFound {
        success: bool,
        message: String,
    },
    Error {
        error: String,
    },
}

impl ScanResponse {
    pub fn from_outcome(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Found(selection) => ScanResponse::Found {
                success: true,
                selection,
            },
            other => ScanResponse::NotFound {
                success: false,
                message: other.message().unwrap_or_default().to_string(),
            },
        }
    }

    pub fn error(message: String) -> Self {
        ScanResponse::Error { error: message }
    }
}

/// Build the scan service: open the frame source and load the recognizer
pub fn build_scan_service(
    config: &CaptureConfig,
) -> Result<ScanService, Box<dyn std::error::Error + Send + Sync>> {
    let source = open_source(&config.camera)?;
    info!("Frame source: {}", source.describe());

    info!("Initializing text recognizer...");
    let recognizer = build_recognizer(&config.recognizer)?;
    info!("Text recognizer initialized successfully");

    Ok(ScanService::new(
        Arc::from(source),
        recognizer,
        config.scan.clone(),
    ))
}

/// Load the text recognizer compiled into this build
#[cfg(feature = "oar")]
pub fn build_recognizer(
    config: &RecognizerConfig,
) -> Result<Arc<dyn TextRecognizer>, RecognitionError> {
    use gasly::vision::{OarModelPaths, OarRecognizer};

    let require = |path: &Option<std::path::PathBuf>, flag: &str| {
        path.clone().ok_or_else(|| {
            RecognitionError::Config(format!("missing --{} for the oar-ocr recognizer", flag))
        })
    };

    let paths = OarModelPaths {
        det_model: require(&config.det_model, "det-model")?,
        rec_model: require(&config.rec_model, "rec-model")?,
        dict_path: require(&config.dict_path, "dict-path")?,
    };

    Ok(Arc::new(OarRecognizer::new(&paths)?))
}

/// Load the text recognizer compiled into this build
#[cfg(not(feature = "oar"))]
pub fn build_recognizer(
    _config: &RecognizerConfig,
) -> Result<Arc<dyn TextRecognizer>, RecognitionError> {
    Err(RecognitionError::Config(
        "no text recognizer in this build, rebuild with `--features oar`".to_string(),
    ))
}
