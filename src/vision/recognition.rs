//! Text recognition seam.
//!
//! The OCR engine is an external capability: given an image it returns a list
//! of recognized text spans with a confidence each. [`TextRecognizer`] is the
//! trait the scan service talks to; the `oar` feature provides an
//! implementation backed by the oar-ocr detection + recognition pipeline.

use crate::core::RecognitionError;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// A text fragment produced by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// The recognized text.
    pub text: String,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,
}

impl RecognizedSpan {
    /// Creates a new span.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Anything that can turn a frame into recognized text spans.
///
/// Implementations are blocking; callers are expected to run them off the
/// async executor.
pub trait TextRecognizer: Send + Sync {
    /// Recognize all text in `image`, in reading order.
    ///
    /// An empty vector means no text was found; it is not an error.
    fn recognize(&self, image: &RgbImage) -> Result<Vec<RecognizedSpan>, RecognitionError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for std::sync::Arc<T> {
    fn recognize(&self, image: &RgbImage) -> Result<Vec<RecognizedSpan>, RecognitionError> {
        (**self).recognize(image)
    }
}

#[cfg(feature = "oar")]
pub use oar_backend::{OarModelPaths, OarRecognizer};

#[cfg(feature = "oar")]
mod oar_backend {
    use super::{RecognizedSpan, TextRecognizer};
    use crate::core::RecognitionError;
    use image::RgbImage;
    use oar_ocr::oarocr::{OAROCRBuilder, OAROCR};
    use std::path::PathBuf;
    use tracing::debug;

    /// Model files needed by the oar-ocr pipeline.
    #[derive(Debug, Clone)]
    pub struct OarModelPaths {
        pub det_model: PathBuf,
        pub rec_model: PathBuf,
        pub dict_path: PathBuf,
    }

    /// Recognizer backed by oar-ocr text detection + recognition.
    pub struct OarRecognizer {
        ocr: OAROCR,
    }

    impl OarRecognizer {
        /// Build the pipeline, checking that every model file exists first.
        pub fn new(paths: &OarModelPaths) -> Result<Self, RecognitionError> {
            for (label, path) in [
                ("Detection model", &paths.det_model),
                ("Recognition model", &paths.rec_model),
                ("Dictionary file", &paths.dict_path),
            ] {
                if !path.exists() {
                    return Err(RecognitionError::Config(format!(
                        "{} not found: {}",
                        label,
                        path.display()
                    )));
                }
            }

            let ocr = OAROCRBuilder::new(&paths.det_model, &paths.rec_model, &paths.dict_path)
                .build()
                .map_err(|e| RecognitionError::Config(e.to_string()))?;

            Ok(Self { ocr })
        }
    }

    impl TextRecognizer for OarRecognizer {
        fn recognize(&self, image: &RgbImage) -> Result<Vec<RecognizedSpan>, RecognitionError> {
            let results = self
                .ocr
                .predict(vec![image.clone()])
                .map_err(|e| RecognitionError::Processing(e.to_string()))?;

            let Some(result) = results.into_iter().next() else {
                return Ok(Vec::new());
            };

            debug!(regions = result.text_regions.len(), "oar-ocr returned text regions");

            Ok(result
                .text_regions
                .iter()
                .filter_map(|region| region.text_with_confidence())
                .map(|(text, confidence)| RecognizedSpan::new(text, confidence))
                .collect())
        }
    }
}
