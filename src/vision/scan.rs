//! Capture-and-scan orchestration.

use crate::core::{ScanConfig, ScanError, ScanResult};
use crate::vision::capture::FrameSource;
use crate::vision::numbers::{classify, ScanOutcome};
use crate::vision::recognition::TextRecognizer;
use image::RgbImage;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

/// Captures a frame, recognizes its text and picks the most confident number.
pub struct ScanService {
    source: Arc<dyn FrameSource>,
    recognizer: Arc<dyn TextRecognizer>,
    config: ScanConfig,
    /// Held while the device is open so concurrent scans queue up.
    device: Mutex<()>,
}

/// Thread-safe scan service wrapped in Arc
pub type SharedScanService = Arc<ScanService>;

impl ScanService {
    pub fn new(
        source: Arc<dyn FrameSource>,
        recognizer: Arc<dyn TextRecognizer>,
        config: ScanConfig,
    ) -> Self {
        Self {
            source,
            recognizer,
            config,
            device: Mutex::new(()),
        }
    }

    /// Run one capture-and-scan. Blocks for the warm-up delay and for OCR.
    pub fn scan(&self) -> ScanResult<ScanOutcome> {
        let frame = self.capture_frame()?;

        info!(
            width = frame.width(),
            height = frame.height(),
            "Frame captured, performing OCR..."
        );
        let ocr_start = Instant::now();
        let spans = self.recognizer.recognize(&frame)?;
        debug!(
            spans = spans.len(),
            ocr_ms = ocr_start.elapsed().as_secs_f64() * 1000.0,
            "Recognition finished"
        );

        Ok(classify(&spans, self.config.min_confidence))
    }

    /// Run [`ScanService::scan`] on the blocking thread pool.
    pub async fn scan_blocking(self: Arc<Self>) -> ScanResult<ScanOutcome> {
        tokio::task::spawn_blocking(move || self.scan())
            .await
            .map_err(|e| ScanError::Worker(e.to_string()))?
    }

    /// Open the device, wait for it to settle, grab one frame and release it.
    fn capture_frame(&self) -> ScanResult<RgbImage> {
        let _device = self.device.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut session = self.source.open()?;
        debug!(source = %self.source.describe(), "Capture device opened");

        if self.config.warmup_ms > 0 {
            info!("Waiting {} ms before capture...", self.config.warmup_ms);
            std::thread::sleep(self.config.warmup());
        }

        Ok(session.read_frame()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CaptureError, RecognitionError};
    use crate::vision::fake::{StaticFrameSource, StaticRecognizer};
    use crate::vision::recognition::RecognizedSpan;

    fn service(source: StaticFrameSource, recognizer: StaticRecognizer) -> ScanService {
        ScanService::new(
            Arc::new(source),
            Arc::new(recognizer),
            ScanConfig::new().with_warmup_ms(0),
        )
    }

    #[test]
    fn test_scan_selects_number_and_releases_device() {
        let source = StaticFrameSource::blank(8, 8);
        let sessions = source.open_sessions();
        let recognizer = StaticRecognizer::new(vec![
            RecognizedSpan::new("A12", 0.6),
            RecognizedSpan::new("B7", 0.9),
        ]);

        let outcome = service(source, recognizer).scan().unwrap();
        match outcome {
            ScanOutcome::Found(selection) => {
                assert_eq!(selection.number, "7");
                assert_eq!(selection.all_numbers.len(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(sessions.current(), 0);
        assert_eq!(sessions.total(), 1);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let scan = service(StaticFrameSource::unavailable(), StaticRecognizer::new(vec![]));
        let err = scan.scan().unwrap_err();
        assert!(matches!(err, ScanError::Capture(CaptureError::Open { .. })));
        assert_eq!(err.to_string(), "Could not open webcam 'static'");
    }

    #[test]
    fn test_frame_failure_still_releases_device() {
        let source = StaticFrameSource::blank(8, 8).failing_reads();
        let sessions = source.open_sessions();

        let err = service(source, StaticRecognizer::new(vec![]))
            .scan()
            .unwrap_err();
        assert!(matches!(err, ScanError::Capture(CaptureError::Frame(_))));
        assert_eq!(sessions.current(), 0);
        assert_eq!(sessions.total(), 1);
    }

    #[test]
    fn test_recognition_failure_is_reported() {
        let scan = service(
            StaticFrameSource::blank(8, 8),
            StaticRecognizer::failing("model crashed"),
        );
        let err = scan.scan().unwrap_err();
        assert!(matches!(
            err,
            ScanError::Recognition(RecognitionError::Processing(_))
        ));
    }

    #[test]
    fn test_empty_recognition_means_no_text() {
        let scan = service(StaticFrameSource::blank(8, 8), StaticRecognizer::new(vec![]));
        assert_eq!(scan.scan().unwrap(), ScanOutcome::NoText);
    }

    #[tokio::test]
    async fn test_scan_blocking_runs_off_executor() {
        let scan = Arc::new(service(
            StaticFrameSource::blank(8, 8),
            StaticRecognizer::new(vec![RecognizedSpan::new("no digits", 0.99)]),
        ));
        assert_eq!(scan.scan_blocking().await.unwrap(), ScanOutcome::NoNumbers);
    }
}
