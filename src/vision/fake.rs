//! Fake frame sources and recognizers for testing.
//!
//! These let the scan service and the HTTP layer run without a camera or
//! OCR models.

use crate::core::{CaptureError, RecognitionError};
use crate::vision::capture::{CaptureSession, FrameSource};
use crate::vision::recognition::{RecognizedSpan, TextRecognizer};
use image::RgbImage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts sessions handed out by a [`StaticFrameSource`].
#[derive(Debug, Clone, Default)]
pub struct SessionCounter {
    current: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl SessionCounter {
    /// Sessions that are open right now.
    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    /// Sessions opened since creation.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

/// A frame source that always serves the same image.
#[derive(Debug, Clone)]
pub struct StaticFrameSource {
    frame: Option<RgbImage>,
    fail_reads: bool,
    sessions: SessionCounter,
}

impl StaticFrameSource {
    /// Serve `frame` on every capture.
    pub fn new(frame: RgbImage) -> Self {
        Self {
            frame: Some(frame),
            fail_reads: false,
            sessions: SessionCounter::default(),
        }
    }

    /// Serve a black frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::new(width, height))
    }

    /// A source whose device never opens.
    pub fn unavailable() -> Self {
        Self {
            frame: None,
            fail_reads: false,
            sessions: SessionCounter::default(),
        }
    }

    /// Open successfully but fail every read.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Handle for observing how sessions are opened and released.
    pub fn open_sessions(&self) -> SessionCounter {
        self.sessions.clone()
    }
}

impl FrameSource for StaticFrameSource {
    fn open(&self) -> Result<Box<dyn CaptureSession>, CaptureError> {
        let frame = self.frame.clone().ok_or_else(|| CaptureError::Open {
            source_uri: "static".to_string(),
        })?;

        self.sessions.current.fetch_add(1, Ordering::SeqCst);
        self.sessions.total.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(StaticSession {
            frame,
            fail_reads: self.fail_reads,
            sessions: self.sessions.clone(),
        }))
    }

    fn describe(&self) -> String {
        "static frame".to_string()
    }
}

struct StaticSession {
    frame: RgbImage,
    fail_reads: bool,
    sessions: SessionCounter,
}

impl CaptureSession for StaticSession {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if self.fail_reads {
            return Err(CaptureError::Frame("static source set to fail".to_string()));
        }
        Ok(self.frame.clone())
    }
}

impl Drop for StaticSession {
    fn drop(&mut self) {
        self.sessions.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A recognizer that returns canned spans, or a canned failure.
#[derive(Debug, Clone)]
pub struct StaticRecognizer {
    response: Result<Vec<RecognizedSpan>, String>,
}

impl StaticRecognizer {
    pub fn new(spans: Vec<RecognizedSpan>) -> Self {
        Self {
            response: Ok(spans),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

impl TextRecognizer for StaticRecognizer {
    fn recognize(&self, _image: &RgbImage) -> Result<Vec<RecognizedSpan>, RecognitionError> {
        self.response
            .clone()
            .map_err(RecognitionError::Processing)
    }
}
