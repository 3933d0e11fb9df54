//! Frame sources.
//!
//! A [`FrameSource`] hands out a [`CaptureSession`] that owns the device for as
//! long as it lives. Dropping the session releases the device, so a scan that
//! fails halfway still gives the camera back.

use crate::core::CaptureError;
use image::RgbImage;
use std::path::PathBuf;
use tracing::debug;

/// An open capture device.
pub trait CaptureSession {
    /// Grab one frame from the device.
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError>;
}

/// Something that can be opened to capture frames.
pub trait FrameSource: Send + Sync {
    /// Open the device. The device stays acquired until the session is dropped.
    fn open(&self) -> Result<Box<dyn CaptureSession>, CaptureError>;

    /// Human readable description used in logs.
    fn describe(&self) -> String;
}

/// Parse a `/dev/videoX` style URI or a bare index and return the zero-based index.
pub fn parse_device_index(uri: &str) -> Option<i32> {
    if let Ok(index) = uri.parse::<i32>() {
        return Some(index);
    }
    if let Some(stripped) = uri.strip_prefix("/dev/video") {
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            return stripped.parse::<i32>().ok();
        }
    }
    None
}

/// Pick a frame source for `uri`.
///
/// Device indices and `/dev/videoN` paths open a camera (requires the `opencv`
/// feature); anything else is read as a still image on every capture.
pub fn open_source(uri: &str) -> Result<Box<dyn FrameSource>, CaptureError> {
    if parse_device_index(uri).is_some() {
        #[cfg(feature = "opencv")]
        {
            return Ok(Box::new(OpenCvCamera::new(uri)));
        }
        #[cfg(not(feature = "opencv"))]
        {
            return Err(CaptureError::BackendUnavailable("opencv"));
        }
    }

    Ok(Box::new(ImageFileSource::new(uri)))
}

/// Serves a still image from disk as if it were a camera frame.
///
/// The file is re-read on every capture so it can be swapped while the
/// service runs.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSource for ImageFileSource {
    fn open(&self) -> Result<Box<dyn CaptureSession>, CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::Open {
                source_uri: self.path.display().to_string(),
            });
        }
        Ok(Box::new(ImageFileSession {
            path: self.path.clone(),
        }))
    }

    fn describe(&self) -> String {
        format!("image file {}", self.path.display())
    }
}

struct ImageFileSession {
    path: PathBuf,
}

impl CaptureSession for ImageFileSession {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        let image = image::open(&self.path)?;
        debug!(path = %self.path.display(), "Loaded still frame");
        Ok(image.to_rgb8())
    }
}

#[cfg(feature = "opencv")]
pub use opencv_backend::OpenCvCamera;

#[cfg(feature = "opencv")]
mod opencv_backend {
    use super::{parse_device_index, CaptureSession, FrameSource};
    use crate::core::CaptureError;
    use image::RgbImage;
    use opencv::{
        core::{Mat, MatTraitConstManual},
        imgproc,
        prelude::*,
        videoio::{self, VideoCapture},
    };
    use tracing::debug;

    /// Webcam opened through OpenCV videoio.
    #[derive(Debug, Clone)]
    pub struct OpenCvCamera {
        uri: String,
    }

    impl OpenCvCamera {
        pub fn new(uri: impl Into<String>) -> Self {
            Self { uri: uri.into() }
        }

        fn open_error(&self) -> CaptureError {
            CaptureError::Open {
                source_uri: self.uri.clone(),
            }
        }
    }

    impl FrameSource for OpenCvCamera {
        fn open(&self) -> Result<Box<dyn CaptureSession>, CaptureError> {
            let cap = match parse_device_index(&self.uri) {
                Some(index) => VideoCapture::new(index, videoio::CAP_ANY),
                None => VideoCapture::from_file(&self.uri, videoio::CAP_ANY),
            }
            .map_err(|_| self.open_error())?;

            if !cap.is_opened().map_err(|_| self.open_error())? {
                return Err(self.open_error());
            }

            debug!(uri = %self.uri, "Camera opened");
            Ok(Box::new(OpenCvSession { cap }))
        }

        fn describe(&self) -> String {
            format!("camera {}", self.uri)
        }
    }

    struct OpenCvSession {
        cap: VideoCapture,
    }

    impl CaptureSession for OpenCvSession {
        fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
            let mut frame = Mat::default();
            let delivered = self
                .cap
                .read(&mut frame)
                .map_err(|e| CaptureError::Frame(e.to_string()))?;

            let size = frame
                .size()
                .map_err(|e| CaptureError::Frame(e.to_string()))?;
            if !delivered || size.width <= 0 || size.height <= 0 {
                return Err(CaptureError::Frame("device returned no frame".to_string()));
            }

            let mut rgb = Mat::default();
            imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)
                .map_err(|e| CaptureError::Frame(e.to_string()))?;

            let data = rgb
                .data_bytes()
                .map_err(|e| CaptureError::Frame(e.to_string()))?
                .to_vec();

            RgbImage::from_raw(size.width as u32, size.height as u32, data)
                .ok_or_else(|| CaptureError::Frame("frame buffer size mismatch".to_string()))
        }
    }

    impl Drop for OpenCvSession {
        fn drop(&mut self) {
            let _ = self.cap.release();
            debug!("Camera released");
        }
    }
}
