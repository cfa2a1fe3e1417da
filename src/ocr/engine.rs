//! Core OCR engine trait.
//!
//! [`OcrEngine`] is the seam between the pipeline and whatever recognizes
//! text in pixels. It is object-safe and `Send + Sync` so it can be held
//! behind an `Arc<dyn OcrEngine>` and called from a blocking task.
//!
//! [`TesseractEngine`](crate::ocr::tesseract::TesseractEngine) is the
//! production implementation. [`MockOcrEngine`] (test-only) returns a
//! pre-configured detection set without running any recognizer.

use image::DynamicImage;
use thiserror::Error;

use crate::ocr::detection::Detection;

// ---------------------------------------------------------------------------
// OcrError
// ---------------------------------------------------------------------------

/// All errors that can arise from the OCR subsystem.
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    /// The OCR executable could not be started.
    #[error("OCR engine unavailable ({0}) — is tesseract installed?")]
    EngineUnavailable(String),

    /// The engine ran but exited with a failure status.
    #[error("OCR run failed: {0}")]
    Recognition(String),

    /// The engine's output could not be parsed.
    #[error("unreadable OCR output: {0}")]
    InvalidOutput(String),

    /// The input image could not be handed to the engine.
    #[error("cannot pass image to OCR engine: {0}")]
    ImageHandoff(String),
}

// ---------------------------------------------------------------------------
// OcrEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for OCR engines.
///
/// # Contract
///
/// - Returns one [`Detection`] per recognized text line, in no guaranteed
///   order — the pipeline normalizes ordering itself.
/// - An image containing no text yields `Ok(vec![])`, not an error.
pub trait OcrEngine: Send + Sync {
    /// Recognize all text in `image`.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError>;
}

// Compile-time assertion: Box<dyn OcrEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn OcrEngine>) {}
};

// ---------------------------------------------------------------------------
// MockOcrEngine  (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a pre-configured response without recognizing
/// anything.
#[cfg(test)]
pub struct MockOcrEngine {
    response: Result<Vec<Detection>, OcrError>,
}

#[cfg(test)]
impl MockOcrEngine {
    /// A mock that always returns `Ok(detections)`.
    pub fn ok(detections: Vec<Detection>) -> Self {
        Self {
            response: Ok(detections),
        }
    }

    /// A mock that always returns `Err(error)`.
    pub fn err(error: OcrError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::detection::Quad;

    #[test]
    fn mock_ok_returns_configured_detections() {
        let engine = MockOcrEngine::ok(vec![Detection::new(
            Quad::from_rect(0.0, 0.0, 50.0, 12.0),
            "hello",
        )]);
        let image = DynamicImage::new_rgba8(100, 100);
        let detections = engine.recognize(&image).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "hello");
    }

    #[test]
    fn mock_empty_set_is_not_an_error() {
        let engine = MockOcrEngine::ok(vec![]);
        let image = DynamicImage::new_rgba8(100, 100);
        assert!(engine.recognize(&image).unwrap().is_empty());
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let engine = MockOcrEngine::err(OcrError::Recognition("boom".into()));
        let image = DynamicImage::new_rgba8(100, 100);
        let err = engine.recognize(&image).unwrap_err();
        assert!(matches!(err, OcrError::Recognition(_)));
    }

    #[test]
    fn box_dyn_ocr_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: Box<dyn OcrEngine> = Box::new(MockOcrEngine::ok(vec![]));
        let image = DynamicImage::new_rgba8(1, 1);
        let _ = engine.recognize(&image);
    }

    #[test]
    fn ocr_error_display_mentions_tesseract_when_unavailable() {
        let e = OcrError::EngineUnavailable("No such file".into());
        assert!(e.to_string().contains("tesseract"));
    }
}
