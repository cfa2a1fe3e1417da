//! Pipeline runner — drives the full capture → OCR → translate → reassemble
//! flow for one region selection.
//!
//! # Pipeline flow
//!
//! ```text
//! Region
//!   ├─ validate                                  [InvalidRegion]
//!   ├─ spawn_blocking(capture.capture_region)    [Capture error]
//!   ├─ spawn_blocking(ocr.recognize)             [Processing error]
//!   ├─ reading_order + LineSegmenter::segment    [pure]
//!   ├─ LineDispatcher::dispatch                  (per-line failures absorbed)
//!   └─ reassemble                                → final document string
//! ```
//!
//! Blocking work (display-server capture, the tesseract process) is pushed
//! onto `tokio::task::spawn_blocking` so the async runtime never stalls.
//! Failures before dispatch are fatal to the run and replace the whole
//! output; per-line translation failures never reach this level.

use std::sync::Arc;

use thiserror::Error;

use crate::capture::{CaptureBackend, Region};
use crate::config::AppConfig;
use crate::ocr::OcrEngine;
use crate::pipeline::normalize::reading_order;
use crate::pipeline::reassemble::reassemble;
use crate::pipeline::segment::{LineRecord, LineSegmenter};
use crate::translate::{LineDispatcher, Translator};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Fatal, run-level errors. Each variant's `Display` is the user-visible
/// message shown in place of the translated document.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The region has non-positive width or height.
    #[error("Invalid region selected")]
    InvalidRegion,

    /// The capture step could not produce pixel data.
    #[error("Capture error: {0}")]
    Capture(String),

    /// OCR or segmentation failed.
    #[error("Processing error: {0}")]
    Processing(String),
}

// ---------------------------------------------------------------------------
// PipelineRunner
// ---------------------------------------------------------------------------

/// Owns the engine seams and runs one region selection end to end.
///
/// Each call to [`run`](Self::run) is one independent pipeline invocation;
/// no state is shared between runs.
pub struct PipelineRunner {
    capture: Arc<dyn CaptureBackend>,
    ocr: Arc<dyn OcrEngine>,
    segmenter: LineSegmenter,
    dispatcher: LineDispatcher,
}

impl PipelineRunner {
    /// Create a runner from engine handles and application config.
    pub fn new(
        capture: Arc<dyn CaptureBackend>,
        ocr: Arc<dyn OcrEngine>,
        translator: Arc<dyn Translator>,
        config: &AppConfig,
    ) -> Self {
        Self {
            capture,
            ocr,
            segmenter: LineSegmenter::from_config(&config.pipeline),
            dispatcher: LineDispatcher::new(
                translator,
                config.translation.source_lang.clone(),
                config.translation.target_lang.clone(),
            ),
        }
    }

    /// Capture `region`, recognize its text, and segment the detections
    /// into ordered line records.
    pub async fn recognize_region(
        &self,
        region: Region,
    ) -> Result<Vec<LineRecord>, PipelineError> {
        if !region.is_valid() {
            return Err(PipelineError::InvalidRegion);
        }

        // ── 1. Capture (blocking → thread pool) ──────────────────────────
        let capture = Arc::clone(&self.capture);
        let image = tokio::task::spawn_blocking(move || capture.capture_region(&region))
            .await
            .map_err(|e| PipelineError::Capture(e.to_string()))?
            .map_err(|e| PipelineError::Capture(e.to_string()))?;

        log::debug!(
            "pipeline: captured {}x{} region",
            image.width(),
            image.height()
        );

        // ── 2. OCR (blocking → thread pool) ──────────────────────────────
        let ocr = Arc::clone(&self.ocr);
        let detections = tokio::task::spawn_blocking(move || ocr.recognize(&image))
            .await
            .map_err(|e| PipelineError::Processing(e.to_string()))?
            .map_err(|e| PipelineError::Processing(e.to_string()))?;

        log::debug!("pipeline: {} detections", detections.len());

        // ── 3. Reading order + segmentation ──────────────────────────────
        let ordered = reading_order(detections);
        Ok(self.segmenter.segment(&ordered))
    }

    /// Translate the records' contents in place (concurrently, per-line
    /// failure isolated).
    pub async fn translate_lines(&self, records: Vec<LineRecord>) -> Vec<LineRecord> {
        self.dispatcher.dispatch(records).await
    }

    /// Run the whole pipeline for one region selection.
    pub async fn run(&self, region: Region) -> Result<String, PipelineError> {
        let records = self.recognize_region(region).await?;
        let records = self.translate_lines(records).await;
        Ok(reassemble(&records))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, MockCapture};
    use crate::ocr::{Detection, MockOcrEngine, OcrError, Quad};
    use crate::pipeline::reassemble::NO_TEXT_DETECTED;
    use crate::translate::{TranslateError, TRANSLATION_ERROR_MARKER};
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Translator that returns its input unchanged.
    struct IdentityTranslator;

    #[async_trait]
    impl Translator for IdentityTranslator {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            _target_lang: &str,
        ) -> Result<String, TranslateError> {
            Ok(text.to_string())
        }
    }

    /// Translator that fails for one specific input.
    struct FailOn(String);

    #[async_trait]
    impl Translator for FailOn {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            _target_lang: &str,
        ) -> Result<String, TranslateError> {
            if text == self.0 {
                Err(TranslateError::Timeout)
            } else {
                Ok(text.to_string())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn det_at(top: f32, height: f32, text: &str) -> Detection {
        Detection::new(Quad::from_rect(0.0, top, 200.0, height), text)
    }

    fn runner_with(
        detections: Vec<Detection>,
        translator: Arc<dyn Translator>,
    ) -> PipelineRunner {
        PipelineRunner::new(
            Arc::new(MockCapture::blank(640, 480)),
            Arc::new(MockOcrEngine::ok(detections)),
            translator,
            &AppConfig::default(),
        )
    }

    fn region() -> Region {
        Region::from_corners(0, 0, 640, 480).unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn invalid_region_is_rejected_before_capture() {
        let runner = runner_with(vec![], Arc::new(IdentityTranslator));
        let bad = Region {
            left: 100,
            top: 100,
            right: 100,
            bottom: 200,
        };
        let err = runner.run(bad).await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRegion));
        assert_eq!(err.to_string(), "Invalid region selected");
    }

    #[tokio::test]
    async fn capture_failure_is_fatal_with_message() {
        let runner = PipelineRunner::new(
            Arc::new(MockCapture::err(CaptureError::Grab("display gone".into()))),
            Arc::new(MockOcrEngine::ok(vec![])),
            Arc::new(IdentityTranslator),
            &AppConfig::default(),
        );
        let err = runner.run(region()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Capture(_)));
        assert!(err.to_string().starts_with("Capture error:"));
    }

    #[tokio::test]
    async fn ocr_failure_is_a_processing_error() {
        let runner = PipelineRunner::new(
            Arc::new(MockCapture::blank(640, 480)),
            Arc::new(MockOcrEngine::err(OcrError::Recognition("bad page".into()))),
            Arc::new(IdentityTranslator),
            &AppConfig::default(),
        );
        let err = runner.run(region()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Processing(_)));
        assert!(err.to_string().starts_with("Processing error:"));
    }

    #[tokio::test]
    async fn no_detections_yields_sentinel() {
        let runner = runner_with(vec![], Arc::new(IdentityTranslator));
        let output = runner.run(region()).await.unwrap();
        assert_eq!(output, NO_TEXT_DETECTED);
    }

    /// Numbered-list markers survive the whole pipeline verbatim.
    #[tokio::test]
    async fn numbered_list_round_trips_with_identity_translation() {
        let runner = runner_with(
            vec![
                det_at(0.0, 12.0, "1. First item"),
                det_at(14.0, 12.0, "2. Second item"),
            ],
            Arc::new(IdentityTranslator),
        );
        let output = runner.run(region()).await.unwrap();
        assert_eq!(output, "1. First item\n2. Second item");
    }

    /// Detections arrive unordered; the output follows reading order.
    #[tokio::test]
    async fn unordered_detections_come_out_in_reading_order() {
        let runner = runner_with(
            vec![det_at(30.0, 12.0, "below"), det_at(0.0, 12.0, "above")],
            Arc::new(IdentityTranslator),
        );
        let output = runner.run(region()).await.unwrap();
        assert_eq!(output, "above\nbelow");
    }

    /// A paragraph gap in the geometry becomes a blank output line.
    #[tokio::test]
    async fn wide_gap_becomes_blank_line() {
        let runner = runner_with(
            vec![
                det_at(0.0, 12.0, "first paragraph"),
                det_at(40.0, 12.0, "second paragraph"),
            ],
            Arc::new(IdentityTranslator),
        );
        let output = runner.run(region()).await.unwrap();
        assert_eq!(output, "first paragraph\n\nsecond paragraph");
    }

    /// One failing line gets the error marker; its neighbours are intact
    /// and in order.
    #[tokio::test]
    async fn translation_failure_marks_only_that_line() {
        let runner = runner_with(
            vec![
                det_at(0.0, 12.0, "keep me"),
                det_at(14.0, 12.0, "drop me"),
                det_at(28.0, 12.0, "keep me too"),
            ],
            Arc::new(FailOn("drop me".into())),
        );
        let output = runner.run(region()).await.unwrap();
        assert_eq!(
            output,
            format!("keep me\n{TRANSLATION_ERROR_MARKER}\nkeep me too")
        );
    }

    /// A bullet-only detection is never translated but still shows up.
    #[tokio::test]
    async fn bare_bullet_appears_alone_in_output() {
        let runner = runner_with(
            vec![det_at(0.0, 12.0, "• "), det_at(14.0, 12.0, "text")],
            Arc::new(FailOn("•".into())), // would fail if the bullet were dispatched
        );
        let output = runner.run(region()).await.unwrap();
        assert_eq!(output, "•\ntext");
    }
}
