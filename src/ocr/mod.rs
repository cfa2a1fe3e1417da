//! OCR subsystem.
//!
//! This module provides:
//! * [`Detection`] / [`Quad`] / [`Point`] — the geometry the OCR producer
//!   hands to the pipeline.
//! * [`OcrEngine`] — object-safe trait implemented by all engines.
//! * [`TesseractEngine`] — production engine driving the tesseract CLI.
//! * [`OcrError`] — error variants for OCR operations.

pub mod detection;
pub mod engine;
pub mod tesseract;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use detection::{Detection, Point, Quad};
pub use engine::{OcrEngine, OcrError};
pub use tesseract::TesseractEngine;

#[cfg(test)]
pub use engine::MockOcrEngine;
