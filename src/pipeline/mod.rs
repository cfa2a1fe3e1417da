//! Post-OCR reconstruction and translation pipeline.
//!
//! This module turns an unordered set of OCR detections into an ordered,
//! paragraph- and bullet-aware translated document:
//!
//! ```text
//! Vec<Detection>            (unordered, from the OCR engine)
//!        │
//!        ▼
//! reading_order()           top-to-bottom, left-to-right, stable
//!        │
//!        ▼
//! LineSegmenter::segment()  paragraph gaps + bullet/numbering markers
//!        │
//!        ▼
//! LineDispatcher::dispatch  per-line translation, failures isolated
//!        │
//!        ▼
//! reassemble()              prefix reattachment, newline join, sentinel
//! ```
//!
//! [`PipelineRunner`] composes the stages (plus capture and OCR) for one
//! region selection.

pub mod normalize;
pub mod reassemble;
pub mod runner;
pub mod segment;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use normalize::reading_order;
pub use reassemble::{reassemble, NO_TEXT_DETECTED};
pub use runner::{PipelineError, PipelineRunner};
pub use segment::{LineRecord, LineSegmenter};
