//! Detection normalizer — reading-order reconstruction.
//!
//! OCR engines return detections in no guaranteed order. For left-to-right
//! scripts, sorting top-to-bottom then left-to-right on the top-left corner
//! is the only ordering derivable from geometry alone, and approximates the
//! intended reading order without full layout analysis.

use crate::ocr::Detection;

/// Order `detections` into reading order.
///
/// Primary key: bounding-box top-left y. Secondary key: top-left x.
/// The sort is stable, so detections that tie on both keys keep their input
/// order. An empty input yields an empty output — not an error.
pub fn reading_order(mut detections: Vec<Detection>) -> Vec<Detection> {
    detections.sort_by(|a, b| {
        let (a_tl, b_tl) = (a.bbox.top_left(), b.bbox.top_left());
        a_tl.y
            .total_cmp(&b_tl.y)
            .then(a_tl.x.total_cmp(&b_tl.x))
    });
    detections
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
