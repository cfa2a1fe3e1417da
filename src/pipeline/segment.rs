//! Structural segmenter — lines, paragraph gaps, and bullet markers.
//!
//! Turns the ordered detection sequence into [`LineRecord`]s:
//!
//! * A vertical gap between one line's bottom and the next line's top above
//!   the configured threshold marks a paragraph boundary; the reassembler
//!   renders it as a blank output line.
//! * A leading bullet glyph (`•`, `-`, `*`, `›`, `»`) or numbering token
//!   (`1.`, `2)`, …) is split off into `prefix` so only the remaining
//!   content is sent to translation. Translation services tend to mangle
//!   bare markers, and re-sending them is wasted quota; the marker is
//!   reattached verbatim after translation.

use regex::Regex;

use crate::config::PipelineConfig;
use crate::ocr::Detection;

/// Leading bullet glyphs or `digits.`/`digits)` numbering, with optional
/// surrounding whitespace. Capture 1 is the marker, capture 2 the remainder.
const MARKER_PATTERN: &str = r"^(\s*[•\-\*›»]|\s*\d+[\.\)]\s*)(.*)";

// ---------------------------------------------------------------------------
// LineRecord
// ---------------------------------------------------------------------------

/// One output line derived from one detection.
///
/// Created here; `content` is later replaced by the dispatcher with its
/// translated form (or an error marker); consumed by the reassembler.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// Bullet/numbering marker stripped of whitespace (`"•"`, `"1."`), or
    /// empty. Reattached in front of the translated content on output.
    pub prefix: String,
    /// The translatable remainder. Empty content is never dispatched.
    pub content: String,
    /// A paragraph gap was detected between this line and the previous one.
    pub preceded_by_blank_line: bool,
    /// Top edge of the detection, in capture pixels. Segmentation-internal.
    pub top: f32,
    /// Bottom edge of the detection, in capture pixels. Segmentation-internal.
    pub bottom: f32,
}

// ---------------------------------------------------------------------------
// LineSegmenter
// ---------------------------------------------------------------------------

/// Groups ordered detections into line records.
///
/// Holds the compiled marker pattern and the paragraph-gap threshold; both
/// heuristics are tuned to typical OCR output scale and configurable via
/// [`PipelineConfig`].
pub struct LineSegmenter {
    marker: Regex,
    line_gap_threshold: f32,
}

impl LineSegmenter {
    /// Build a segmenter from application config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.line_gap_threshold)
    }

    /// Build a segmenter with an explicit gap threshold in pixels.
    pub fn new(line_gap_threshold: f32) -> Self {
        // The pattern is a fixed literal; compilation cannot fail.
        let marker = Regex::new(MARKER_PATTERN).expect("marker pattern is valid");
        Self {
            marker,
            line_gap_threshold,
        }
    }

    /// Segment an ordered detection sequence into line records.
    ///
    /// Must be called with the output of
    /// [`reading_order`](crate::pipeline::normalize::reading_order); gap
    /// detection compares each line's top against the previous line's
    /// bottom, which is only meaningful in reading order.
    pub fn segment(&self, detections: &[Detection]) -> Vec<LineRecord> {
        let mut records = Vec::with_capacity(detections.len());
        let mut previous_bottom = 0.0_f32;

        for (i, detection) in detections.iter().enumerate() {
            let current_top = detection.bbox.top_left().y;

            let preceded_by_blank_line =
                i > 0 && (current_top - previous_bottom) > self.line_gap_threshold;

            let (prefix, content) = self.split_marker(&detection.text);

            let bottom = detection.bbox.bottom_left().y;
            records.push(LineRecord {
                prefix,
                content,
                preceded_by_blank_line,
                top: current_top,
                bottom,
            });

            previous_bottom = bottom;
        }

        records
    }

    /// Split `text` into `(marker, content)`, both whitespace-trimmed.
    /// Without a marker match the whole text becomes content.
    fn split_marker(&self, text: &str) -> (String, String) {
        if let Some(caps) = self.marker.captures(text) {
            let prefix = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let content = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            (prefix, content)
        } else {
            (String::new(), text.to_string())
        }
    }
}

impl Default for LineSegmenter {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
