//! Tesseract CLI engine.
//!
//! Runs the `tesseract` executable in TSV mode over a scratch PNG and turns
//! its word boxes into line-level [`Detection`]s. Word rows (level 5) are
//! grouped by their (page, block, paragraph, line) key; each group becomes
//! one detection whose quad is the union of its word boxes.
//!
//! Using the CLI keeps the engine a true black box: any tesseract install
//! works, and swapping in a different producer only means implementing
//! [`OcrEngine`] elsewhere.

use std::process::Command;

use image::DynamicImage;

use crate::config::OcrConfig;
use crate::ocr::detection::{Detection, Quad};
use crate::ocr::engine::{OcrEngine, OcrError};

// ---------------------------------------------------------------------------
// TesseractEngine
// ---------------------------------------------------------------------------

/// Production OCR engine that shells out to the tesseract CLI.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    language: String,
    psm: u8,
}

impl TesseractEngine {
    /// Build an engine from application config.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            psm: config.psm,
        }
    }

    pub fn new(command: impl Into<String>, language: impl Into<String>, psm: u8) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            psm,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
        // Tesseract reads from a file, so round-trip the capture through a
        // scratch PNG that disappears with the tempdir.
        let dir = tempfile::tempdir().map_err(|e| OcrError::ImageHandoff(e.to_string()))?;
        let png_path = dir.path().join("capture.png");
        image
            .save(&png_path)
            .map_err(|e| OcrError::ImageHandoff(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(&png_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| OcrError::EngineUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        parse_tsv(&String::from_utf8_lossy(&output.stdout))
    }
}

// ---------------------------------------------------------------------------
// TSV parsing
// ---------------------------------------------------------------------------

/// One level-5 (word) row of tesseract TSV output.
struct WordBox {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    text: String,
}

/// Parse tesseract TSV output into line-level detections.
///
/// Word rows are grouped by (page, block, paragraph, line); rows of other
/// levels and rows that fail to parse are skipped. A group whose words are
/// all empty is dropped entirely.
pub fn parse_tsv(tsv: &str) -> Result<Vec<Detection>, OcrError> {
    let mut lines = tsv.lines();

    match lines.next() {
        Some(header) if header.starts_with("level") => {}
        _ => {
            return Err(OcrError::InvalidOutput(
                "missing TSV header row".into(),
            ))
        }
    }

    let mut detections = Vec::new();
    let mut current_key: Option<(u32, u32, u32, u32)> = None;
    let mut current_words: Vec<WordBox> = Vec::new();

    for row in lines {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }

        let level: u32 = match cols[0].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if level != 5 {
            continue;
        }

        let key = match (
            cols[1].parse::<u32>(),
            cols[2].parse::<u32>(),
            cols[3].parse::<u32>(),
            cols[4].parse::<u32>(),
        ) {
            (Ok(page), Ok(block), Ok(par), Ok(line)) => (page, block, par, line),
            _ => continue,
        };

        let geometry = match (
            cols[6].parse::<f32>(),
            cols[7].parse::<f32>(),
            cols[8].parse::<f32>(),
            cols[9].parse::<f32>(),
        ) {
            (Ok(left), Ok(top), Ok(width), Ok(height)) => (left, top, width, height),
            _ => continue,
        };

        // The text column may itself contain tabs in pathological cases;
        // everything past column 10 belongs to the word.
        let text = cols[11..].join("\t").trim().to_string();

        if current_key != Some(key) {
            flush_line(&mut detections, &mut current_words);
            current_key = Some(key);
        }

        current_words.push(WordBox {
            left: geometry.0,
            top: geometry.1,
            width: geometry.2,
            height: geometry.3,
            text,
        });
    }

    flush_line(&mut detections, &mut current_words);
    Ok(detections)
}

/// Collapse the accumulated word boxes into one line detection.
fn flush_line(detections: &mut Vec<Detection>, words: &mut Vec<WordBox>) {
    if words.is_empty() {
        return;
    }

    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        words.clear();
        return;
    }

    let mut left = f32::MAX;
    let mut top = f32::MAX;
    let mut right = f32::MIN;
    let mut bottom = f32::MIN;

    for w in words.iter() {
        left = left.min(w.left);
        top = top.min(w.top);
        right = right.max(w.left + w.width);
        bottom = bottom.max(w.top + w.height);
    }

    detections.push(Detection::new(
        Quad::from_rect(left, top, right - left, bottom - top),
        text,
    ));
    words.clear();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
