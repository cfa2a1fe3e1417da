//! Per-line translation dispatch.
//!
//! [`LineDispatcher`] sends each line's content to the provider in its own
//! tokio task, so lines translate concurrently while the final document
//! order stays tied to each record's original index. A failure on one line
//! — transport error, timeout, bad response, even a panicking task — is
//! converted into [`TRANSLATION_ERROR_MARKER`] for that line only and never
//! aborts the rest of the run.

use std::sync::Arc;

use crate::pipeline::segment::LineRecord;
use crate::translate::translator::Translator;

/// Fixed marker substituted for a line whose translation failed.
pub const TRANSLATION_ERROR_MARKER: &str = "[Translation Error]";

// ---------------------------------------------------------------------------
// LineDispatcher
// ---------------------------------------------------------------------------

/// Dispatches line contents to a [`Translator`] and writes the results back
/// into the records.
pub struct LineDispatcher {
    translator: Arc<dyn Translator>,
    source_lang: String,
    target_lang: String,
}

impl LineDispatcher {
    pub fn new(
        translator: Arc<dyn Translator>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    /// Translate every record with non-empty content, in parallel.
    ///
    /// Records with empty content pass through untouched (a bare bullet
    /// still has to appear in the output, but there is nothing to send).
    /// Each line gets at most one attempt; on any failure its content
    /// becomes [`TRANSLATION_ERROR_MARKER`].
    pub async fn dispatch(&self, mut records: Vec<LineRecord>) -> Vec<LineRecord> {
        let mut handles = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if record.content.is_empty() {
                continue;
            }

            let translator = Arc::clone(&self.translator);
            let content = record.content.clone();
            let source = self.source_lang.clone();
            let target = self.target_lang.clone();

            handles.push((
                index,
                tokio::spawn(async move {
                    translator.translate(&content, &source, &target).await
                }),
            ));
        }

        for (index, handle) in handles {
            let translated = match handle.await {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    log::warn!("translation failed for line {index}: {e}");
                    TRANSLATION_ERROR_MARKER.to_string()
                }
                Err(e) => {
                    log::warn!("translation task for line {index} did not complete: {e}");
                    TRANSLATION_ERROR_MARKER.to_string()
                }
            };
            records[index].content = translated;
        }

        records
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
