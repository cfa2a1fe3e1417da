//! Core `Translator` trait and its error type.
//!
//! All provider backends implement [`Translator`]; the dispatcher only ever
//! sees `Arc<dyn Translator>`, so providers can be swapped without touching
//! segmentation or reassembly.

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during a single translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The service returned a response with no usable translated text.
    #[error("translation service returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for translation providers.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn Translator>`).
///
/// # Arguments
/// * `text`        – One line's content to translate (never empty; the
///                   dispatcher filters empty lines out).
/// * `source_lang` – Source language code (e.g. `"EN"`).
/// * `target_lang` – Target language code (e.g. `"ZH"`).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

// Compile-time assertion: Box<dyn Translator> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Translator>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_timeout() {
        assert!(TranslateError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn error_display_request_includes_cause() {
        let e = TranslateError::Request("connection refused".into());
        assert!(e.to_string().contains("connection refused"));
    }

    #[test]
    fn error_display_empty_response() {
        assert!(TranslateError::EmptyResponse.to_string().contains("empty"));
    }
}
