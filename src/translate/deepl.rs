//! DeepL translation backend.
//!
//! [`DeepLTranslator`] POSTs form-encoded requests to the DeepL `v2`
//! endpoint. Both the free and the paid tier speak the same wire format;
//! only `base_url` differs, and that comes from [`TranslationConfig`] —
//! nothing is hardcoded.

use async_trait::async_trait;

use crate::config::TranslationConfig;
use crate::translate::translator::{TranslateError, Translator};

// ---------------------------------------------------------------------------
// DeepLTranslator
// ---------------------------------------------------------------------------

/// Calls the DeepL `/v2/translate` endpoint.
///
/// The request carries the formatting-preservation flag and XML tag handling
/// so inline markup survives translation — a passthrough contract with the
/// service, not pipeline logic.
pub struct DeepLTranslator {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl DeepLTranslator {
    /// Build a `DeepLTranslator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TranslationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    /// Translate one line of text.
    ///
    /// Exactly one attempt is made; timeouts and transport failures map to
    /// [`TranslateError`] and are handled per line by the dispatcher.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let url = format!("{}/v2/translate", self.config.base_url);

        let auth_key = self.config.api_key.as_deref().unwrap_or("");
        let preserve = if self.config.preserve_formatting {
            "1"
        } else {
            "0"
        };

        let form = [
            ("auth_key", auth_key),
            ("text", text),
            ("source_lang", source_lang),
            ("target_lang", target_lang),
            ("preserve_formatting", preserve),
            ("tag_handling", "xml"),
        ];

        let response = self.client.post(&url).form(&form).send().await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = json["translations"][0]["text"]
            .as_str()
            .ok_or(TranslateError::EmptyResponse)?
            .to_string();

        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(translated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>) -> TranslationConfig {
        TranslationConfig {
            api_key: api_key.map(|s| s.to_string()),
            ..TranslationConfig::default()
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let config = make_config(None);
        let _translator = DeepLTranslator::from_config(&config);
    }

    #[test]
    fn from_config_accepts_empty_api_key() {
        let config = make_config(Some(""));
        let _translator = DeepLTranslator::from_config(&config);
    }

    #[test]
    fn from_config_accepts_real_api_key() {
        let config = make_config(Some("dl-test-1234"));
        let _translator = DeepLTranslator::from_config(&config);
    }

    /// Verify that `DeepLTranslator` is object-safe (usable as `dyn Translator`).
    #[test]
    fn translator_is_object_safe() {
        let config = make_config(None);
        let translator: Box<dyn Translator> = Box::new(DeepLTranslator::from_config(&config));
        drop(translator);
    }
}
