//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TranslationConfig
// ---------------------------------------------------------------------------

/// Settings for the translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Base URL of the API endpoint.
    ///
    /// - DeepL free tier: `https://api-free.deepl.com`
    /// - DeepL paid tier: `https://api.deepl.com`
    pub base_url: String,
    /// API key — `None` leaves the auth field empty (the request will be
    /// rejected by DeepL, but the pipeline degrades to per-line error
    /// markers instead of crashing).
    pub api_key: Option<String>,
    /// Source language code sent to the API (e.g. `"EN"`).
    pub source_lang: String,
    /// Target language code sent to the API (e.g. `"ZH"`).
    pub target_lang: String,
    /// Ask the service to keep inline formatting it understands.
    pub preserve_formatting: bool,
    /// Maximum seconds to wait for one translation response.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-free.deepl.com".into(),
            api_key: None,
            source_lang: "EN".into(),
            target_lang: "ZH".into(),
            preserve_formatting: true,
            timeout_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// OcrConfig
// ---------------------------------------------------------------------------

/// Settings for the tesseract OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Executable name or path of the tesseract binary.
    pub command: String,
    /// Recognition language passed via `-l` (e.g. `"eng"`).
    pub language: String,
    /// Tesseract page segmentation mode. 6 ("assume a single uniform block
    /// of text") suits screen regions.
    pub psm: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".into(),
            language: "eng".into(),
            psm: 6,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Settings for post-OCR reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Vertical pixel distance between one line's bottom and the next line's
    /// top above which a paragraph break is inserted.
    pub line_gap_threshold: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            line_gap_threshold: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Result window appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Result window size `(width, height)` in logical points.
    pub result_window_size: (f32, f32),
    /// Keep the result window above other windows.
    pub always_on_top: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            result_window_size: (800.0, 600.0),
            always_on_top: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use screen_translate::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Translation service settings.
    pub translation: TranslationConfig,
    /// OCR engine settings.
    pub ocr: OcrConfig,
    /// Post-OCR reconstruction settings.
    pub pipeline: PipelineConfig,
    /// Result window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // TranslationConfig
        assert_eq!(original.translation.base_url, loaded.translation.base_url);
        assert_eq!(original.translation.api_key, loaded.translation.api_key);
        assert_eq!(
            original.translation.source_lang,
            loaded.translation.source_lang
        );
        assert_eq!(
            original.translation.target_lang,
            loaded.translation.target_lang
        );
        assert_eq!(
            original.translation.preserve_formatting,
            loaded.translation.preserve_formatting
        );
        assert_eq!(
            original.translation.timeout_secs,
            loaded.translation.timeout_secs
        );

        // OcrConfig
        assert_eq!(original.ocr.command, loaded.ocr.command);
        assert_eq!(original.ocr.language, loaded.ocr.language);
        assert_eq!(original.ocr.psm, loaded.ocr.psm);

        // PipelineConfig
        assert_eq!(
            original.pipeline.line_gap_threshold,
            loaded.pipeline.line_gap_threshold
        );

        // UiConfig
        assert_eq!(original.ui.result_window_size, loaded.ui.result_window_size);
        assert_eq!(original.ui.always_on_top, loaded.ui.always_on_top);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.translation.base_url, default.translation.base_url);
        assert_eq!(config.ocr.command, default.ocr.command);
        assert_eq!(
            config.pipeline.line_gap_threshold,
            default.pipeline.line_gap_threshold
        );
    }

    /// Verify default values.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.translation.base_url, "https://api-free.deepl.com");
        assert!(cfg.translation.api_key.is_none());
        assert_eq!(cfg.translation.source_lang, "EN");
        assert_eq!(cfg.translation.target_lang, "ZH");
        assert!(cfg.translation.preserve_formatting);
        assert_eq!(cfg.translation.timeout_secs, 5);
        assert_eq!(cfg.ocr.command, "tesseract");
        assert_eq!(cfg.ocr.language, "eng");
        assert_eq!(cfg.ocr.psm, 6);
        assert_eq!(cfg.pipeline.line_gap_threshold, 10.0);
        assert_eq!(cfg.ui.result_window_size, (800.0, 600.0));
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.translation.base_url = "https://api.deepl.com".into();
        cfg.translation.api_key = Some("dl-test-key".into());
        cfg.translation.source_lang = "DE".into();
        cfg.translation.target_lang = "EN".into();
        cfg.translation.timeout_secs = 15;
        cfg.ocr.language = "deu".into();
        cfg.pipeline.line_gap_threshold = 14.0;
        cfg.ui.always_on_top = true;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.translation.base_url, "https://api.deepl.com");
        assert_eq!(loaded.translation.api_key, Some("dl-test-key".into()));
        assert_eq!(loaded.translation.source_lang, "DE");
        assert_eq!(loaded.translation.target_lang, "EN");
        assert_eq!(loaded.translation.timeout_secs, 15);
        assert_eq!(loaded.ocr.language, "deu");
        assert_eq!(loaded.pipeline.line_gap_threshold, 14.0);
        assert!(loaded.ui.always_on_top);
    }
}
