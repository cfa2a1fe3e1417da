//! Translation subsystem.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by all provider backends.
//! * [`DeepLTranslator`] — DeepL `/v2/translate` backend.
//! * [`LineDispatcher`] — concurrent per-line dispatch with isolated
//!   failure handling.
//! * [`TranslateError`] — error variants for translation calls.

pub mod deepl;
pub mod dispatcher;
pub mod translator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use deepl::DeepLTranslator;
pub use dispatcher::{LineDispatcher, TRANSLATION_ERROR_MARKER};
pub use translator::{TranslateError, Translator};
