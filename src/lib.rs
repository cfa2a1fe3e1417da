//! screen-translate — select a screen region, OCR it, translate it.
//!
//! The crate is organised around one pipeline run per region selection:
//!
//! * [`capture`] — the user-selected [`Region`](capture::Region) and the
//!   screen-grab backend.
//! * [`ocr`] — detection geometry and the OCR engine seam.
//! * [`pipeline`] — reading-order normalization, line segmentation,
//!   reassembly, and the runner that composes a full run.
//! * [`translate`] — the provider seam, the DeepL backend, and per-line
//!   dispatch.
//! * [`config`] — TOML-persisted application settings.
//! * [`app`] — the egui selection overlay and result window.

pub mod app;
pub mod capture;
pub mod config;
pub mod ocr;
pub mod pipeline;
pub mod translate;
