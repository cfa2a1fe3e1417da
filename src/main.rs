//! Application entry point — screen-translate.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the capture backend, OCR engine, and translator from config.
//! 5. Create pipeline channels (`command`, `result`).
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] with the fullscreen selection overlay —
//!    blocks the main thread until the window is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use screen_translate::{
    app::{PipelineCommand, PipelineResult, SelectionApp},
    capture::{CaptureBackend, XcapCapture},
    config::AppConfig,
    ocr::{OcrEngine, TesseractEngine},
    pipeline::PipelineRunner,
    translate::{DeepLTranslator, Translator},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Pipeline orchestrator
// ---------------------------------------------------------------------------

/// Minimal pipeline orchestrator that runs inside the tokio runtime.
///
/// Listens for [`PipelineCommand`]s, drives one pipeline run per selection,
/// and emits [`PipelineResult`]s back to the UI.
async fn run_pipeline(
    runner: PipelineRunner,
    mut command_rx: mpsc::Receiver<PipelineCommand>,
    result_tx: mpsc::Sender<PipelineResult>,
) {
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            PipelineCommand::Translate(region) => {
                // Give the compositor a beat to drop the selection overlay
                // before grabbing pixels, or the capture shows the overlay.
                tokio::time::sleep(std::time::Duration::from_millis(150)).await;

                let records = match runner.recognize_region(region).await {
                    Ok(records) => records,
                    Err(e) => {
                        let _ = result_tx
                            .send(PipelineResult::Error {
                                message: e.to_string(),
                            })
                            .await;
                        continue;
                    }
                };

                let _ = result_tx
                    .send(PipelineResult::RecognitionComplete {
                        line_count: records.len(),
                    })
                    .await;

                let records = runner.translate_lines(records).await;
                let text = screen_translate::pipeline::reassemble(&records);

                let _ = result_tx.send(PipelineResult::Complete { text }).await;
            }
        }
    }

    log::info!("pipeline: command channel closed, orchestrator shutting down");
}

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options() -> eframe::NativeOptions {
    // Start as the fullscreen selection overlay; the app morphs the
    // viewport into a regular result window after a selection is made.
    let vp = egui::ViewportBuilder::default()
        .with_decorations(false)
        .with_transparent(true)
        .with_fullscreen(true)
        .with_always_on_top();

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("screen-translate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if config.translation.api_key.is_none() {
        log::warn!("No translation API key configured — lines will come back as errors");
    }

    // 3. Tokio runtime (2 worker threads — capture/OCR and dispatch)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Engines
    let capture: Arc<dyn CaptureBackend> = Arc::new(XcapCapture::new());
    let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::from_config(&config.ocr));
    let translator: Arc<dyn Translator> = Arc::new(DeepLTranslator::from_config(&config.translation));

    let runner = PipelineRunner::new(capture, ocr, translator, &config);

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(4);
    let (result_tx, result_rx) = mpsc::channel::<PipelineResult>(8);

    // 6. Spawn pipeline orchestrator onto the tokio runtime
    rt.spawn(run_pipeline(runner, command_rx, result_tx));

    // 7. Build the egui app and run it (blocks until the window is closed)
    let app = SelectionApp::new(command_tx, result_rx, config);

    eframe::run_native(
        "screen-translate",
        native_options(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
