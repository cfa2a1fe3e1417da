//! Selection overlay and result window — egui/eframe application.
//!
//! # Architecture
//!
//! [`SelectionApp`] is the top-level [`eframe::App`]. It owns the UI state
//! and two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the pipeline orchestrator.
//! * `result_rx`  — receives [`PipelineResult`] from the orchestrator.
//!
//! The window starts as a fullscreen, transparent, borderless overlay where
//! the user drags a rubber-band rectangle. On release the viewport morphs
//! into a regular result window that shows pipeline progress and finally the
//! translated document.
//!
//! # Phases
//!
//! | Phase | Visual |
//! |-------|--------|
//! | `Selecting` | Dimmed screen + rubber band, Esc quits |
//! | `Recognizing` | Spinner + "Reading text..." |
//! | `Translating` | Spinner + "Translating N lines..." |
//! | `Result` | Scrollable translated text, copy button |
//! | `Error` | Error message, new-selection button |

use eframe::egui;
use tokio::sync::mpsc;

use crate::capture::Region;
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Pipeline message types
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the pipeline orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Run the full pipeline over the selected region.
    Translate(Region),
}

/// Results / progress events delivered from the pipeline to the UI.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    /// Capture + OCR + segmentation finished; translation is starting.
    RecognitionComplete { line_count: usize },
    /// The translated document is ready.
    Complete { text: String },
    /// A fatal pipeline error; `message` replaces the document.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// AppPhase — UI-side state machine
// ---------------------------------------------------------------------------

/// Current phase of a translation run, as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum AppPhase {
    /// The overlay is up; waiting for the user to drag a region.
    Selecting,
    /// Capture and OCR are running.
    Recognizing,
    /// Per-line translation is in flight.
    Translating,
    /// The final document is being displayed.
    Result,
    /// A fatal error occurred.
    Error,
}

// ---------------------------------------------------------------------------
// SelectionApp
// ---------------------------------------------------------------------------

/// eframe application — region selection overlay plus result window.
pub struct SelectionApp {
    /// Current logical phase.
    phase: AppPhase,
    /// Where the current rubber-band drag started (overlay coordinates).
    drag_start: Option<egui::Pos2>,
    /// Number of lines being translated, for the progress label.
    line_count: usize,
    /// Final document text shown in the Result phase.
    result_text: String,
    /// Human-readable message for the Error phase.
    error_message: String,
    /// Spinner animation phase (increases each frame).
    spinner_phase: f32,
    /// True once the viewport has been switched to the result-window shape.
    result_viewport_applied: bool,

    /// Send commands to the background pipeline orchestrator.
    command_tx: mpsc::Sender<PipelineCommand>,
    /// Receive results / progress from the background pipeline orchestrator.
    result_rx: mpsc::Receiver<PipelineResult>,

    /// Application configuration (read-only after startup).
    config: AppConfig,
}

impl SelectionApp {
    /// Create a new [`SelectionApp`] in the `Selecting` phase.
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        result_rx: mpsc::Receiver<PipelineResult>,
        config: AppConfig,
    ) -> Self {
        Self {
            phase: AppPhase::Selecting,
            drag_start: None,
            line_count: 0,
            result_text: String::new(),
            error_message: String::new(),
            spinner_phase: 0.0,
            result_viewport_applied: false,
            command_tx,
            result_rx,
            config,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline results (non-blocking).
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                PipelineResult::RecognitionComplete { line_count } => {
                    self.line_count = line_count;
                    self.phase = AppPhase::Translating;
                }
                PipelineResult::Complete { text } => {
                    self.result_text = text;
                    self.phase = AppPhase::Result;
                }
                PipelineResult::Error { message } => {
                    self.error_message = message;
                    self.phase = AppPhase::Error;
                }
            }
        }
    }

    // ── Viewport shapes ──────────────────────────────────────────────────

    /// Fullscreen transparent overlay for region selection.
    fn apply_overlay_viewport(&mut self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        self.result_viewport_applied = false;
    }

    /// Regular window for progress and results.
    fn apply_result_viewport(&mut self, ctx: &egui::Context) {
        if self.result_viewport_applied {
            return;
        }
        let (w, h) = self.config.ui.result_window_size;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(w, h)));
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
            100.0, 100.0,
        )));
        self.result_viewport_applied = true;
    }

    // ── Selection overlay ────────────────────────────────────────────────

    /// Handle the rubber-band drag and fire the pipeline on release.
    fn update_selection(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let (press_origin, latest_pos, released) = ctx.input(|i| {
            (
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
                i.pointer.any_released(),
            )
        });

        if let Some(origin) = press_origin {
            self.drag_start = Some(origin);
        }

        if released {
            if let (Some(start), Some(end)) = (self.drag_start.take(), latest_pos) {
                // Overlay points → physical screen pixels.
                let ppp = ctx.pixels_per_point();
                let region = Region::from_corners(
                    (start.x * ppp).round() as i32,
                    (start.y * ppp).round() as i32,
                    (end.x * ppp).round() as i32,
                    (end.y * ppp).round() as i32,
                );

                match region {
                    Some(region) => {
                        log::info!(
                            "selection: {}x{} at ({}, {})",
                            region.width(),
                            region.height(),
                            region.left,
                            region.top
                        );
                        self.phase = AppPhase::Recognizing;
                        self.apply_result_viewport(ctx);
                        let _ = self.command_tx.try_send(PipelineCommand::Translate(region));
                    }
                    None => {
                        // Sub-tolerance drag — no selection, keep the overlay up.
                        log::debug!("selection below tolerance, ignoring");
                    }
                }
            }
        }
    }

    /// Draw the dimmed backdrop and the rubber-band rectangle.
    fn draw_overlay(&self, ctx: &egui::Context) {
        let frame = egui::Frame::new().fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 80));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            if let (Some(start), Some(current)) =
                (self.drag_start, ctx.input(|i| i.pointer.latest_pos()))
            {
                let band = egui::Rect::from_two_pos(start, current);
                let painter = ui.painter();
                painter.rect_filled(
                    band,
                    0.0,
                    egui::Color32::from_rgba_premultiplied(70, 130, 220, 40),
                );
                painter.rect_stroke(
                    band,
                    0.0,
                    egui::Stroke::new(1.5, egui::Color32::from_rgb(110, 170, 255)),
                    egui::StrokeKind::Outside,
                );
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Drag to select a text region — Esc to quit")
                            .color(egui::Color32::from_rgb(230, 230, 230))
                            .size(16.0),
                    );
                });
            }
        });
    }

    // ── Result window panels ─────────────────────────────────────────────

    /// Render the Recognizing / Translating progress panel.
    fn draw_progress(&self, ui: &mut egui::Ui) {
        let label = match self.phase {
            AppPhase::Recognizing => "Reading text...".to_string(),
            _ => format!("Translating {} lines...", self.line_count),
        };
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new(format!("{} {label}", self.spinner_char()))
                    .color(egui::Color32::from_rgb(68, 136, 255))
                    .size(15.0),
            );
        });
    }

    /// Render the Result phase panel: scrollable text + action buttons.
    fn draw_result(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.button("Copy").clicked() {
                ctx.copy_text(self.result_text.clone());
            }
            if ui.button("New selection").clicked() {
                self.reset_to_selection(ctx);
            }
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut self.result_text.as_str())
                    .desired_width(f32::INFINITY)
                    .desired_rows(24),
            );
        });
    }

    /// Render the Error phase panel.
    fn draw_error(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(self.error_message.as_str())
                .color(egui::Color32::from_rgb(255, 136, 68))
                .size(14.0),
        );

        ui.add_space(8.0);
        if ui.button("New selection").clicked() {
            self.reset_to_selection(ctx);
        }
    }

    /// Clear transient state and bring the overlay back up.
    fn reset_to_selection(&mut self, ctx: &egui::Context) {
        self.phase = AppPhase::Selecting;
        self.drag_start = None;
        self.line_count = 0;
        self.result_text.clear();
        self.error_message.clear();
        self.apply_overlay_viewport(ctx);
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// A simple rotating ASCII spinner character driven by `spinner_phase`.
    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for SelectionApp {
    /// Clear to transparent so the overlay shows the screen beneath it.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    /// Called every frame by eframe. Polls channels, advances the spinner,
    /// then renders the current phase.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        self.spinner_phase += 0.08;
        if self.spinner_phase >= 4.0 {
            self.spinner_phase = 0.0;
        }

        match self.phase {
            AppPhase::Selecting => {
                self.update_selection(ctx);
                // update_selection may have advanced the phase; the overlay
                // is only drawn while still selecting.
                if self.phase == AppPhase::Selecting {
                    self.draw_overlay(ctx);
                    ctx.request_repaint_after(std::time::Duration::from_millis(16));
                    return;
                }
            }
            AppPhase::Recognizing | AppPhase::Translating => {
                // Repaint at ~15 fps for the spinner and channel polling.
                ctx.request_repaint_after(std::time::Duration::from_millis(66));
            }
            _ => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let phase = self.phase.clone();
            match phase {
                AppPhase::Selecting => {}
                AppPhase::Recognizing | AppPhase::Translating => self.draw_progress(ui),
                AppPhase::Result => {
                    let ctx_clone = ctx.clone();
                    self.draw_result(ui, &ctx_clone);
                }
                AppPhase::Error => {
                    let ctx_clone = ctx.clone();
                    self.draw_error(ui, &ctx_clone);
                }
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("screen-translate closing");
    }
}
