//! Main application struct and eframe integration
//!
//! This module contains the CompanionApp that implements eframe::App.

#[cfg(feature = "audio-io")]
use crate::audio::AudioInput;
use crate::ui::components::{DebugPanel, InputBar, MessageList, Waveform};
use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::time::Instant;

/// Main Companion application
pub struct CompanionApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Last frame time for FPS calculation
    last_frame_time: Instant,
    /// Keeps the capture stream alive for the life of the window
    #[cfg(feature = "audio-io")]
    _audio_input: Option<AudioInput>,
}

impl CompanionApp {
    /// Create a new Companion application with pre-wired state
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            state,
            theme,
            last_frame_time: Instant::now(),
            #[cfg(feature = "audio-io")]
            _audio_input: None,
        }
    }

    /// Take ownership of the capture stream so it lives as long as the app
    #[cfg(feature = "audio-io")]
    pub fn attach_audio_input(&mut self, input: AudioInput) {
        self._audio_input = Some(input);
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // App title
                    ui.label(
                        RichText::new("Companion")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("AI Chat")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Debug toggle
                        if ui.button("🔍").on_hover_text("Toggle Debug Panel").clicked() {
                            self.state.show_debug_panel = !self.state.show_debug_panel;
                        }

                        // Model name, passed to the backend verbatim
                        ui.add(
                            egui::TextEdit::singleline(&mut self.state.model)
                                .desired_width(140.0)
                                .font(egui::TextStyle::Monospace),
                        );
                        ui.label(
                            RichText::new("Model:")
                                .size(12.0)
                                .color(self.theme.text_muted),
                        );
                    });
                });
            });
    }

    /// Show the bottom input area
    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    // Waveform visualization while a recording is live or
                    // a clip is being transcribed
                    if self.state.recording_state != RecordingState::Idle {
                        Waveform::new(&self.state, &self.theme).height(50.0).show(ui);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    // Live/final transcription readout
                    if !self.state.transcribed.is_empty() {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new("Transcribed:")
                                    .strong()
                                    .size(12.0)
                                    .color(self.theme.text_muted),
                            );
                            ui.label(
                                RichText::new(&self.state.transcribed)
                                    .size(12.0)
                                    .color(self.theme.text_secondary),
                            );
                        });
                        ui.add_space(self.theme.spacing_sm);
                    }

                    // Input bar
                    InputBar::new(&mut self.state, &self.theme).show(ui);
                });
            });
    }

    /// Show the debug panel on the side
    fn show_debug_panel(&mut self, ctx: &egui::Context) {
        if !self.state.show_debug_panel {
            return;
        }

        SidePanel::right("debug_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(250.0)
            .max_width(500.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                DebugPanel::new(&self.state, &self.theme).show(ui);
            });
    }

    /// Show the main content area (response and history)
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                MessageList::new(&self.state, &self.theme).show(ui);
            });
    }

    /// Pull the recorder's shared visualization buffer into the frame
    fn sync_waveform(&mut self) {
        if self.state.recording_state != RecordingState::Recording {
            return;
        }
        let samples = self
            .state
            .recorder
            .as_ref()
            .map(|recorder| recorder.waveform_buffer().lock().clone());
        if let Some(samples) = samples {
            self.state.update_waveform(&samples);
        }
    }
}

impl eframe::App for CompanionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Calculate delta time for FPS
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;
        self.state.update_fps(delta);

        // Poll backend events and refresh the waveform
        self.state.poll_events();
        self.sync_waveform();

        // Render UI
        self.show_header(ctx);
        self.show_debug_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Request repaint for animations and pending events
        if self.state.response.is_loading
            || self.state.recording_state != RecordingState::Idle
        {
            ctx.request_repaint();
        } else {
            // Worker events can arrive while the UI is idle
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
