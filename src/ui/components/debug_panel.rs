//! Debug panel component
//!
//! Displays internal state information for debugging.

use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// Debug panel component
pub struct DebugPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> DebugPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    // Header
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Debug Panel")
                                .strong()
                                .color(self.theme.text_primary),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{:.1} FPS", self.state.debug_info.fps))
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.fps_color()),
                            );
                        });
                    });

                    ui.separator();

                    // Stats grid
                    egui::Grid::new("debug_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            self.stat_row(ui, "Recording", &self.recording_status());
                            self.stat_row(ui, "Session", &self.state.debug_info.session_status);
                            self.stat_row(ui, "Model", &self.state.model);
                            self.stat_row(ui, "History", &self.state.debug_info.history_status);
                            self.stat_row(
                                ui,
                                "Messages",
                                &self.state.messages.len().to_string(),
                            );
                            self.stat_row(
                                ui,
                                "Transcription",
                                &self.state.debug_info.transcription_status,
                            );
                            self.stat_row(ui, "Chat", &self.state.debug_info.chat_status);
                            self.stat_row(
                                ui,
                                "Waveform Samples",
                                &self.state.waveform_data.len().to_string(),
                            );
                        });

                    ui.separator();

                    // Log messages
                    ui.label(
                        RichText::new("Log")
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .stick_to_bottom(true)
                        .max_height(240.0)
                        .show(ui, |ui| {
                            for message in &self.state.debug_info.log_messages {
                                ui.label(
                                    RichText::new(message)
                                        .size(11.0)
                                        .family(egui::FontFamily::Monospace)
                                        .color(self.theme.text_secondary),
                                );
                            }
                        });
                });
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(
            RichText::new(label)
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.label(
            RichText::new(if value.is_empty() { "-" } else { value })
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_secondary),
        );
        ui.end_row();
    }

    fn recording_status(&self) -> String {
        match self.state.recording_state {
            RecordingState::Idle => {
                if self.state.has_pending_clip {
                    "Idle (clip pending)".to_string()
                } else {
                    "Idle".to_string()
                }
            }
            RecordingState::Recording => "Recording".to_string(),
            RecordingState::Processing => "Transcribing".to_string(),
        }
    }

    fn fps_color(&self) -> egui::Color32 {
        if self.state.debug_info.fps >= 50.0 {
            self.theme.success
        } else if self.state.debug_info.fps >= 25.0 {
            self.theme.warning
        } else {
            self.theme.error
        }
    }
}
