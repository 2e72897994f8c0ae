//! Input bar component
//!
//! Provides text input, the record/stop button, the send-audio button for
//! a finished clip, and the send control.

use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input bar component for text and voice input
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Record button
                    self.show_record_button(ui);

                    // Send-audio button appears once a clip is waiting
                    if self.state.has_pending_clip {
                        self.show_send_audio_button(ui);
                    }

                    ui.add_space(self.theme.spacing_sm);

                    // Text input
                    self.show_text_input(ui);

                    ui.add_space(self.theme.spacing_sm);

                    // Send button
                    self.show_send_button(ui);
                });
            });
    }

    fn show_record_button(&mut self, ui: &mut egui::Ui) {
        let is_recording = self.state.recording_state == RecordingState::Recording;
        let is_processing = self.state.recording_state == RecordingState::Processing;

        let (icon, tooltip, color) = match self.state.recording_state {
            RecordingState::Idle => ("🎤", "Record", self.theme.text_secondary),
            RecordingState::Recording => ("⏹", "Stop recording", self.theme.recording),
            RecordingState::Processing => ("⏳", "Transcribing...", self.theme.warning),
        };

        let button = egui::Button::new(RichText::new(icon).size(20.0).color(color))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding);

        let button = if is_recording {
            button.fill(self.theme.recording.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add_enabled(!is_processing, button);
        let button_rect = response.rect;

        let was_clicked = response.clicked();
        let was_right_clicked = response.secondary_clicked();

        if !is_processing {
            response.on_hover_text(tooltip);
        }

        // Click toggles recording
        if was_clicked {
            if is_recording {
                self.state.stop_recording();
            } else {
                self.state.start_recording();
            }
        }

        // Right-click cancels an active recording
        if was_right_clicked && is_recording {
            self.state.cancel_recording();
        }

        // Show pulsing indicator when recording
        if is_recording {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            let painter = ui.painter();
            let center = button_rect.center();
            let radius = button_rect.width() / 2.0 + 2.0 + pulse * 3.0;

            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(
                    2.0 * pulse,
                    self.theme.recording.gamma_multiply(1.0 - pulse * 0.5),
                ),
            );

            ui.ctx().request_repaint();
        }
    }

    fn show_send_audio_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(
            RichText::new("Send Audio")
                .size(13.0)
                .color(egui::Color32::WHITE),
        )
        .min_size(Vec2::new(0.0, 44.0))
        .rounding(self.theme.button_rounding)
        .fill(self.theme.secondary);

        let response = ui.add(button);
        if response.clicked() {
            self.state.send_audio();
        }
        response.on_hover_text("Transcribe the recorded clip");
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let is_loading = self.state.response.is_loading;
        let is_recording = self.state.recording_state != RecordingState::Idle;

        // Use remaining width for the text input
        let available_width = ui.available_width() - 60.0; // Reserve space for send button

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Type your message...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add_enabled(!is_loading && !is_recording, text_edit);

        // Enter sends
        if response.has_focus() && !self.state.input_text.trim().is_empty() {
            let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
            if enter_pressed {
                self.state.send_message();
            }
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let is_loading = self.state.response.is_loading;
        let can_send = !self.state.input_text.trim().is_empty()
            && !is_loading
            && self.state.recording_state == RecordingState::Idle;

        let icon = if is_loading { "…" } else { "➤" };
        let tooltip = if is_loading {
            "Sending..."
        } else {
            "Send message (Enter)"
        };

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new(icon).size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add_enabled(can_send, button);

        if response.clicked() {
            self.state.send_message();
        }

        response.on_hover_text(tooltip);
    }
}
