//! Message list component
//!
//! Displays the response area and the server-side conversation history,
//! mirroring the two sections of the original page.

use crate::messages::{Message, Role};
use crate::ui::state::{AppState, PendingResponse};
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

/// Message list component
pub struct MessageList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.state.messages.get_all();
        let response = &self.state.response;
        let has_response = response.is_loading || !response.text.is_empty();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    if messages.is_empty() && !has_response {
                        self.show_empty_state(ui);
                    } else {
                        if has_response {
                            self.show_response_area(ui, response);
                            ui.add_space(self.theme.spacing);
                        }

                        self.show_history(ui, &messages);
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.label(
                RichText::new("Companion")
                    .size(24.0)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Send a message or record your voice to get started.")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(self.theme.spacing_lg);

            // Quick action hints
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = egui::Vec2::splat(self.theme.spacing);

                self.show_hint_card(ui, "Type", "Enter your message below");
                self.show_hint_card(ui, "Record", "Click the mic, speak, click stop");
                self.show_hint_card(ui, "Send Audio", "Submit the clip for transcription");
            });
        });
    }

    fn show_hint_card(&self, ui: &mut egui::Ui, title: &str, description: &str) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(170.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(title)
                            .size(14.0)
                            .strong()
                            .color(self.theme.primary),
                    );
                    ui.label(
                        RichText::new(description)
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    /// The response area: the in-flight indicator or the text of the last
    /// answer, which may be a literal error string.
    fn show_response_area(&self, ui: &mut egui::Ui, response: &PendingResponse) {
        ui.label(
            RichText::new("Response")
                .size(12.0)
                .strong()
                .color(self.theme.text_muted),
        );

        ui.add_space(2.0);

        egui::Frame::none()
            .fill(self.theme.assistant_bubble)
            .rounding(self.theme.bubble_rounding)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.9);

                if response.is_loading {
                    // Typing indicator
                    ui.horizontal(|ui| {
                        for i in 0..3 {
                            let t = ui.ctx().input(|i| i.time);
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(10.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                    ui.ctx().request_repaint();
                } else {
                    let is_error = response.text.starts_with("Error:");
                    let color = if is_error {
                        self.theme.error
                    } else {
                        self.theme.text_primary
                    };
                    ui.label(RichText::new(&response.text).color(color));
                }
            });

        if let Some(elapsed_ms) = response.elapsed_ms {
            ui.label(
                RichText::new(format!("{} ms", elapsed_ms))
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        }
    }

    fn show_history(&self, ui: &mut egui::Ui, messages: &[Message]) {
        ui.label(
            RichText::new("Chat History")
                .size(12.0)
                .strong()
                .color(self.theme.text_muted),
        );

        ui.add_space(2.0);

        if messages.is_empty() {
            ui.label(
                RichText::new("No history yet.")
                    .italics()
                    .color(self.theme.text_muted),
            );
            return;
        }

        for message in messages {
            self.show_message(ui, message);
            ui.add_space(self.theme.spacing_sm);
        }
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.role == Role::User;
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };

        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };

        // Align messages based on role
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            // Role label
            ui.label(
                RichText::new(message.role.label())
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            // Message bubble
            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(&message.content).color(text_color));
                });

            // Timestamp (stamped at fetch time)
            let time_str = message.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }
}
