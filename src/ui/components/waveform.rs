//! Waveform visualization component
//!
//! Displays the recent microphone signal while a recording is active.

use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, Color32, Pos2, Rect, Stroke, Vec2};

/// Waveform visualization component
pub struct Waveform<'a> {
    state: &'a AppState,
    theme: &'a Theme,
    /// Height of the waveform display
    height: f32,
}

impl<'a> Waveform<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            height: 60.0,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = Vec2::new(ui.available_width(), self.height);
        let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::hover());

        let painter = ui.painter();

        // Draw background
        painter.rect_filled(rect, self.theme.card_rounding, self.theme.bg_secondary);

        let samples = &self.state.waveform_data;
        let color = match self.state.recording_state {
            RecordingState::Recording => self.theme.recording,
            RecordingState::Processing => self.theme.warning,
            RecordingState::Idle => self.theme.waveform_active,
        };

        if samples.is_empty() {
            // Show placeholder line
            let center_y = rect.center().y;
            painter.line_segment(
                [
                    Pos2::new(rect.left() + 8.0, center_y),
                    Pos2::new(rect.right() - 8.0, center_y),
                ],
                Stroke::new(1.0, self.theme.waveform_inactive),
            );
        } else {
            self.draw_waveform(ui, rect, samples, color);
        }

        // Show recording indicator
        if self.state.recording_state == RecordingState::Recording {
            self.draw_recording_indicator(ui, rect);
        }

        response
    }

    fn draw_waveform(&self, ui: &mut egui::Ui, rect: Rect, samples: &[f32], color: Color32) {
        let painter = ui.painter();

        let bar_count = (rect.width() / 3.0) as usize;
        if bar_count == 0 {
            return;
        }
        let samples_per_bar = (samples.len() / bar_count).max(1);

        let bar_width = rect.width() / bar_count as f32;
        let center_y = rect.center().y;
        let max_height = rect.height() * 0.8;

        for i in 0..bar_count {
            let start = i * samples_per_bar;
            if start >= samples.len() {
                break;
            }
            let end = (start + samples_per_bar).min(samples.len());

            // RMS of the segment drives the bar height
            let rms: f32 =
                samples[start..end].iter().map(|s| s * s).sum::<f32>() / (end - start) as f32;
            let rms = rms.sqrt();

            let height = (rms * max_height * 4.0).clamp(1.0, max_height);
            let x = rect.left() + i as f32 * bar_width + bar_width * 0.5;

            painter.line_segment(
                [
                    Pos2::new(x, center_y - height / 2.0),
                    Pos2::new(x, center_y + height / 2.0),
                ],
                Stroke::new(2.0, color),
            );
        }
    }

    fn draw_recording_indicator(&self, ui: &mut egui::Ui, rect: Rect) {
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 2.0).sin() * 0.5 + 0.5) as f32;

        let painter = ui.painter();
        let center = Pos2::new(rect.right() - 16.0, rect.top() + 12.0);

        painter.circle_filled(
            center,
            4.0 + pulse * 2.0,
            self.theme.recording.gamma_multiply(0.5 + pulse * 0.5),
        );

        ui.ctx().request_repaint();
    }
}
