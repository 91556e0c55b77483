//! Toast notifications for surfaced failures

use super::App;
use crate::theme;
use eframe::egui;

const VISIBLE_SECS: f32 = 3.0;
const FADE_SECS: f32 = 0.5;

fn toast_alpha(elapsed: f32) -> f32 {
    if elapsed > VISIBLE_SECS {
        ((VISIBLE_SECS + FADE_SECS - elapsed) / FADE_SECS).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl App {
    /// Pick up the newest notice raised by a background task
    pub fn poll_notices(&mut self) {
        if let Some(msg) = self.notice_rx.try_iter().last() {
            self.toast_message = Some(msg);
            self.toast_start = Some(std::time::Instant::now());
        }
    }

    /// Bottom-center toast, 3s visible then fade, pause on hover
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let screen = ctx.screen_rect();
        let margin = theme::SPACING_LG;

        let response = egui::Area::new(egui::Id::new("feedback_toast"))
            .fixed_pos(egui::pos2(screen.center().x, screen.bottom() - margin))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = toast_alpha(elapsed);
                let error = theme::STATUS_ERROR;

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(
                        theme::STROKE_DEFAULT,
                        egui::Color32::from_rgba_unmultiplied(error.r(), error.g(), error.b(), (100.0 * alpha) as u8),
                    ))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8),
                        ));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= VISIBLE_SECS + FADE_SECS {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_holds_then_fades() {
        assert_eq!(toast_alpha(0.0), 1.0);
        assert_eq!(toast_alpha(VISIBLE_SECS), 1.0);
        assert!((toast_alpha(VISIBLE_SECS + FADE_SECS / 2.0) - 0.5).abs() < 1e-4);
        assert_eq!(toast_alpha(VISIBLE_SECS + FADE_SECS + 1.0), 0.0);
    }
}
