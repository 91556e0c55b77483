//! Screen rendering (type picker, form, sent)

use super::flow::Step;
use super::App;
use crate::constants::{APP_NAME, APP_VERSION, COMMENT_PLACEHOLDER};
use crate::form::{FeedbackForm, SubmitPhase};
use crate::theme;
use crate::types::FeedbackType;
use crate::ui::components::{back_button, screenshot_button, send_button, type_card, ScreenshotAction};
use eframe::egui;

impl App {
    pub fn render_step(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(theme::panel_frame())
            .show(ctx, |ui| {
                let form = match self.flow.step() {
                    Step::Form { form, .. } => Some(form.clone()),
                    _ => None,
                };
                if let Some(form) = form {
                    self.render_form(ui, ctx, &form);
                } else if matches!(self.flow.step(), Step::Sent) {
                    self.render_sent(ui);
                } else {
                    self.render_choose_type(ui, ctx);
                }
            });
    }

    fn render_choose_type(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new("Leave your feedback")
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
        });
        ui.add_space(theme::SPACING_XL * 2.0);

        let mut chosen = None;
        ui.horizontal(|ui| {
            let spacing = ui.spacing().item_spacing.x;
            let count = FeedbackType::ALL.len() as f32;
            let total = theme::TYPE_CARD.0 * count + spacing * (count - 1.0);
            ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));
            for feedback_type in FeedbackType::ALL {
                if type_card(ui, feedback_type.info()) {
                    chosen = Some(feedback_type);
                }
            }
        });

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("{} v{}", APP_NAME, APP_VERSION))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_DIM),
            );
        });

        if let Some(feedback_type) = chosen {
            self.open_form(ctx, feedback_type);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, form: &FeedbackForm) {
        let state = form.snapshot();
        let info = form.feedback_type().info();

        // Header
        ui.horizontal(|ui| {
            if back_button(ui) {
                form.cancel();
            }
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(info.icon)
                    .size(theme::FONT_TITLE)
                    .color(theme::ACCENT),
            );
            ui.label(
                egui::RichText::new(info.title)
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
        });
        ui.add_space(theme::SPACING_LG);

        // Comment
        let comment_buffer = &mut self.comment_buffer;
        theme::input_frame().show(ui, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(&mut *comment_buffer)
                    .hint_text(COMMENT_PLACEHOLDER)
                    .desired_rows(theme::COMMENT_ROWS)
                    .desired_width(f32::INFINITY)
                    .frame(false)
                    .text_color(theme::TEXT_SECONDARY)
                    .font(egui::FontId::proportional(theme::FONT_BODY)),
            );
            if response.changed() {
                form.set_comment(comment_buffer.clone());
            }
        });
        ui.add_space(theme::SPACING_LG);

        // Footer
        let thumbnail = self.screenshot_thumbnail(ctx, state.screenshot.as_deref());
        ui.horizontal(|ui| {
            match screenshot_button(ui, thumbnail.as_ref(), state.screenshot.is_some(), state.is_capturing) {
                Some(ScreenshotAction::Take) => self.spawn_capture(ctx, form),
                Some(ScreenshotAction::Remove) => form.remove_screenshot(),
                None => {}
            }
            // Stays busy after a send until the success screen takes over
            if send_button(ui, state.phase() != SubmitPhase::Idle) {
                self.spawn_submit(ctx, form);
            }
        });
    }

    fn render_sent(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_XL * 3.0);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                    .size(theme::FONT_TITLE * 3.0)
                    .color(theme::STATUS_SUCCESS),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new("We appreciate the feedback!")
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add_space(theme::SPACING_XL);

            let again = ui.add(
                egui::Button::new(
                    egui::RichText::new("Send another")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_SECONDARY),
                )
                .fill(theme::BG_SURFACE)
                .corner_radius(theme::RADIUS_DEFAULT)
                .min_size(egui::vec2(160.0, theme::BUTTON_HEIGHT_LARGE)),
            );
            if again.clicked() {
                self.flow.start_over();
            }
        });
    }
}
