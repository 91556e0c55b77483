//! Reusable UI components
//!
//! Custom-painted widgets for the feedback screens.

use crate::theme;
use crate::types::FeedbackTypeInfo;
use eframe::egui;

/// What a click on the screenshot control should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotAction {
    Take,
    Remove,
}

fn screenshot_action(has_screenshot: bool, capturing: bool) -> Option<ScreenshotAction> {
    match (has_screenshot, capturing) {
        (true, _) => Some(ScreenshotAction::Remove),
        (false, false) => Some(ScreenshotAction::Take),
        (false, true) => None,
    }
}

/// Camera button when empty, thumbnail with a trash badge once attached
pub fn screenshot_button(
    ui: &mut egui::Ui,
    thumbnail: Option<&egui::TextureHandle>,
    has_screenshot: bool,
    capturing: bool,
) -> Option<ScreenshotAction> {
    let size = theme::SCREENSHOT_BUTTON_SIZE;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    let response = response.on_hover_text(if has_screenshot {
        "Remove screenshot"
    } else {
        "Take screenshot"
    });

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, theme::BTN_DEFAULT, rect);
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);

        if has_screenshot {
            if let Some(texture) = thumbnail {
                painter.image(
                    texture.id(),
                    draw_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            let badge = egui::Rect::from_min_size(
                draw_rect.right_bottom() - egui::vec2(18.0, 18.0),
                egui::vec2(18.0, 18.0),
            );
            painter.rect_filled(badge, theme::RADIUS_DEFAULT, theme::BG_BASE);
            painter.text(
                badge.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::TRASH,
                egui::FontId::proportional(theme::FONT_LABEL),
                theme::TEXT_SECONDARY,
            );
        } else if capturing {
            egui::Spinner::new()
                .size(size * 0.5)
                .color(theme::TEXT_MUTED)
                .paint_at(ui, draw_rect.shrink(size * 0.25));
        } else {
            painter.text(
                draw_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CAMERA,
                egui::FontId::proportional(size * 0.5),
                theme::TEXT_SECONDARY,
            );
        }
    }

    if response.clicked() {
        screenshot_action(has_screenshot, capturing)
    } else {
        None
    }
}

/// Full-width submit button; shows a spinner and ignores clicks while loading
pub fn send_button(ui: &mut egui::Ui, is_loading: bool) -> bool {
    let width = ui.available_width();
    let sense = if is_loading {
        egui::Sense::hover()
    } else {
        egui::Sense::click()
    };
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::BUTTON_HEIGHT_LARGE), sense);

    if ui.is_rect_visible(rect) {
        let base = if is_loading {
            theme::BTN_DISABLED
        } else {
            theme::BTN_ACCENT
        };
        let (fill, draw_rect) = theme::button_visual(&response, base, rect);
        ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);

        if is_loading {
            let spinner = egui::Rect::from_center_size(draw_rect.center(), egui::vec2(18.0, 18.0));
            egui::Spinner::new()
                .size(18.0)
                .color(theme::ACCENT)
                .paint_at(ui, spinner);
        } else {
            ui.painter().text(
                draw_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Send feedback",
                egui::FontId::proportional(theme::FONT_BODY),
                theme::ACCENT_DARK,
            );
        }
    }

    !is_loading && response.clicked()
}

/// Feedback type tile (icon over title). Returns true if clicked.
pub fn type_card(ui: &mut egui::Ui, info: FeedbackTypeInfo) -> bool {
    let (w, h) = theme::TYPE_CARD;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, h), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, theme::BG_ELEVATED, rect);
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);
        if response.hovered() {
            painter.rect_stroke(
                draw_rect,
                theme::RADIUS_LARGE,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::ACCENT),
                egui::StrokeKind::Inside,
            );
        }
        painter.text(
            draw_rect.center() - egui::vec2(0.0, theme::SPACING_LG),
            egui::Align2::CENTER_CENTER,
            info.icon,
            egui::FontId::proportional(theme::FONT_ICON),
            theme::ACCENT,
        );
        painter.text(
            draw_rect.center() + egui::vec2(0.0, theme::FONT_ICON * 0.75),
            egui::Align2::CENTER_CENTER,
            info.title,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_SECONDARY,
        );
    }

    response.clicked()
}

/// Back arrow in the form header. Returns true if clicked.
pub fn back_button(ui: &mut egui::Ui) -> bool {
    let response = ui.add(
        egui::Button::new(
            egui::RichText::new(egui_phosphor::regular::ARROW_LEFT)
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_MUTED),
        )
        .frame(false),
    );
    response.on_hover_text("Back").clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_screenshot_click_removes() {
        assert_eq!(screenshot_action(true, false), Some(ScreenshotAction::Remove));
        assert_eq!(screenshot_action(true, true), Some(ScreenshotAction::Remove));
    }

    #[test]
    fn empty_control_click_takes_unless_capturing() {
        assert_eq!(screenshot_action(false, false), Some(ScreenshotAction::Take));
        assert_eq!(screenshot_action(false, true), None);
    }
}
