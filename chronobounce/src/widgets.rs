use crate::theme::Palette;
use egui::{Response, Stroke, Ui, Widget};

/// Outlined panel button. Drawn inverted while pressed or while `latched`,
/// which the freeze buttons use to show a paused driver.
pub struct PanelButton<'a> {
    text: &'a str,
    latched: bool,
}

impl<'a> PanelButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, latched: false }
    }

    pub fn latched(mut self, latched: bool) -> Self {
        self.latched = latched;
        self
    }
}

impl<'a> Widget for PanelButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::FontId::proportional(14.0);
        let galley = ui.painter().layout_no_wrap(self.text.to_owned(), font, Palette::INK);
        let desired_size = egui::vec2(galley.size().x + 24.0, ui.spacing().interact_size.y);
        let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let enabled = ui.is_enabled();
            let inverted = enabled && (self.latched || response.is_pointer_button_down_on());
            let (fill, ink) = match (enabled, inverted) {
                (false, _) => (Palette::PAPER, Palette::MUTED),
                (true, true) => (Palette::INK, Palette::PAPER),
                (true, false) => (Palette::PAPER, Palette::INK),
            };
            let width = if enabled && response.hovered() { 2.0 } else { 1.0 };
            let outline = if enabled { Palette::INK } else { Palette::MUTED };

            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, Stroke::new(width, outline));
            let text_pos = rect.center() - galley.size() / 2.0;
            painter.galley_with_override_text_color(text_pos, galley, ink);
        }

        response
    }
}
