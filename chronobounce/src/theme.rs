//! Look of the demo window.
//!
//! Chrome is flat ink on paper. Each panel heading is painted in the
//! colours of what the panel shows, so the strip above the clock matches
//! the clock face and the strip above the field matches the balls.

use chronocore::config::DemoConfig;
use chronocore::timepiece::{FaceColors, Rgb};
use egui::{Color32, Rounding, Stroke, Visuals};

pub struct Palette;

impl Palette {
    pub const PAPER: Color32 = Color32::from_rgb(255, 255, 255);
    pub const INK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const MUTED: Color32 = Color32::from_rgb(140, 140, 140);
}

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// The three panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Clock,
    Stopwatch,
    Bounce,
}

impl Role {
    pub fn title(self) -> &'static str {
        match self {
            Role::Clock => "clock",
            Role::Stopwatch => "stopwatch",
            Role::Bounce => "bounce",
        }
    }
}

/// Configured colours of each panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolePalette {
    pub clock: FaceColors,
    pub stopwatch: FaceColors,
    pub bouncer: Rgb,
}

impl RolePalette {
    pub fn from_config(config: &DemoConfig) -> Self {
        Self {
            clock: config.clock.colors,
            stopwatch: config.stopwatch.colors,
            bouncer: config.bounce.color,
        }
    }

    /// Heading fill and text colour.
    pub fn heading_colors(&self, role: Role) -> (Color32, Color32) {
        match role {
            Role::Clock => (color(self.clock.background), color(self.clock.foreground)),
            Role::Stopwatch => (color(self.stopwatch.background), color(self.stopwatch.foreground)),
            Role::Bounce => (Palette::PAPER, color(self.bouncer)),
        }
    }

    pub fn heading(&self, ui: &mut egui::Ui, role: Role) {
        let (fill, text) = self.heading_colors(role);
        egui::Frame::none()
            .fill(fill)
            .stroke(Stroke::new(1.0, Palette::INK))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(role.title()).color(text).strong());
                });
            });
    }
}

/// Flat square widgets with 1px ink outlines. Keyboard zoom is disabled
/// since the faces already scale with their panels.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(Palette::INK);
    visuals.panel_fill = Palette::PAPER;
    visuals.window_fill = Palette::PAPER;
    visuals.window_stroke = Stroke::new(1.0, Palette::INK);
    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;
    visuals.selection.bg_fill = Palette::MUTED;

    let widgets = &mut visuals.widgets;
    for state in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active, &mut widgets.open] {
        state.rounding = Rounding::ZERO;
        state.weak_bg_fill = Palette::PAPER;
        state.bg_stroke = Stroke::new(1.0, Palette::INK);
    }
    widgets.hovered.bg_stroke.width = 2.0;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, Palette::INK);

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
    ctx.options_mut(|o| o.zoom_with_keyboard = false);
}
