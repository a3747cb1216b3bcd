//! Draws chronocore geometry with an egui painter.

use crate::theme::color;
use chronocore::face::{FaceGeometry, Ink};
use chronocore::field::BounceField;
use chronocore::geometry::{Point, Viewport};
use chronocore::timepiece::{FaceColors, Rgb};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

/// Panel-local point to screen position.
fn to_screen(panel: Rect, p: Point) -> Pos2 {
    panel.min + egui::vec2(p.x as f32, p.y as f32)
}

pub fn viewport_of(panel: Rect) -> Viewport {
    Viewport::new(panel.width() as f64, panel.height() as f64)
}

/// Screen position to panel-local point.
pub fn to_panel(panel: Rect, pos: Pos2) -> Point {
    let local = pos - panel.min;
    Point::new(local.x as f64, local.y as f64)
}

pub fn paint_face(painter: &Painter, panel: Rect, face: &FaceGeometry, colors: FaceColors) {
    let bg = color(colors.background);
    let fg = color(colors.foreground);
    let ink = |i: Ink| -> Color32 {
        match i {
            Ink::Background => bg,
            Ink::Foreground => fg,
        }
    };

    for ring in &face.rings {
        painter.circle(
            to_screen(panel, ring.center),
            ring.radius as f32,
            ink(ring.fill),
            Stroke::new(ring.stroke_width as f32, fg),
        );
    }

    for tick in &face.ticks {
        painter.line_segment(
            [to_screen(panel, tick.from), to_screen(panel, tick.to)],
            Stroke::new(tick.width as f32, fg),
        );
    }

    for numeral in &face.numerals {
        painter.text(
            to_screen(panel, numeral.at),
            Align2::CENTER_CENTER,
            &numeral.text,
            FontId::proportional(numeral.font_size as f32),
            fg,
        );
    }

    for hand in &face.hands {
        let points = hand.corners().iter().map(|&c| to_screen(panel, c)).collect();
        painter.add(Shape::convex_polygon(points, fg, Stroke::NONE));
    }
}

pub fn paint_field(painter: &Painter, panel: Rect, field: &BounceField, fill: Rgb) {
    let radius = field.params().diameter / 2.0;
    let fill = color(fill);
    for bouncer in field.bouncers() {
        let center = Point::new(bouncer.position.x + radius, bouncer.position.y + radius);
        painter.circle_filled(to_screen(panel, center), radius as f32, fill);
    }
}
