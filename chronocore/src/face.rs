//! Timepiece face layout.
//!
//! Turns a viewport and the current hand angles into plain geometry: rings,
//! tick marks, numerals and three rotated hand rectangles. The shell only
//! has to draw what it is given.

use crate::geometry::{FaceFrame, Point, Viewport};
use crate::hands::{HandAngles, TimepieceKind};

/// First and last tick angle, in degrees clockwise from three o'clock.
const FIRST_TICK: i32 = -78;
const LAST_TICK: i32 = 276;
const TICK_STEP: usize = 6;

/// Ring radii as fractions of the face scale.
const OUTER_RING: f64 = 0.95;
const INNER_RING: f64 = 0.90;
const HUB: f64 = 0.03;
const LABEL_RADIUS: f64 = 0.75;

/// Which fill a shape takes from the face colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Background,
    Foreground,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
    pub fill: Ink,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub from: Point,
    pub to: Point,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Numeral {
    /// Center of the text.
    pub at: Point,
    pub text: String,
    pub font_size: f64,
}

/// A hand as a rectangle rotated about the face center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandRect {
    /// Top-left corner before rotation.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub pivot: Point,
    pub angle: f64,
}

impl HandRect {
    /// Corners after rotation, clockwise from the unrotated top-left.
    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.origin;
        [
            Point::new(x, y),
            Point::new(x + self.width, y),
            Point::new(x + self.width, y + self.height),
            Point::new(x, y + self.height),
        ]
        .map(|p| p.rotated_about(self.pivot, self.angle))
    }
}

/// Proportions of one hand: width, total length, and how much of the
/// length sits above the pivot.
#[derive(Debug, Clone, Copy)]
struct HandShape {
    width: f64,
    length: f64,
    reach: f64,
}

const BIG_HAND: HandShape = HandShape { width: 0.03, length: 0.75, reach: 0.60 };
const SMALL_HAND: HandShape = HandShape { width: 0.02, length: 1.0, reach: 0.85 };
const TINY_HAND: HandShape = HandShape { width: 0.01, length: 1.0, reach: 0.85 };

impl HandShape {
    fn place(&self, frame: &FaceFrame, angle: f64) -> HandRect {
        let width = frame.len(self.width);
        HandRect {
            origin: Point::new(frame.center.x - width / 2.0, frame.center.y - frame.len(self.reach)),
            width,
            height: frame.len(self.length),
            pivot: frame.center,
            angle,
        }
    }
}

/// Everything needed to draw one frame of a timepiece, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub frame: FaceFrame,
    pub rings: [Ring; 3],
    pub ticks: Vec<TickMark>,
    pub numerals: Vec<Numeral>,
    /// big, small, tiny
    pub hands: [HandRect; 3],
}

/// Numeral shown at a tick angle that is a multiple of 30 degrees.
pub fn numeral_for(kind: TimepieceKind, degrees: i32) -> i32 {
    match kind {
        TimepieceKind::Clock => degrees / 30 + 3,
        TimepieceKind::Stopwatch => degrees / 6 + 15,
    }
}

/// Lay out the whole face for `viewport` with hands at `angles`.
pub fn layout(kind: TimepieceKind, viewport: Viewport, angles: HandAngles) -> FaceGeometry {
    let frame = viewport.resolve();
    let thin = frame.len(0.01);
    let rings = [
        Ring { center: frame.center, radius: frame.len(OUTER_RING), fill: Ink::Background, stroke_width: thin },
        Ring { center: frame.center, radius: frame.len(INNER_RING), fill: Ink::Background, stroke_width: thin },
        Ring { center: frame.center, radius: frame.len(HUB), fill: Ink::Foreground, stroke_width: thin },
    ];

    let mut ticks = Vec::with_capacity(60);
    let mut numerals = Vec::with_capacity(12);
    let font_size = frame.label_font_size();
    for degrees in (FIRST_TICK..=LAST_TICK).step_by(TICK_STEP) {
        let angle = degrees as f64;
        let major = degrees % 30 == 0;
        ticks.push(TickMark {
            from: frame.center.polar(frame.len(OUTER_RING), angle),
            to: frame.center.polar(frame.len(INNER_RING), angle),
            width: if major { frame.len(0.02) } else { thin },
        });
        if major {
            numerals.push(Numeral {
                at: frame.center.polar(frame.len(LABEL_RADIUS), angle),
                text: numeral_for(kind, degrees).to_string(),
                font_size,
            });
        }
    }

    FaceGeometry {
        frame,
        rings,
        ticks,
        numerals,
        hands: [
            BIG_HAND.place(&frame, angles.big),
            SMALL_HAND.place(&frame, angles.small),
            TINY_HAND.place(&frame, angles.tiny),
        ],
    }
}
