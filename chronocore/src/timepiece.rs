//! One configured timepiece: hand model, face colours and the last size
//! its panel reported.

use crate::face::{self, FaceGeometry};
use crate::geometry::Viewport;
use crate::hands::{ClockSample, Granularity, HandAngles, HandModel, StopwatchSample, TimepieceKind};
use serde::{Deserialize, Serialize};

/// 8-bit sRGB colour, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE_SMOKE: Rgb = Rgb(245, 245, 245);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceColors {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl FaceColors {
    /// Dark ink on a light face.
    pub const LIGHT: FaceColors = FaceColors {
        background: Rgb::WHITE_SMOKE,
        foreground: Rgb::BLACK,
    };

    /// Light ink on a dark face.
    pub const DARK: FaceColors = FaceColors {
        background: Rgb::BLACK,
        foreground: Rgb::WHITE_SMOKE,
    };
}

#[derive(Debug, Clone)]
pub struct Timepiece {
    hands: HandModel,
    colors: FaceColors,
    viewport: Viewport,
}

impl Timepiece {
    pub fn new(kind: TimepieceKind, granularity: Granularity, colors: FaceColors) -> Self {
        Self {
            hands: HandModel::new(kind, granularity),
            colors,
            viewport: Viewport::UNMEASURED,
        }
    }

    pub fn kind(&self) -> TimepieceKind {
        self.hands.kind()
    }

    pub fn granularity(&self) -> Granularity {
        self.hands.granularity()
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        log::info!("{:?} granularity set to {granularity}", self.kind());
        self.hands.set_granularity(granularity);
    }

    pub fn colors(&self) -> FaceColors {
        self.colors
    }

    pub fn angles(&self) -> HandAngles {
        self.hands.angles()
    }

    pub fn tick_clock(&mut self, sample: ClockSample) -> bool {
        self.hands.tick_clock(sample)
    }

    pub fn tick_stopwatch(&mut self, sample: StopwatchSample) -> bool {
        self.hands.tick_stopwatch(sample)
    }

    /// Record the panel size. Called on every render pass.
    pub fn observe_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Face geometry for the last observed viewport and current hands.
    pub fn layout(&self) -> FaceGeometry {
        face::layout(self.kind(), self.viewport, self.angles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_tracks_viewport_and_hands() {
        let mut clock = Timepiece::new(TimepieceKind::Clock, Granularity::Discrete, FaceColors::LIGHT);
        assert_eq!(clock.layout().frame.scale, 0.0);
        clock.observe_viewport(Viewport::new(120.0, 80.0));
        clock.tick_clock(ClockSample::new(2.0, 0.0, 0.0, 0.0));
        let face = clock.layout();
        assert_eq!(face.frame.scale, 40.0);
        assert_eq!(face.hands[0].angle, 60.0);
    }

    #[test]
    fn test_colors_roundtrip_as_arrays() {
        let json = serde_json::to_string(&FaceColors::DARK).unwrap();
        assert_eq!(json, r#"{"background":[0,0,0],"foreground":[245,245,245]}"#);
    }
}
