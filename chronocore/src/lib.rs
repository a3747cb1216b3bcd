//! chronocore: state and timing behind the chronobounce window
//!
//! Nothing in here knows about a GUI toolkit. Panels report their size,
//! drivers publish ticks, and the [`Scene`] turns both into positions,
//! angles and face geometry for the shell to draw.

pub mod bouncer;
pub mod config;
pub mod driver;
pub mod face;
pub mod field;
pub mod geometry;
pub mod hands;
pub mod scene;
pub mod stopwatch;
pub mod timepiece;

pub use config::{ConfigError, DemoConfig};
pub use driver::{DriverEvent, DriverKind, Drivers};
pub use geometry::{Point, Viewport};
pub use hands::{Granularity, TimepieceKind};
pub use scene::Scene;

/// Initial window position from the `CHRONOBOUNCE_CASCADE` environment
/// variable, so several instances open staggered instead of stacked.
pub fn cascade_position() -> Option<(f32, f32)> {
    std::env::var("CHRONOBOUNCE_CASCADE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = (n as f32) * 30.0;
            (100.0 + offset, 100.0 + offset)
        })
}
