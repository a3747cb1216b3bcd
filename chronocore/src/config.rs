//! Demo configuration.
//!
//! Read once at startup from a JSON file; never written back. Every field
//! has a default that reproduces the stock demo, so an empty `{}` is valid.

use crate::bouncer::BounceParams;
use crate::driver::{DriverPeriods, BOUNCE_PERIOD, CLOCK_PERIOD, STOPWATCH_PERIOD};
use crate::hands::Granularity;
use crate::timepiece::{FaceColors, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

/// Shortest driver period accepted from a config file.
const MIN_PERIOD_MS: u64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 420.0,
            title: "chronobounce".into(),
        }
    }
}

/// Settings for one timepiece. `granularity` and `colors` are required
/// when the section is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimepieceConfig {
    pub granularity: Granularity,
    pub colors: FaceColors,
    /// Driver period; the built-in default when absent. Raised to 1 ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    #[serde(flatten)]
    pub params: BounceParams,
    pub color: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_ms: Option<u64>,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            params: BounceParams::default(),
            color: Rgb::BLACK,
            period_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub clock: TimepieceConfig,
    pub stopwatch: TimepieceConfig,
    pub bounce: BounceConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clock: TimepieceConfig {
                granularity: Granularity::Continuous,
                colors: FaceColors::LIGHT,
                period_ms: None,
            },
            stopwatch: TimepieceConfig {
                granularity: Granularity::Discrete,
                colors: FaceColors::DARK,
                period_ms: None,
            },
            bounce: BounceConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<user config dir>/chronobounce/config.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "chronobounce").map(|p| p.config_dir().join(CONFIG_FILE))
    }

    /// Load from `explicit`, else from the default path if it exists, else
    /// use defaults. Errors are logged and fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    log::info!("no config file, using defaults");
                    return Self::default();
                }
            },
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn periods(&self) -> DriverPeriods {
        let pick = |ms: Option<u64>, fallback: Duration| {
            ms.map(|ms| Duration::from_millis(ms.max(MIN_PERIOD_MS))).unwrap_or(fallback)
        };
        DriverPeriods {
            clock: pick(self.clock.period_ms, CLOCK_PERIOD),
            stopwatch: pick(self.stopwatch.period_ms, STOPWATCH_PERIOD),
            bounce: pick(self.bounce.period_ms, BOUNCE_PERIOD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_default() {
        let config = DemoConfig::from_json("{}").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.periods(), DriverPeriods::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "stopwatch": { "granularity": "continuous", "colors": { "background": [10, 20, 30], "foreground": [255, 255, 255] }, "period_ms": 50 },
            "bounce": { "diameter": 16.0, "color": [200, 0, 0] }
        }"#;
        let config = DemoConfig::from_json(json).unwrap();
        assert_eq!(config.stopwatch.granularity, Granularity::Continuous);
        assert_eq!(config.stopwatch.colors.background, Rgb(10, 20, 30));
        assert_eq!(config.periods().stopwatch, Duration::from_millis(50));
        assert_eq!(config.periods().clock, CLOCK_PERIOD);
        assert_eq!(config.bounce.params.diameter, 16.0);
        assert_eq!(config.bounce.params.step_gain, 5.0);
        assert_eq!(config.bounce.color, Rgb(200, 0, 0));
        assert_eq!(config.clock.granularity, Granularity::Continuous);
    }

    #[test]
    fn test_zero_period_is_raised() {
        let json = r#"{ "bounce": { "period_ms": 0 } }"#;
        let config = DemoConfig::from_json(json).unwrap();
        assert_eq!(config.periods().bounce, Duration::from_millis(1));
        assert_eq!(config.periods().clock, CLOCK_PERIOD);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("chronobounce-does-not-exist.json");
        assert!(matches!(DemoConfig::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_bad_json_is_parse_error() {
        let path = std::env::temp_dir().join(format!("chronobounce-bad-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ \"clock\": 12 }").unwrap();
        drop(file);
        let err = DemoConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid config"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_falls_back_on_error() {
        let path = std::env::temp_dir().join("chronobounce-missing-again.json");
        assert_eq!(DemoConfig::resolve(Some(path.as_path())), DemoConfig::default());
    }
}
