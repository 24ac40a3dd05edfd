//! Round settings
//!
//! Read from an inline JSON block in the page (browser) or a file passed on
//! the command line (headless runner). Missing fields fall back to defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised while loading settings
#[derive(Debug)]
pub enum ConfigError {
    /// Document is not valid settings JSON
    Parse(serde_json::Error),
    /// At least one lane is required
    NoLanes,
    /// More lanes than fit on screen
    TooManyLanes { count: usize },
    /// Round length must be positive
    RoundTooShort { seconds: f32 },
    /// Spawn interval must be positive
    SpawnIntervalTooShort { ms: f32 },
    /// At least one life is required
    NoLives,
    /// Reload time must be finite and not negative
    InvalidReload { ms: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings document: {err}"),
            Self::NoLanes => write!(f, "lane_count must be at least 1"),
            Self::TooManyLanes { count } => write!(
                f,
                "lane_count must be at most {}, got {count}",
                Settings::MAX_LANES
            ),
            Self::RoundTooShort { seconds } => {
                write!(f, "round_seconds must be positive and finite, got {seconds}")
            }
            Self::SpawnIntervalTooShort { ms } => {
                write!(f, "spawn_interval_ms must be positive and finite, got {ms}")
            }
            Self::NoLives => write!(f, "starting_lives must be at least 1"),
            Self::InvalidReload { ms } => {
                write!(f, "reload_ms must be zero or more, got {ms}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Tunable round parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of horizontal lanes
    pub lane_count: usize,
    /// Survival time needed to win
    pub round_seconds: f32,
    /// Lives at round start
    pub starting_lives: u32,
    /// Time between obstacle spawns
    pub spawn_interval_ms: f32,
    /// Player reload cooldown
    pub reload_ms: f32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Lines shown on the end-of-round overlay, one per round in rotation
    pub briefings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_count: 3,
            round_seconds: 80.0,
            starting_lives: 3,
            spawn_interval_ms: 900.0,
            reload_ms: 350.0,
            seed: None,
            briefings: vec![
                "The attack on Pearl Harbor occurred December 7, 1941.".to_string(),
                "The Japanese strike force used six aircraft carriers.".to_string(),
                "Radio silence and careful planning were key to the operation.".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Element holding inline settings JSON in the page
    pub const ELEMENT_ID: &'static str = "game-config";

    /// Upper bound on `lane_count`; lanes closer than a few pixels are unplayable
    pub const MAX_LANES: usize = 16;

    /// Parse and validate a settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.lane_count > Self::MAX_LANES {
            return Err(ConfigError::TooManyLanes {
                count: self.lane_count,
            });
        }
        if !(self.round_seconds > 0.0 && self.round_seconds.is_finite()) {
            return Err(ConfigError::RoundTooShort {
                seconds: self.round_seconds,
            });
        }
        if !(self.spawn_interval_ms > 0.0 && self.spawn_interval_ms.is_finite()) {
            return Err(ConfigError::SpawnIntervalTooShort {
                ms: self.spawn_interval_ms,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !(self.reload_ms >= 0.0 && self.reload_ms.is_finite()) {
            return Err(ConfigError::InvalidReload { ms: self.reload_ms });
        }
        Ok(())
    }

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring page settings: {err}");
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Round length in milliseconds
    pub fn round_ms(&self) -> f64 {
        self.round_seconds as f64 * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.lane_count, 3);
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.round_ms(), 80_000.0);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "lane_count": 5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.lane_count, 5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.spawn_interval_ms, 900.0);
        assert_eq!(settings.briefings.len(), 3);
    }

    #[test]
    fn test_rejects_zero_lanes() {
        let err = Settings::from_json(r#"{ "lane_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLanes));
    }

    #[test]
    fn test_rejects_bad_timings() {
        let err = Settings::from_json(r#"{ "round_seconds": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::RoundTooShort { .. }));

        let err = Settings::from_json(r#"{ "spawn_interval_ms": -5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::SpawnIntervalTooShort { .. }));

        let err = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLives));
    }

    #[test]
    fn test_rejects_out_of_range_lanes_and_reload() {
        let err = Settings::from_json(r#"{ "lane_count": 100000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyLanes { count: 100000 }));
        assert!(Settings::from_json(r#"{ "lane_count": 16 }"#).is_ok());

        let err = Settings::from_json(r#"{ "reload_ms": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReload { .. }));
        assert!(Settings::from_json(r#"{ "reload_ms": 0 }"#).is_ok());

        let settings = Settings {
            reload_ms: f32::NAN,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidReload { .. })
        ));

        let settings = Settings {
            round_seconds: f32::INFINITY,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::RoundTooShort { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ lane_count: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings document"));
    }
}
