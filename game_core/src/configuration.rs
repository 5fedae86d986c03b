use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, LatLng};
use crate::luck::SpawnPolicy;
use crate::prelude::*;

/// Location of the classroom the game world is centered on.
pub const OAKES_CLASSROOM: LatLng = LatLng {
    lat: 36.98949379578401,
    lng: -122.06277128548504,
};

/// Largest accepted neighborhood size or visibility radius, in tiles.
pub const MAX_RADIUS: u32 = i32::MAX as u32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration value [{field}]: {reason}")]
    Invalid { field: &'static str, reason: String },
}

type Result<T> = std::result::Result<T, ConfigError>;

/// Tunable gameplay parameters. Fixed once a session starts.
#[derive(Clone, Debug, Deserialize, PartialEq, Resource, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfiguration {
    pub origin: LatLng,
    /// Width of a cell in degrees.
    pub tile_degrees: f64,
    /// Spawn decisions cover offsets in `[-neighborhood_size, neighborhood_size)`
    /// around the player.
    pub neighborhood_size: u32,
    pub visibility_radius: u32,
    pub cache_spawn_probability: f64,
    pub coin_thresholds: Vec<u32>,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        GameConfiguration {
            origin: OAKES_CLASSROOM,
            tile_degrees: 1e-4,
            neighborhood_size: 8,
            visibility_radius: 8,
            cache_spawn_probability: 0.1,
            coin_thresholds: vec![0, 33, 66],
        }
    }
}

impl GameConfiguration {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfiguration = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded configuration from {}", path.to_string_lossy());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tile_degrees > 0.0 && self.tile_degrees.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "tile_degrees",
                reason: format!("must be a positive number, was {}", self.tile_degrees),
            });
        }
        for (field, value) in [
            ("neighborhood_size", self.neighborhood_size),
            ("visibility_radius", self.visibility_radius),
        ] {
            if value > MAX_RADIUS {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be at most {MAX_RADIUS}, was {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.cache_spawn_probability) {
            return Err(ConfigError::Invalid {
                field: "cache_spawn_probability",
                reason: format!(
                    "must be between 0 and 1, was {}",
                    self.cache_spawn_probability
                ),
            });
        }
        if self.coin_thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Invalid {
                field: "coin_thresholds",
                reason: format!(
                    "must be strictly ascending, was {:?}",
                    self.coin_thresholds
                ),
            });
        }
        Ok(())
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy::new(self.cache_spawn_probability, self.coin_thresholds.clone())
    }

    pub fn board(&self) -> Board {
        Board::new(self.origin, self.tile_degrees, self.visibility_radius)
    }
}
