//! # Engine Configuration
//!
//! Every tuning constant lives here, grouped by concern. Documents are
//! overlaid key by key onto the defaults ([`EngineConfig::from_overrides`]),
//! so a partial YAML or JSON document only overrides what it names, down to
//! single entries of the lookup tables.
//!
//! ```rust
//! use matchday_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.probability.shot.goal_base > config.probability.shot.goal_base);
//! ```

mod fatigue_config;
mod injury_config;
mod multipliers;
mod probability_config;
mod referee_config;
mod rules_config;
mod xg_config;

pub use fatigue_config::{DistanceConfig, FatigueConfig};
pub use injury_config::InjuryConfig;
pub use multipliers::{ByPosition, ByPressing, ByStyle, ByWorkRate};
pub use probability_config::{
    CardConfig, DuelConfig, FoulConfig, PossessionConfig, ProbabilityConfig, SetPieceConfig,
    ShotConfig,
};
pub use referee_config::{RefereeConfig, RefereeMultipliers};
pub use rules_config::{RulesConfig, StoppageConfig, MAX_HALF_LENGTH};
pub use xg_config::XgConfig;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub fatigue: FatigueConfig,
    pub distance: DistanceConfig,
    pub injury: InjuryConfig,
    pub probability: ProbabilityConfig,
    pub xg: XgConfig,
    pub rules: RulesConfig,
    pub referee: RefereeConfig,
}

impl EngineConfig {
    /// Realistic simulation (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More shots, better finishing
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.probability.shot.base_rate = 0.30;
        cfg.probability.shot.goal_base = 0.34;
        cfg.probability.shot.goal_max = 0.65;
        cfg.probability.set_piece.freekick_conversion = 0.10;
        cfg.injury.base_rate = 0.0004;
        cfg
    }

    /// Busier referees: more fouls given, more cards shown
    pub fn strict_officiating() -> Self {
        let mut cfg = Self::default();
        cfg.probability.foul.base_rate = 0.14;
        cfg.probability.card.yellow_base = 0.33;
        cfg.probability.card.red_base = 0.045;
        cfg.probability.card.second_yellow_upgrade = 0.40;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Value = serde_yaml::from_str(yaml)?;
        let cfg = Self::from_overrides(overrides)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Overlays a partial document onto the defaults. Maps merge recursively,
    /// `null` keeps the default, anything else replaces it. Not validated.
    pub fn from_overrides(overrides: Value) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;
        overlay(&mut merged, overrides);
        serde_json::from_value(merged).map_err(|err| MatchError::Config(err.to_string()))
    }

    /// Only the match length can make a match impossible to run; every
    /// other tunable is used as given.
    pub fn validate(&self) -> Result<()> {
        let half_length = self.rules.half_length;
        if half_length == 0 || half_length > MAX_HALF_LENGTH {
            return Err(MatchError::InvalidDuration { half_length, max: MAX_HALF_LENGTH });
        }
        Ok(())
    }
}

fn overlay(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

// ========== Tests ==========
