//! Referee profiles scaling foul and card probabilities.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::config::{RefereeConfig, RefereeMultipliers};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefereeProfile {
    Lenient,
    #[default]
    Neutral,
    Strict,
}

impl RefereeProfile {
    pub const ALL: [RefereeProfile; 3] = [RefereeProfile::Lenient, RefereeProfile::Neutral, RefereeProfile::Strict];

    pub fn as_str(&self) -> &'static str {
        match self {
            RefereeProfile::Lenient => "lenient",
            RefereeProfile::Neutral => "neutral",
            RefereeProfile::Strict => "strict",
        }
    }
}

impl fmt::Display for RefereeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the match referee is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefereeSelector {
    /// Drawn from the match RNG
    Random,
    Fixed(RefereeProfile),
}

impl Default for RefereeSelector {
    fn default() -> Self {
        RefereeSelector::Fixed(RefereeProfile::Neutral)
    }
}

impl RefereeSelector {
    /// Lenient parsing for caller-supplied keys: anything unknown is neutral.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!(key, "unknown referee profile, falling back to neutral");
            RefereeSelector::default()
        })
    }

    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> RefereeProfile {
        match self {
            RefereeSelector::Random => RefereeProfile::ALL[rng.gen_range(0..RefereeProfile::ALL.len())],
            RefereeSelector::Fixed(profile) => profile,
        }
    }
}

impl FromStr for RefereeSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(RefereeSelector::Random),
            "lenient" => Ok(RefereeSelector::Fixed(RefereeProfile::Lenient)),
            "neutral" | "" => Ok(RefereeSelector::Fixed(RefereeProfile::Neutral)),
            "strict" => Ok(RefereeSelector::Fixed(RefereeProfile::Strict)),
            other => Err(format!("Invalid referee profile: {}", other)),
        }
    }
}

/// The referee officiating one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Referee {
    pub profile: RefereeProfile,
    pub multipliers: RefereeMultipliers,
}

impl Referee {
    pub fn new(profile: RefereeProfile, cfg: &RefereeConfig) -> Self {
        let multipliers = match profile {
            RefereeProfile::Lenient => cfg.lenient,
            RefereeProfile::Neutral => cfg.neutral,
            RefereeProfile::Strict => cfg.strict,
        };
        Self { profile, multipliers }
    }

    pub fn is_strict(&self) -> bool {
        self.profile == RefereeProfile::Strict
    }
}
