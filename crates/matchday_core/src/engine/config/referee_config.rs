use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RefereeMultipliers {
    pub foul: f64,
    pub yellow: f64,
    pub red: f64,
}

impl RefereeMultipliers {
    pub const NEUTRAL: Self = Self { foul: 1.0, yellow: 1.0, red: 1.0 };
}

/// Multiplier sets per referee profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefereeConfig {
    /// (default: 0.90 / 0.90 / 0.90)
    pub lenient: RefereeMultipliers,
    /// (default: 1.0 / 1.0 / 1.0)
    pub neutral: RefereeMultipliers,
    /// (default: 1.10 / 1.15 / 1.15)
    pub strict: RefereeMultipliers,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            lenient: RefereeMultipliers { foul: 0.90, yellow: 0.90, red: 0.90 },
            neutral: RefereeMultipliers::NEUTRAL,
            strict: RefereeMultipliers { foul: 1.10, yellow: 1.15, red: 1.15 },
        }
    }
}
