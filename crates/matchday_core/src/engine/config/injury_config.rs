use serde::{Deserialize, Serialize};

use crate::models::InjurySeverity;

/// Injury risk parameters. One active player per team is sampled each minute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InjuryConfig {
    pub enabled: bool,
    /// Base injury probability per sampled player per minute (default: 0.0008)
    pub base_rate: f64,
    /// Below this energy the rate is multiplied by `tired_multiplier` (default: 0.40, x1.5)
    pub tired_threshold: f64,
    pub tired_multiplier: f64,
    /// Below this energy the rate is multiplied by `exhausted_multiplier` instead (default: 0.25, x2.0)
    pub exhausted_threshold: f64,
    pub exhausted_multiplier: f64,
    /// Strict referee facing a high press (default: x1.2)
    pub hostile_multiplier: f64,
    /// Severity weights (default: 0.70 / 0.23 / 0.07)
    pub severity_weights: [f64; 3],
    /// Probability that the severity forces a substitution (default: 0.10 / 0.50 / 0.90)
    pub sub_required: [f64; 3],
    /// Effective-rating multiplier while playing on injured (default: 0.85)
    pub injured_rating_multiplier: f64,
}

impl InjuryConfig {
    pub fn sub_required_probability(&self, severity: InjurySeverity) -> f64 {
        match severity {
            InjurySeverity::Minor => self.sub_required[0],
            InjurySeverity::Moderate => self.sub_required[1],
            InjurySeverity::Severe => self.sub_required[2],
        }
    }
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_rate: 0.0008,
            tired_threshold: 0.40,
            tired_multiplier: 1.5,
            exhausted_threshold: 0.25,
            exhausted_multiplier: 2.0,
            hostile_multiplier: 1.2,
            severity_weights: [0.70, 0.23, 0.07],
            sub_required: [0.10, 0.50, 0.90],
            injured_rating_multiplier: 0.85,
        }
    }
}
