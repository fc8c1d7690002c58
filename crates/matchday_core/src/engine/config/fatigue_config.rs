//! Fatigue and distance configuration

use serde::{Deserialize, Serialize};

use super::multipliers::{ByPosition, ByPressing, ByStyle, ByWorkRate};

/// Per-minute energy drain parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FatigueConfig {
    // === Drain ===
    /// Base energy drain per minute (default: 0.0025)
    pub base_drain: f64,
    /// Work-rate multiplier (default: 0.8 / 1.0 / 1.25)
    pub work_rate: ByWorkRate,
    /// Position multiplier (default: GK 0.5, DEF 0.9, MID 1.1, FWD 1.0)
    pub position: ByPosition,
    /// Stamina attribute pivot; players above it drain slower (default: 60)
    pub stamina_pivot: f64,
    /// Divisor applied to `stamina - pivot` (default: 400)
    pub stamina_divisor: f64,
    /// Bounds of the stamina multiplier (default: 0.9..=1.1)
    pub stamina_min: f64,
    pub stamina_max: f64,
    /// Extra team drain fraction by style (default: attacking +0.05, defensive -0.03)
    pub style_extra: ByStyle,
    /// Extra team drain fraction by pressing (default: high +0.15)
    pub pressing_extra: ByPressing,
    /// Extra drain for a duel participant (default: 0.002)
    pub duel_drain: f64,
    /// Extra drain for a successful sprint (default: 0.0025)
    pub sprint_drain: f64,
    /// Energy never drops below this (default: 0.05)
    pub energy_floor: f64,

    // === Effective skill ===
    /// Energy thresholds and their skill multipliers, checked low to high
    /// (default: <0.30 x0.75, <0.50 x0.88, <0.70 x0.95)
    pub skill_thresholds: Vec<(f64, f64)>,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            base_drain: 0.0025,
            work_rate: ByWorkRate::new(0.8, 1.0, 1.25),
            position: ByPosition::new(0.5, 0.9, 1.1, 1.0),
            stamina_pivot: 60.0,
            stamina_divisor: 400.0,
            stamina_min: 0.9,
            stamina_max: 1.1,
            style_extra: ByStyle::new(0.05, 0.0, -0.03),
            pressing_extra: ByPressing::new(0.0, 0.0, 0.15),
            duel_drain: 0.002,
            sprint_drain: 0.0025,
            energy_floor: 0.05,
            skill_thresholds: vec![(0.30, 0.75), (0.50, 0.88), (0.70, 0.95)],
        }
    }
}

/// Distance covered per minute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DistanceConfig {
    /// Base distance in km per minute (default: 0.115)
    pub base_km_per_minute: f64,
    /// Style multiplier (default: 1.03 / 1.0 / 0.98)
    pub style: ByStyle,
    /// Pressing multiplier (default: 0.97 / 1.0 / 1.05)
    pub pressing: ByPressing,
    /// Position multiplier (default: GK 0.50, DEF 0.95, MID 1.06, FWD 1.00)
    pub position: ByPosition,
    /// Work-rate multiplier (default: 0.95 / 1.0 / 1.07)
    pub work_rate: ByWorkRate,
    /// Per-player jitter is drawn once from [-jitter, jitter] (default: 0.07)
    pub jitter: f64,
    /// Extra km for a successful sprint (default: 0.03)
    pub sprint_boost_km: f64,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            base_km_per_minute: 0.115,
            style: ByStyle::new(1.03, 1.0, 0.98),
            pressing: ByPressing::new(0.97, 1.0, 1.05),
            position: ByPosition::new(0.50, 0.95, 1.06, 1.00),
            work_rate: ByWorkRate::new(0.95, 1.0, 1.07),
            jitter: 0.07,
            sprint_boost_km: 0.03,
        }
    }
}

impl DistanceConfig {
    /// Jitter bound used for drawing, within [0, 1]; non-finite values disable it.
    pub fn clamped_jitter(&self) -> f64 {
        if self.jitter.is_finite() {
            self.jitter.abs().min(1.0)
        } else {
            0.0
        }
    }
}
