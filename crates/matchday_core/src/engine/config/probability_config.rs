//! Event probability tunables
//!
//! The constants are hand-tuned, not calibrated against real match data.

use serde::{Deserialize, Serialize};

use super::multipliers::{ByPosition, ByPressing, ByStyle};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbabilityConfig {
    pub possession: PossessionConfig,
    pub foul: FoulConfig,
    pub card: CardConfig,
    pub shot: ShotConfig,
    pub set_piece: SetPieceConfig,
    pub duel: DuelConfig,
}

/// Control share model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PossessionConfig {
    /// Rank weights for the top-N players of a unit (default: 1.0, 0.9, 0.8, 0.7, 0.6)
    pub rank_weights: Vec<f64>,
    /// Unit weights in team strength (default: mid 0.5, attack 0.25, defense 0.25)
    pub midfield_weight: f64,
    pub attack_weight: f64,
    pub defense_weight: f64,
    /// Style multiplier (default: 1.1 / 1.0 / 0.9)
    pub style: ByStyle,
    /// Pressing multiplier (default: 0.97 / 1.0 / 1.04)
    pub pressing: ByPressing,
    /// Width matching the attack channel (wide+wings, narrow+center) (default: 1.02)
    pub width_synergy: f64,
    /// Width working against the channel (default: 0.99)
    pub width_mismatch: f64,
    /// Share bounds (default: 0.05..=0.95)
    pub min_share: f64,
    pub max_share: f64,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            rank_weights: vec![1.0, 0.9, 0.8, 0.7, 0.6],
            midfield_weight: 0.5,
            attack_weight: 0.25,
            defense_weight: 0.25,
            style: ByStyle::new(1.1, 1.0, 0.9),
            pressing: ByPressing::new(0.97, 1.0, 1.04),
            width_synergy: 1.02,
            width_mismatch: 0.99,
            min_share: 0.05,
            max_share: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FoulConfig {
    /// Base per-minute foul rate (default: 0.12)
    pub base_rate: f64,
    /// Defending style bonus (default: attacking 0.95, defensive 1.15)
    pub defending_style: ByStyle,
    /// Defending pressing modifier (default: 0.85 / 1.0 / 1.2)
    pub pressing: ByPressing,
    /// Skew per point of mean aggression above 50 (default: 0.005)
    pub aggression_skew: f64,
    /// Upper clamp (default: 0.35)
    pub max_probability: f64,
    /// Sanctioned-player weight by position (default: GK 0.2, DEF 3.0, MID 2.0, FWD 1.0)
    pub offender_weights: ByPosition,
}

impl Default for FoulConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.12,
            defending_style: ByStyle::new(0.95, 1.0, 1.15),
            pressing: ByPressing::new(0.85, 1.0, 1.2),
            aggression_skew: 0.005,
            max_probability: 0.35,
            offender_weights: ByPosition::new(0.2, 3.0, 2.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardConfig {
    /// (default: 0.27)
    pub yellow_base: f64,
    /// (default: 0.03)
    pub red_base: f64,
    /// Chance that a booked player's yellow-card offence brings the second
    /// yellow; otherwise he is let off (default: 0.25)
    pub second_yellow_upgrade: f64,
    /// Weight of `(aggression-50)/50` (default: yellow 0.08, red 0.01)
    pub yellow_aggression: f64,
    pub red_aggression: f64,
    /// Weight of `(decisions-50)/50`, subtracted (default: yellow 0.05, red 0.005)
    pub yellow_decisions: f64,
    pub red_decisions: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            yellow_base: 0.27,
            red_base: 0.03,
            second_yellow_upgrade: 0.25,
            yellow_aggression: 0.08,
            red_aggression: 0.01,
            yellow_decisions: 0.05,
            red_decisions: 0.005,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShotConfig {
    // === Shot occurrence ===
    /// (default: 0.26)
    pub base_rate: f64,
    /// Attacking style multiplier (default: 1.2 / 1.0 / 0.8)
    pub style: ByStyle,
    /// Attack channel multiplier (default: wings 0.97, center 1.03)
    pub wings_channel: f64,
    pub center_channel: f64,
    /// Own pressing (default: 0.95 / 1.0 / 1.05)
    pub pressing: ByPressing,
    /// Bounds (default: 0.05..=0.60)
    pub min_probability: f64,
    pub max_probability: f64,
    /// Shooter weight by position (default: GK 0.05, DEF 0.7, MID 2.0, FWD 3.0)
    pub shooter_weights: ByPosition,

    // === On target ===
    /// (default: 0.38, exponent 0.6, bounds 0.15..=0.75)
    pub on_target_base: f64,
    pub on_target_exponent: f64,
    pub on_target_min: f64,
    pub on_target_max: f64,

    // === Goal ===
    /// (default: 0.26, bounds 0.08..=0.55)
    pub goal_base: f64,
    pub goal_min: f64,
    pub goal_max: f64,

    // === Corners ===
    /// Off-target shot deflected for a corner (default: 0.28)
    pub blocked_corner: f64,
    /// Save pushed behind for a corner (default: 0.30)
    pub parried_corner: f64,
    /// Applied to both when the previous event was a corner (default: 0.4)
    pub corner_repeat_damping: f64,
    /// Corner leads to a header attempt (default: 0.30)
    pub corner_header: f64,

    /// Goal carries an assist (default: 0.65)
    pub assist_probability: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.26,
            style: ByStyle::new(1.2, 1.0, 0.8),
            wings_channel: 0.97,
            center_channel: 1.03,
            pressing: ByPressing::new(0.95, 1.0, 1.05),
            min_probability: 0.05,
            max_probability: 0.60,
            shooter_weights: ByPosition::new(0.05, 0.7, 2.0, 3.0),
            on_target_base: 0.38,
            on_target_exponent: 0.6,
            on_target_min: 0.15,
            on_target_max: 0.75,
            goal_base: 0.26,
            goal_min: 0.08,
            goal_max: 0.55,
            blocked_corner: 0.28,
            parried_corner: 0.30,
            corner_repeat_damping: 0.4,
            corner_header: 0.30,
            assist_probability: 0.65,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SetPieceConfig {
    /// Foul happened inside the box (default: 0.22)
    pub in_box: f64,
    /// In-box foul given as a penalty (default: 0.30)
    pub penalty_given: f64,
    /// (default: 0.76)
    pub penalty_conversion: f64,
    /// A missed penalty is still on target, i.e. saved (default: 0.55)
    pub penalty_miss_saved: f64,
    /// Direct free kick scores (default: 0.07)
    pub freekick_conversion: f64,
}

impl Default for SetPieceConfig {
    fn default() -> Self {
        Self {
            in_box: 0.22,
            penalty_given: 0.30,
            penalty_conversion: 0.76,
            penalty_miss_saved: 0.55,
            freekick_conversion: 0.07,
        }
    }
}

/// Attribute duel sub-resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DuelConfig {
    /// Action weights (default: dribble 0.35, pass 0.30, shot 0.20, tackle 0.15)
    pub dribble_weight: f64,
    pub pass_weight: f64,
    pub shot_weight: f64,
    pub tackle_weight: f64,
    /// Attacking teams shoot more (default: x1.3), defensive teams less (x0.75)
    pub attacking_shot_bias: f64,
    pub defensive_shot_bias: f64,
    /// Wing play dribbles more (default: x1.2), central play passes more (x1.2)
    pub wings_dribble_bias: f64,
    pub center_pass_bias: f64,
    /// Score edge for the side whose style matches the action (default: 1.05)
    pub style_edge: f64,
    /// Slope of the clamped linear win curve (default: 0.9)
    pub slope: f64,
    /// Win probability bounds (default: 0.15..=0.85)
    pub min_probability: f64,
    pub max_probability: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            dribble_weight: 0.35,
            pass_weight: 0.30,
            shot_weight: 0.20,
            tackle_weight: 0.15,
            attacking_shot_bias: 1.3,
            defensive_shot_bias: 0.75,
            wings_dribble_bias: 1.2,
            center_pass_bias: 1.2,
            style_edge: 1.05,
            slope: 0.9,
            min_probability: 0.15,
            max_probability: 0.85,
        }
    }
}
