//! Probability calculation utilities for match simulation
//!
//! All functions are pure - they take ratings as input and return
//! probabilities. Draws happen in the callers, from the match RNG.

use rand::Rng;

use super::config::{CardConfig, RefereeMultipliers, ShotConfig, XgConfig};
use crate::error::ResolverError;

// ============================================================================
// Guards
// ============================================================================

/// Rejects NaN and infinities so a broken tunable degrades one minute
/// instead of silently skewing the whole match.
#[inline]
pub fn checked(name: &'static str, value: f64) -> Result<f64, ResolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ResolverError::InvalidProbability { name, value })
    }
}

pub fn clamp_probability(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ResolverError> {
    Ok(checked(name, value)?.clamp(min.min(max), max.max(min)))
}

#[inline]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// `num / den`, or 1.0 when the denominator is not positive.
#[inline]
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 && num.is_finite() {
        (num / den).max(0.0)
    } else {
        1.0
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Picks an index proportionally to `weights` with a single draw.
/// Non-positive and non-finite weights never win. `None` if nothing can.
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().map(|&w| usable(w)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut target = rng.gen::<f64>() * total;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        let w = usable(w);
        if w <= 0.0 {
            continue;
        }
        if target < w {
            return Some(i);
        }
        target -= w;
        last = Some(i);
    }
    // Floating-point remainder lands on the last usable entry
    last
}

// ============================================================================
// Contest curve
// ============================================================================

/// Bounded win probability from a score ratio.
///
/// Not a sigmoid: a linear ramp `0.5 + (ratio - 1) * slope` clamped to
/// `[min, max]`, so even a hopeless mismatch keeps a floor chance.
#[inline]
pub fn clamped_linear_win(ratio: f64, slope: f64, min: f64, max: f64) -> f64 {
    (0.5 + (ratio - 1.0) * slope).clamp(min, max)
}

// ============================================================================
// Shooting
// ============================================================================

/// On-target chance from shooter finishing against the defending rating.
pub fn on_target_probability(finishing: f64, defense: f64, cfg: &ShotConfig) -> f64 {
    let ratio = safe_ratio(finishing, defense).powf(cfg.on_target_exponent);
    (cfg.on_target_base * ratio).clamp(cfg.on_target_min, cfg.on_target_max)
}

/// Goal chance of an on-target shot from shot power against the keeper.
pub fn goal_probability(shot_power: f64, keeper: f64, cfg: &ShotConfig) -> f64 {
    (cfg.goal_base * safe_ratio(shot_power, keeper)).clamp(cfg.goal_min, cfg.goal_max)
}

/// Open-play expected goals. The minute bonus is a legacy tuning quirk kept
/// for parity with historical numbers.
pub fn open_play_xg(on_target: bool, recent_duel_win: bool, minute: u8, cfg: &XgConfig) -> f64 {
    let mut xg = cfg.open_play_base;
    if on_target {
        xg += cfg.on_target_bonus;
    }
    if recent_duel_win {
        xg += cfg.recent_duel_bonus;
    }
    if minute % 5 == 0 {
        xg += cfg.five_minute_bonus;
    }
    xg.clamp(cfg.min, cfg.max)
}

// ============================================================================
// Discipline
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardProbabilities {
    pub yellow: f64,
    pub red: f64,
}

/// Card chances for the sanctioned player of a foul.
///
/// Each is `base + w_aggr·(aggression-50)/50 - w_dec·(decisions-50)/50`,
/// scaled by the referee multiplier and clamped to `[0, 1]`.
pub fn card_probabilities(
    aggression: f64,
    decisions: f64,
    referee: &RefereeMultipliers,
    cfg: &CardConfig,
) -> CardProbabilities {
    let aggr = (aggression - 50.0) / 50.0;
    let decis = (decisions - 50.0) / 50.0;

    let red = (cfg.red_base + cfg.red_aggression * aggr - cfg.red_decisions * decis) * referee.red;
    let yellow = (cfg.yellow_base + cfg.yellow_aggression * aggr - cfg.yellow_decisions * decis) * referee.yellow;

    CardProbabilities { yellow: clamp01(yellow), red: clamp01(red) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{CardConfig, ShotConfig, XgConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_checked_rejects_nan() {
        assert!(checked("x", 0.3).is_ok());
        assert_eq!(
            checked("foul", f64::INFINITY),
            Err(ResolverError::InvalidProbability { name: "foul", value: f64::INFINITY })
        );
        assert!(clamp_probability("shot", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_clamped_linear_win_bounds() {
        assert!((clamped_linear_win(1.0, 0.9, 0.15, 0.85) - 0.5).abs() < 1e-12);
        assert_eq!(clamped_linear_win(10.0, 0.9, 0.15, 0.85), 0.85);
        assert_eq!(clamped_linear_win(0.0, 0.9, 0.15, 0.85), 0.15);
        assert!(clamped_linear_win(1.1, 0.9, 0.15, 0.85) > 0.5);
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let idx = weighted_index(&[0.0, 2.0, f64::NAN, 1.0], &mut rng).unwrap();
            assert!(idx == 1 || idx == 3);
        }
        assert_eq!(weighted_index(&[0.0, -1.0], &mut rng), None);
        assert_eq!(weighted_index(&[], &mut rng), None);
    }

    #[test]
    fn test_weighted_index_roughly_proportional() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut hits = [0u32; 2];
        for _ in 0..4000 {
            hits[weighted_index(&[3.0, 1.0], &mut rng).unwrap()] += 1;
        }
        let share = hits[0] as f64 / 4000.0;
        assert!((0.70..0.80).contains(&share), "share {share}");
    }

    #[test]
    fn test_shot_probabilities_respect_bounds() {
        let cfg = ShotConfig::default();
        assert!((on_target_probability(70.0, 70.0, &cfg) - 0.38).abs() < 1e-9);
        assert_eq!(on_target_probability(100.0, 1.0, &cfg), cfg.on_target_max);
        assert_eq!(on_target_probability(1.0, 100.0, &cfg), cfg.on_target_min);
        assert!((goal_probability(60.0, 60.0, &cfg) - 0.26).abs() < 1e-9);
        assert_eq!(goal_probability(60.0, 0.0, &cfg), 0.26);
    }

    #[test]
    fn test_open_play_xg() {
        let cfg = XgConfig::default();
        assert!((open_play_xg(false, false, 7, &cfg) - 0.08).abs() < 1e-9);
        assert!((open_play_xg(true, true, 10, &cfg) - 0.32).abs() < 1e-9);
        assert!(open_play_xg(true, true, 10, &cfg) <= cfg.max);
    }

    #[test]
    fn test_card_probabilities_neutral_player() {
        let cfg = CardConfig::default();
        let probs = card_probabilities(50.0, 50.0, &RefereeMultipliers::NEUTRAL, &cfg);
        assert!((probs.yellow - 0.27).abs() < 1e-9);
        assert!((probs.red - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_card_probabilities_aggression_and_decisions() {
        let cfg = CardConfig::default();
        let hothead = card_probabilities(100.0, 0.0, &RefereeMultipliers::NEUTRAL, &cfg);
        // 0.27 + 0.08 + 0.05
        assert!((hothead.yellow - 0.40).abs() < 1e-9);
        let calm = card_probabilities(0.0, 100.0, &RefereeMultipliers::NEUTRAL, &cfg);
        assert!((calm.yellow - 0.14).abs() < 1e-9);
        assert!(calm.red >= 0.0);
    }
}
