//! Possession / control model.
//!
//! Each team gets attack, midfield and defense composites (rank-weighted
//! means of the best players in the unit); the per-minute chance of holding
//! the ball is the normalized ratio of the two teams' tactical strength.

use super::config::{EngineConfig, PossessionConfig};
use super::team_state::TeamState;
use crate::models::{AttackChannel, Position, Width};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamRatings {
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
}

impl Default for TeamRatings {
    fn default() -> Self {
        Self { attack: 50.0, midfield: 50.0, defense: 50.0 }
    }
}

impl TeamRatings {
    pub fn compute(team: &TeamState, minute: u8, cfg: &EngineConfig) -> Self {
        let weights = &cfg.probability.possession.rank_weights;
        let unit = |positions: &[Position]| {
            let mut pool = team.active_at(positions);
            if pool.is_empty() {
                pool = team.active_outfield();
            }
            if pool.is_empty() {
                pool = team.active.clone();
            }
            let mut ratings: Vec<f64> = pool.iter().map(|&idx| team.players[idx].overall(minute, cfg)).collect();
            if ratings.is_empty() {
                ratings.push(team.placeholder.overall(minute, cfg));
            }
            top_weighted_mean(ratings, weights)
        };

        Self {
            attack: unit(&[Position::FWD, Position::MID]),
            midfield: unit(&[Position::MID]),
            defense: unit(&[Position::DEF, Position::GK]),
        }
    }
}

/// Rank-weighted mean of the highest values; plain mean when `weights` is
/// empty.
pub fn top_weighted_mean(mut values: Vec<f64>, weights: &[f64]) -> f64 {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| b.total_cmp(a));

    if weights.is_empty() {
        return values.iter().sum::<f64>() / values.len() as f64;
    }

    let (sum, weight) = values
        .iter()
        .zip(weights.iter().filter(|w| w.is_finite() && **w > 0.0))
        .fold((0.0, 0.0), |(s, w), (v, wt)| (s + v * wt, w + wt));
    if weight > 0.0 {
        sum / weight
    } else {
        values[0]
    }
}

fn width_factor(width: Width, channel: AttackChannel, cfg: &PossessionConfig) -> f64 {
    match (width, channel) {
        (Width::Wide, AttackChannel::Wings) | (Width::Narrow, AttackChannel::Center) => cfg.width_synergy,
        (Width::Wide, AttackChannel::Center) | (Width::Narrow, AttackChannel::Wings) => cfg.width_mismatch,
        (Width::Normal, _) => 1.0,
    }
}

/// Tactical strength used for the control share.
pub fn team_strength(team: &TeamState, cfg: &PossessionConfig) -> f64 {
    let r = &team.ratings;
    let base = cfg.midfield_weight * r.midfield + cfg.attack_weight * r.attack + cfg.defense_weight * r.defense;
    base * cfg.style.get(team.style) * cfg.pressing.get(team.pressing) * width_factor(team.width, team.attack_channel, cfg)
}

/// Probability that `team` holds the ball this minute against `opponent`.
/// The two directions always sum to 1; a degenerate pair yields 0.5.
pub fn control_share(team: &TeamState, opponent: &TeamState, cfg: &PossessionConfig) -> f64 {
    let own = team_strength(team, cfg).max(0.0);
    let other = team_strength(opponent, cfg).max(0.0);
    let total = own + other;
    if !total.is_finite() || total <= 0.0 {
        return 0.5;
    }
    let lo = cfg.min_share.min(cfg.max_share);
    let hi = cfg.max_share.max(cfg.min_share);
    // Only symmetric bounds keep share(a, b) + share(b, a) == 1
    if (lo + hi - 1.0).abs() < 1e-9 {
        (own / total).clamp(lo, hi)
    } else {
        own / total
    }
}
