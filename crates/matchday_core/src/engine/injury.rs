//! Injury risk.

use rand::Rng;

use super::config::InjuryConfig;
use super::player_state::PlayerState;
use super::probability::{clamp01, weighted_index};
use crate::models::InjurySeverity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjuryContext {
    pub strict_referee: bool,
    pub opponent_high_press: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Injury {
    pub severity: InjurySeverity,
    pub requires_substitution: bool,
}

const SEVERITIES: [InjurySeverity; 3] = [InjurySeverity::Minor, InjurySeverity::Moderate, InjurySeverity::Severe];

/// Per-minute injury chance for one player.
pub fn injury_probability(energy: f64, ctx: InjuryContext, cfg: &InjuryConfig) -> f64 {
    if !cfg.enabled {
        return 0.0;
    }
    let mut p = cfg.base_rate;
    if energy < cfg.exhausted_threshold {
        p *= cfg.exhausted_multiplier;
    } else if energy < cfg.tired_threshold {
        p *= cfg.tired_multiplier;
    }
    if ctx.strict_referee && ctx.opponent_high_press {
        p *= cfg.hostile_multiplier;
    }
    if p.is_finite() {
        clamp01(p)
    } else {
        0.0
    }
}

/// Rolls for an injury. Players already carrying one are not re-rolled.
pub fn roll_injury<R: Rng + ?Sized>(
    player: &PlayerState,
    ctx: InjuryContext,
    cfg: &InjuryConfig,
    rng: &mut R,
) -> Option<Injury> {
    if player.injured || player.sent_off {
        return None;
    }
    if rng.gen::<f64>() >= injury_probability(player.energy, ctx, cfg) {
        return None;
    }

    let severity = weighted_index(&cfg.severity_weights, rng)
        .map(|i| SEVERITIES[i])
        .unwrap_or(InjurySeverity::Minor);
    let requires_substitution = rng.gen::<f64>() < cfg.sub_required_probability(severity);
    Some(Injury { severity, requires_substitution })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_probability_scales_with_fatigue_and_context() {
        let cfg = InjuryConfig::default();
        let calm = InjuryContext::default();
        let hostile = InjuryContext { strict_referee: true, opponent_high_press: true };

        assert!((injury_probability(0.9, calm, &cfg) - 0.0008).abs() < 1e-12);
        assert!((injury_probability(0.35, calm, &cfg) - 0.0012).abs() < 1e-12);
        assert!((injury_probability(0.2, calm, &cfg) - 0.0016).abs() < 1e-12);
        assert!((injury_probability(0.9, hostile, &cfg) - 0.00096).abs() < 1e-12);

        let off = InjuryConfig { enabled: false, ..InjuryConfig::default() };
        assert_eq!(injury_probability(0.1, hostile, &off), 0.0);
    }

    #[test]
    fn test_certain_injury_with_forced_rate() {
        let cfg = InjuryConfig { base_rate: 1.0, sub_required: [1.0, 1.0, 1.0], ..InjuryConfig::default() };
        let player = PlayerState::from_player(&Player::new(1, "Glass", Position::DEF), 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let injury = roll_injury(&player, InjuryContext::default(), &cfg, &mut rng).unwrap();
        assert!(injury.requires_substitution);
    }

    #[test]
    fn test_already_injured_not_rolled() {
        let cfg = InjuryConfig { base_rate: 1.0, ..InjuryConfig::default() };
        let mut player = PlayerState::from_player(&Player::new(1, "Hurt", Position::MID), 0.0);
        player.injured = true;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(roll_injury(&player, InjuryContext::default(), &cfg, &mut rng), None);
    }

    #[test]
    fn test_severity_mix_mostly_minor() {
        let cfg = InjuryConfig { base_rate: 1.0, ..InjuryConfig::default() };
        let player = PlayerState::from_player(&Player::new(1, "Often", Position::FWD), 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let minor = (0..1000)
            .filter_map(|_| roll_injury(&player, InjuryContext::default(), &cfg, &mut rng))
            .filter(|i| i.severity == InjurySeverity::Minor)
            .count();
        assert!((620..780).contains(&minor), "minor {minor}");
    }
}
