//! Fouls and cards.

use rand::Rng;

use super::config::{CardConfig, FoulConfig};
use super::probability::{self, CardProbabilities};
use super::referee::Referee;
use super::team_state::TeamState;
use crate::error::ResolverError;
use crate::models::CardKind;

/// Chance that the defending team commits a foul this minute:
/// base × style bonus × pressing × aggression skew × referee, clamped to
/// `[0, max_probability]`.
pub fn foul_probability(defending: &TeamState, referee: &Referee, cfg: &FoulConfig) -> Result<f64, ResolverError> {
    let aggression = defending.mean_active_attribute(|p| p.attributes.mental.aggression);
    let skew = 1.0 + (aggression - 50.0) * cfg.aggression_skew;
    let p = cfg.base_rate
        * cfg.defending_style.get(defending.style)
        * cfg.pressing.get(defending.pressing)
        * skew.max(0.0)
        * referee.multipliers.foul;
    probability::clamp_probability("foul", p, 0.0, cfg.max_probability)
}

/// At most one card per foul.
///
/// Direct red is rolled first, then yellow. A yellow-card offence by a
/// player already booked becomes a second yellow with probability
/// `second_yellow_upgrade`; otherwise the player escapes without a card.
pub fn roll_card<R: Rng + ?Sized>(
    probs: CardProbabilities,
    prior_yellows: u8,
    cfg: &CardConfig,
    rng: &mut R,
) -> Option<CardKind> {
    if rng.gen::<f64>() < probs.red {
        return Some(CardKind::Red);
    }
    if rng.gen::<f64>() >= probs.yellow {
        return None;
    }
    if prior_yellows == 0 {
        return Some(CardKind::Yellow);
    }
    if rng.gen::<f64>() < cfg.second_yellow_upgrade {
        Some(CardKind::SecondYellow)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{EngineConfig, RefereeConfig};
    use crate::engine::referee::RefereeProfile;
    use crate::engine::test_support::{balanced_team, ScriptedRng};
    use crate::models::{Pressing, Style};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(style: Style, pressing: Pressing) -> TeamState {
        let team = balanced_team("Fouls", 1, 11, 60).with_tactics(style, pressing);
        TeamState::from_team(&team, &EngineConfig::default(), &mut ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_foul_probability_modifiers() {
        let cfg = FoulConfig::default();
        let neutral = Referee::new(RefereeProfile::Neutral, &RefereeConfig::default());

        // balanced_team uses aggression 50
        let base = foul_probability(&state(Style::Balanced, Pressing::Normal), &neutral, &cfg).unwrap();
        assert!((base - 0.12).abs() < 1e-9);

        let parked = foul_probability(&state(Style::Defensive, Pressing::High), &neutral, &cfg).unwrap();
        assert!((parked - 0.12 * 1.15 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_foul_probability_clamped() {
        let cfg = FoulConfig { base_rate: 0.9, ..FoulConfig::default() };
        let strict = Referee::new(RefereeProfile::Strict, &RefereeConfig::default());
        let p = foul_probability(&state(Style::Defensive, Pressing::High), &strict, &cfg).unwrap();
        assert_eq!(p, cfg.max_probability);
    }

    #[test]
    fn test_nan_base_rate_is_an_error() {
        let cfg = FoulConfig { base_rate: f64::NAN, ..FoulConfig::default() };
        let neutral = Referee::new(RefereeProfile::Neutral, &RefereeConfig::default());
        assert!(foul_probability(&state(Style::Balanced, Pressing::Normal), &neutral, &cfg).is_err());
    }

    #[test]
    fn test_strict_referee_books_at_least_as_often_for_same_draws() {
        let card_cfg = CardConfig::default();
        let referees = RefereeConfig::default();
        let strict = Referee::new(RefereeProfile::Strict, &referees);
        let lenient = Referee::new(RefereeProfile::Lenient, &referees);

        let mut strict_yellows = 0;
        let mut lenient_yellows = 0;
        // Same (red, yellow) draw pair for both referees, over a grid
        for i in 0..50 {
            for j in 0..50 {
                let draws = [0.02 * i as f64 + 0.01, 0.02 * j as f64 + 0.01];
                for aggression in [30.0, 50.0, 80.0] {
                    let s = probability::card_probabilities(aggression, 50.0, &strict.multipliers, &card_cfg);
                    let l = probability::card_probabilities(aggression, 50.0, &lenient.multipliers, &card_cfg);
                    let s_card = roll_card(s, 0, &card_cfg, &mut ScriptedRng::new(&draws));
                    let l_card = roll_card(l, 0, &card_cfg, &mut ScriptedRng::new(&draws));
                    if s_card == Some(CardKind::Yellow) {
                        strict_yellows += 1;
                    }
                    if l_card == Some(CardKind::Yellow) {
                        lenient_yellows += 1;
                    }
                    // Anything the lenient referee shows, the strict one shows too
                    if l_card.is_some() {
                        assert!(s_card.is_some());
                    }
                }
            }
        }
        assert!(strict_yellows >= lenient_yellows);
        assert!(strict_yellows > 0);
    }

    #[test]
    fn test_fixed_draw_yellow_only_for_strict() {
        let card_cfg = CardConfig::default();
        let referees = RefereeConfig::default();
        let probs = |profile| {
            let referee = Referee::new(profile, &referees);
            probability::card_probabilities(50.0, 50.0, &referee.multipliers, &card_cfg)
        };
        // 0.28 clears neither red; sits between lenient (0.243) and strict (0.3105) yellow
        let draws = [0.9, 0.28];
        let strict = roll_card(probs(RefereeProfile::Strict), 0, &card_cfg, &mut ScriptedRng::new(&draws));
        let lenient = roll_card(probs(RefereeProfile::Lenient), 0, &card_cfg, &mut ScriptedRng::new(&draws));
        assert_eq!(strict, Some(CardKind::Yellow));
        assert_eq!(lenient, None);
    }

    #[test]
    fn test_second_yellow_upgrade_or_let_off() {
        let cfg = CardConfig::default();
        let probs = CardProbabilities { yellow: 0.5, red: 0.0 };
        assert_eq!(roll_card(probs, 1, &cfg, &mut ScriptedRng::new(&[0.9, 0.1, 0.1])), Some(CardKind::SecondYellow));
        assert_eq!(roll_card(probs, 1, &cfg, &mut ScriptedRng::new(&[0.9, 0.1, 0.6])), None);
        assert_eq!(roll_card(probs, 0, &cfg, &mut ScriptedRng::new(&[0.9, 0.1])), Some(CardKind::Yellow));
    }

    #[test]
    fn test_direct_red_takes_precedence() {
        let cfg = CardConfig::default();
        let probs = CardProbabilities { yellow: 1.0, red: 0.5 };
        assert_eq!(roll_card(probs, 0, &cfg, &mut ScriptedRng::new(&[0.1])), Some(CardKind::Red));
    }
}
