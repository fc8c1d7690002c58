//! Stoppage-time accounting.

use crate::engine::config::StoppageConfig;

/// Stoppage-worthy occurrences. Each adds its configured weight to the
/// match's disruption total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disruption {
    Foul,
    Card,
    Goal,
    SetPiece,
    Substitution,
    Injury,
}

impl Disruption {
    pub fn weight(self, cfg: &StoppageConfig) -> f64 {
        let w = match self {
            Disruption::Foul => cfg.foul,
            Disruption::Card => cfg.card,
            Disruption::Goal => cfg.goal,
            Disruption::SetPiece => cfg.set_piece,
            Disruption::Substitution => cfg.substitution,
            Disruption::Injury => cfg.injury,
        };
        if w.is_finite() {
            w.max(0.0)
        } else {
            0.0
        }
    }
}

/// `round(base + disruption + jitter)` clamped to the configured bounds.
/// `unit_draw` is a uniform draw in `[0, 1)` mapped onto `[-jitter, jitter)`.
pub fn stoppage_minutes(disruption: f64, unit_draw: f64, cfg: &StoppageConfig) -> u8 {
    let (lo, hi) = (cfg.min_minutes.min(cfg.max_minutes), cfg.max_minutes.max(cfg.min_minutes));
    let jitter = (unit_draw * 2.0 - 1.0) * cfg.jitter;
    let raw = (cfg.base + disruption + jitter).round();
    if !raw.is_finite() {
        return lo;
    }
    raw.clamp(lo as f64, hi as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_match_gets_minimum() {
        let cfg = StoppageConfig::default();
        assert_eq!(stoppage_minutes(0.0, 0.5, &cfg), cfg.min_minutes);
        assert_eq!(stoppage_minutes(0.0, 0.0, &cfg), cfg.min_minutes);
    }

    #[test]
    fn test_busy_match_capped() {
        let cfg = StoppageConfig::default();
        assert_eq!(stoppage_minutes(3.2, 0.5, &cfg), 4);
        assert_eq!(stoppage_minutes(40.0, 0.9, &cfg), cfg.max_minutes);
        assert_eq!(stoppage_minutes(f64::NAN, 0.5, &cfg), cfg.min_minutes);
    }

    #[test]
    fn test_weights_never_negative() {
        let cfg = StoppageConfig { goal: -1.0, injury: f64::INFINITY, ..StoppageConfig::default() };
        assert_eq!(Disruption::Goal.weight(&cfg), 0.0);
        assert_eq!(Disruption::Injury.weight(&cfg), 0.0);
        assert_eq!(Disruption::Card.weight(&cfg), cfg.card);
    }
}
