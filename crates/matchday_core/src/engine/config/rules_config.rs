//! Match structure: timings, substitutions, half-time and stoppage time

use serde::{Deserialize, Serialize};

/// Longest half the engine accepts.
pub const MAX_HALF_LENGTH: u8 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Minutes per half (default: 45)
    pub half_length: u8,
    /// Scheduled duels per half, one per equal segment (default: 3)
    pub duels_per_half: u8,
    /// Planned substitution minutes (default: 60, 75)
    pub substitution_windows: Vec<u8>,
    /// Substitutions per team (default: 3)
    pub substitution_budget: u8,

    // === Half-time ===
    /// Energy restored to each of the most depleted players (default: 0.08)
    pub halftime_regen: f64,
    /// How many players per team receive it (default: 6)
    pub halftime_regen_players: usize,
    /// Rating buff for the top-rated player, percent (default: 10)
    pub halftime_buff_percent: f64,
    /// Buff duration in minutes (default: 20)
    pub halftime_buff_minutes: u8,
    /// Trailing team intensifies style and pressing (default: true)
    pub trailing_team_shift: bool,

    pub stoppage: StoppageConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            half_length: 45,
            duels_per_half: 3,
            substitution_windows: vec![60, 75],
            substitution_budget: 3,
            halftime_regen: 0.08,
            halftime_regen_players: 6,
            halftime_buff_percent: 10.0,
            halftime_buff_minutes: 20,
            trailing_team_shift: true,
            stoppage: StoppageConfig::default(),
        }
    }
}

impl RulesConfig {
    pub fn regulation_minutes(&self) -> u8 {
        self.half_length.saturating_mul(2)
    }
}

/// Disruption weights feeding the stoppage-time estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoppageConfig {
    /// (default: 0.5)
    pub base: f64,
    /// Per occurrence (default: foul 0.05, card 0.15, goal 0.25, set piece 0.05,
    /// substitution 0.15, injury 0.30)
    pub foul: f64,
    pub card: f64,
    pub goal: f64,
    pub set_piece: f64,
    pub substitution: f64,
    pub injury: f64,
    /// Uniform jitter half-width (default: 0.75)
    pub jitter: f64,
    /// Result bounds in minutes (default: 1..=6)
    pub min_minutes: u8,
    pub max_minutes: u8,
}

impl Default for StoppageConfig {
    fn default() -> Self {
        Self {
            base: 0.5,
            foul: 0.05,
            card: 0.15,
            goal: 0.25,
            set_piece: 0.05,
            substitution: 0.15,
            injury: 0.30,
            jitter: 0.75,
            min_minutes: 1,
            max_minutes: 6,
        }
    }
}
