use serde::{Deserialize, Serialize};

/// Expected-goals heuristic. Reporting only; never feeds back into outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct XgConfig {
    /// (default: 0.08)
    pub open_play_base: f64,
    /// (default: 0.06)
    pub on_target_bonus: f64,
    /// Attacking team won a duel within `recent_duel_window` minutes (default: 0.08, 10)
    pub recent_duel_bonus: f64,
    pub recent_duel_window: u8,
    /// Minutes divisible by 5 (default: 0.10)
    pub five_minute_bonus: f64,
    /// Open-play clamp (default: 0.02..=0.40)
    pub min: f64,
    pub max: f64,
    /// Fixed values for dead-ball chances (default: penalty 0.76, free kick 0.06, corner header 0.05)
    pub penalty: f64,
    pub freekick: f64,
    pub corner_header: f64,
}

impl Default for XgConfig {
    fn default() -> Self {
        Self {
            open_play_base: 0.08,
            on_target_bonus: 0.06,
            recent_duel_bonus: 0.08,
            recent_duel_window: 10,
            five_minute_bonus: 0.10,
            min: 0.02,
            max: 0.40,
            penalty: 0.76,
            freekick: 0.06,
            corner_header: 0.05,
        }
    }
}
