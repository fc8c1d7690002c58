pub mod config; // Tuning configuration (YAML-loadable, all defaults documented)
pub mod discipline; // Foul and card rolls
pub mod duel; // 1v1 duel resolver seam
pub mod fatigue; // Energy drain, distance, half-time rest
pub mod injury;
pub mod match_sim;
pub mod observer; // Live event hooks
pub mod player_state;
pub mod possession; // Team ratings and control share
pub mod probability;
pub mod referee;
pub mod stats;
pub mod substitutions;
pub mod team_state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EngineConfig;
pub use duel::{AttributeDuelResolver, DuelContext, DuelResolver, DuelResult};
pub use match_sim::{simulate, simulate_teams, simulate_with, MatchEngine, MatchPlan, MatchState};
pub use observer::{MatchObserver, NoopObserver, ScoreTicker};
pub use player_state::PlayerState;
pub use referee::{Referee, RefereeProfile, RefereeSelector};
pub use team_state::{Slot, TeamState};
