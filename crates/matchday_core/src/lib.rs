//! # matchday_core - Deterministic Minute-by-Minute Football Match Engine
//!
//! Plays a full match between two teams one simulated minute at a time and
//! returns a structured [`MatchReport`]: score, ordered event timeline,
//! per-team statistics and per-player end-of-match state.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + same inputs = same report)
//! - Possession, duels, fouls, cards, set pieces, corners, injuries,
//!   substitutions, fatigue and stoppage time
//! - Every tunable in a YAML-loadable [`EngineConfig`]
//! - JSON API for embedding in other runtimes
//!
//! ```rust
//! use matchday_core::{simulate, Player, Position, Team};
//!
//! let home = Team::new("Home", vec![Player::new(1, "Keeper", Position::GK)]);
//! let away = Team::new("Away", vec![Player::new(2, "Striker", Position::FWD)]);
//! let report = simulate(&home, &away, 42);
//! assert!(report.check_invariants().is_ok());
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Engine entry points take the full match context
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match_json, MatchRequest};
pub use engine::config::EngineConfig;
pub use engine::match_sim::{simulate, simulate_teams, simulate_with, MatchEngine, MatchPlan};
pub use engine::observer::MatchObserver;
pub use engine::referee::{RefereeProfile, RefereeSelector};
pub use error::{MatchError, ResolverError, Result};
pub use models::{
    EventKind, MatchEvent, MatchReport, PerSide, Player, PlayerAttributes, Position, Pressing, Style, Team,
    TeamSide,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
