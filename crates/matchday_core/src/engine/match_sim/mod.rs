//! Match Simulation Engine
//!
//! Minute-by-minute scheduler. One [`MatchEngine`] plays one match:
//!
//! ```text
//! kick-off (0) ─► first half (1..=H) ─► half-time ─► second half (H+1..=2H)
//!              ─► stoppage announcement ─► stoppage (2H+1..=2H+S) ─► full time
//! ```
//!
//! Each minute runs the same pipeline: substitution windows, rating
//! refresh, possession roll, minute resolution (duel, foul or open play),
//! fatigue tick, injury check. Every random draw comes from the single
//! seeded RNG in [`MatchState`], in that fixed order, so a seed fully
//! determines the report.
//!
//! A minute whose resolution fails is rolled back and logged as degraded;
//! the match always reaches full time.

mod match_state;
mod resolver;
mod set_pieces;
mod stoppage;

pub use match_state::{schedule_duels, MatchState};
pub use stoppage::{stoppage_minutes, Disruption};

use rand::Rng;
use tracing::{debug, info, trace, warn};

use super::config::EngineConfig;
use super::duel::{AttributeDuelResolver, DuelResolver};
use super::fatigue;
use super::injury::{roll_injury, InjuryContext};
use super::observer::{MatchObserver, NoopObserver};
use super::possession::{control_share, TeamRatings};
use super::referee::RefereeSelector;
use super::stats;
use super::team_state::Slot;
use crate::error::{MatchError, Result};
use crate::models::{
    Announcement, DegradedMinute, EventKind, MatchEvent, MatchReport, Pressing, Team, TeamSide,
};

/// Everything besides the two teams that determines a match.
#[derive(Debug, Clone, Default)]
pub struct MatchPlan {
    pub seed: u64,
    pub referee: RefereeSelector,
    pub config: EngineConfig,
}

impl MatchPlan {
    pub fn new(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn with_referee(mut self, referee: RefereeSelector) -> Self {
        self.referee = referee;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct MatchEngine {
    pub(crate) state: MatchState,
    pub(crate) config: EngineConfig,
    duel_resolver: Box<dyn DuelResolver>,
    /// Events already handed to the observer
    notified: usize,
}

impl MatchEngine {
    /// Validates the plan's config and sets up the match. Teams are deep
    /// copied; the caller's values are never touched.
    pub fn new(home: &Team, away: &Team, plan: MatchPlan) -> Result<Self> {
        plan.config.validate()?;
        Ok(Self::from_validated(home, away, plan))
    }

    fn from_validated(home: &Team, away: &Team, plan: MatchPlan) -> Self {
        let state = MatchState::new(home, away, plan.seed, plan.referee, &plan.config);
        debug!(
            seed = plan.seed,
            referee = %state.referee.profile,
            duels = state.duel_minutes.len(),
            "match set up"
        );
        Self { state, config: plan.config, duel_resolver: Box::new(AttributeDuelResolver), notified: 0 }
    }

    /// Replaces the default attribute-based duel resolver.
    pub fn with_duel_resolver(mut self, resolver: impl DuelResolver + 'static) -> Self {
        self.duel_resolver = Box::new(resolver);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(self) -> MatchReport {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Plays the whole match, streaming events to `observer` as each
    /// minute completes.
    pub fn run_with_observer(mut self, observer: &mut dyn MatchObserver) -> MatchReport {
        let half = self.config.rules.half_length;
        let regulation = self.config.rules.regulation_minutes();

        self.announce(0, Announcement::KickOff);
        self.flush(0, observer);

        for minute in 1..=half {
            self.step(minute);
            self.flush(minute, observer);
        }

        self.half_time(half);
        self.flush(half, observer);

        for minute in half + 1..=regulation {
            self.step(minute);
            self.flush(minute, observer);
        }

        let draw = self.state.roll();
        let stoppage = stoppage_minutes(self.state.disruption, draw, &self.config.rules.stoppage);
        self.state.stoppage_minutes = stoppage;
        debug!(disruption = self.state.disruption, stoppage, "stoppage time");
        self.announce(regulation, Announcement::StoppageTime { minutes: stoppage });
        self.flush(regulation, observer);

        let final_minute = regulation + stoppage;
        for minute in regulation + 1..=final_minute {
            self.step(minute);
            self.flush(minute, observer);
        }

        self.announce(final_minute, Announcement::FullTime);
        self.flush(final_minute, observer);

        let report = stats::build_report(self.state, final_minute);
        info!(
            seed = report.seed,
            home = report.score.home,
            away = report.score.away,
            degraded = report.degraded_minutes.len(),
            "full time"
        );
        report
    }

    fn announce(&mut self, minute: u8, announcement: Announcement) {
        self.state.minute = minute;
        self.state.events.push(MatchEvent::announce(minute, announcement));
    }

    fn flush(&mut self, minute: u8, observer: &mut dyn MatchObserver) {
        for event in &self.state.events[self.notified..] {
            observer.on_event(event);
        }
        self.notified = self.state.events.len();
        observer.on_minute_end(minute, &self.state.score());
    }

    /// One minute of play.
    pub(crate) fn step(&mut self, minute: u8) {
        self.state.minute = minute;
        self.state.activity.clear();

        if self.config.rules.substitution_windows.contains(&minute) {
            for side in TeamSide::BOTH {
                self.process_substitution_window(side);
            }
        }

        self.refresh_ratings();

        let share = control_share(
            self.state.team(TeamSide::Home),
            self.state.team(TeamSide::Away),
            &self.config.probability.possession,
        );
        let attacking = if self.state.roll() < share { TeamSide::Home } else { TeamSide::Away };
        self.state.team_mut(attacking).stats.possession_minutes += 1;

        let checkpoint = self.state.checkpoint();
        match self.resolve_minute(attacking) {
            Ok(outcome) => trace!(minute, side = ?attacking, ?outcome, "minute resolved"),
            Err(err) => {
                warn!(minute, error = %err, "minute degraded");
                self.state.restore(checkpoint);
                self.state.degraded.push(DegradedMinute { minute, reason: err.to_string() });
            }
        }

        let (home, away) = self.state.teams.pair_mut(TeamSide::Home);
        fatigue::apply_tick(home, away, &self.state.activity, &self.config);

        self.check_injuries();
    }

    pub(crate) fn refresh_ratings(&mut self) {
        let minute = self.state.minute;
        for side in TeamSide::BOTH {
            let ratings = TeamRatings::compute(self.state.team(side), minute, &self.config);
            self.state.team_mut(side).ratings = ratings;
        }
    }

    pub(crate) fn disrupt(&mut self, kind: Disruption) {
        self.state.disruption += kind.weight(&self.config.rules.stoppage);
    }

    /// One randomly chosen active player per team risks an injury.
    fn check_injuries(&mut self) {
        let strict_referee = self.state.referee.is_strict();
        for side in TeamSide::BOTH {
            let on_pitch = self.state.team(side).active.len();
            if on_pitch == 0 {
                continue;
            }
            let pick = self.state.rng.gen_range(0..on_pitch);
            let idx = self.state.team(side).active[pick];
            let ctx = InjuryContext {
                strict_referee,
                opponent_high_press: self.state.team(side.opponent()).pressing == Pressing::High,
            };
            let Some(injury) =
                roll_injury(&self.state.teams.get(side).players[idx], ctx, &self.config.injury, &mut self.state.rng)
            else {
                continue;
            };

            let player = self.state.team_mut(side).player_mut(Slot::Roster(idx));
            player.injured = true;
            let event_player = player.event_ref();
            debug!(minute = self.state.minute, side = ?side, player = %event_player.name, severity = ?injury.severity, "injury");
            self.disrupt(Disruption::Injury);
            self.state.emit(side, EventKind::Injury { player: event_player, severity: injury.severity });

            if injury.requires_substitution {
                self.force_injury_substitution(side, idx);
            }
        }
    }

    /// Rest, buffs and the trailing team's tactical reaction.
    fn half_time(&mut self, half_end: u8) {
        self.announce(half_end, Announcement::HalfTime);
        debug!(home = self.state.team(TeamSide::Home).stats.goals, away = self.state.team(TeamSide::Away).stats.goals, "half time");
        for side in TeamSide::BOTH {
            fatigue::apply_halftime(self.state.team_mut(side), half_end, &self.config);
        }

        if self.config.rules.trailing_team_shift {
            let score = self.state.score();
            let trailing = match score.home.cmp(&score.away) {
                std::cmp::Ordering::Less => Some(TeamSide::Home),
                std::cmp::Ordering::Greater => Some(TeamSide::Away),
                std::cmp::Ordering::Equal => None,
            };
            if let Some(side) = trailing {
                if let Some((style, pressing)) = self.state.team_mut(side).shift_tactics_up() {
                    debug!(side = ?side, ?style, ?pressing, "trailing team shifts up");
                    self.state.emit(side, EventKind::TacticalShift { style, pressing });
                }
            }
        }
        self.refresh_ratings();
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("seed", &self.state.seed)
            .field("minute", &self.state.minute)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Plays a match with the default configuration and a neutral referee.
pub fn simulate(home: &Team, away: &Team, seed: u64) -> MatchReport {
    MatchEngine::from_validated(home, away, MatchPlan::new(seed)).run()
}

pub fn simulate_with(home: &Team, away: &Team, plan: MatchPlan) -> Result<MatchReport> {
    Ok(MatchEngine::new(home, away, plan)?.run())
}

/// Entry point for callers holding a team list. Exactly two teams, home
/// first.
pub fn simulate_teams(teams: &[Team], plan: MatchPlan) -> Result<MatchReport> {
    match teams {
        [home, away] => simulate_with(home, away, plan),
        _ => Err(MatchError::InvalidTeamCount { found: teams.len() }),
    }
}
