//! Minute resolution: duel minutes, open play, shots, corners and goals.
//! Fouls and set pieces live in `set_pieces.rs`.

use tracing::{debug, trace};

use super::match_state::{pick_weighted, MatchState};
use super::{Disruption, MatchEngine};
use crate::engine::config::EngineConfig;
use crate::engine::discipline::foul_probability;
use crate::engine::duel::DuelContext;
use crate::engine::player_state::PlayerState;
use crate::engine::probability::{self, checked, clamp_probability};
use crate::engine::team_state::{Slot, TeamState};
use crate::error::ResolverError;
use crate::models::{
    AttackChannel, CornerOrigin, DuelAction, EventKind, GoalContext, GoalRecord, NarrationBeat, Position,
    ShotOrigin, ShotOutcome, TeamSide,
};

/// Corners from a header off a corner stop after this many in a row.
const MAX_CORNER_CHAIN: u8 = 2;

/// What decided a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MinuteOutcome {
    Duel,
    Foul,
    Shot,
    BuildUp,
}

/// How a non-set-piece shot was struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strike {
    OpenPlay,
    Header { chain: u8 },
}

/// Open-play shot chance for `attacking` this minute.
pub fn shot_probability(attacking: &TeamState, defending: &TeamState, cfg: &EngineConfig) -> Result<f64, ResolverError> {
    let shot = &cfg.probability.shot;
    let channel = match attacking.attack_channel {
        AttackChannel::Wings => shot.wings_channel,
        AttackChannel::Center => shot.center_channel,
    };
    let balance = probability::safe_ratio(attacking.ratings.attack, defending.ratings.defense).sqrt();
    let p = shot.base_rate * shot.style.get(attacking.style) * channel * shot.pressing.get(attacking.pressing) * balance;
    clamp_probability("shot", p, shot.min_probability, shot.max_probability)
}

impl MatchEngine {
    /// Exactly one of duel, foul, open-play shot or build-up per minute,
    /// in that priority.
    pub(crate) fn resolve_minute(&mut self, attacking: TeamSide) -> Result<MinuteOutcome, ResolverError> {
        let minute = self.state.minute;
        if self.state.duel_minutes.contains(&minute) {
            self.resolve_duel(attacking)?;
            return Ok(MinuteOutcome::Duel);
        }

        let defending = attacking.opponent();
        let foul = foul_probability(self.state.team(defending), &self.state.referee, &self.config.probability.foul)?;
        if self.state.roll() < foul {
            self.resolve_foul(attacking)?;
            return Ok(MinuteOutcome::Foul);
        }

        let shot = shot_probability(self.state.team(attacking), self.state.team(defending), &self.config)?;
        if self.state.roll() < shot {
            let weights = self.config.probability.shot.shooter_weights;
            let shooter = pick_weighted(self.state.teams.get(attacking), &mut self.state.rng, &[], |p| {
                weights.get(p.position) * p.attributes.technical.shooting as f64
            });
            self.take_shot(attacking, shooter, Strike::OpenPlay)?;
            return Ok(MinuteOutcome::Shot);
        }

        self.state.emit(attacking, EventKind::Narration { beat: NarrationBeat::BuildUp });
        Ok(MinuteOutcome::BuildUp)
    }

    /// Scheduled 1v1 confrontation for the side in possession.
    pub(crate) fn resolve_duel(&mut self, attacking: TeamSide) -> Result<(), ResolverError> {
        let minute = self.state.minute;
        let defending = attacking.opponent();
        let cfg = &self.config;

        let attacker = pick_weighted(self.state.teams.get(attacking), &mut self.state.rng, &[Position::MID, Position::FWD], |p| {
            p.overall(minute, cfg)
        });
        let defender = pick_weighted(self.state.teams.get(defending), &mut self.state.rng, &[Position::DEF, Position::MID], |p| {
            p.overall(minute, cfg)
        });
        let keeper = self.state.team(defending).goalkeeper();

        let result = {
            let att_team = self.state.teams.get(attacking);
            let def_team = self.state.teams.get(defending);
            let ctx = DuelContext {
                minute,
                attacker: att_team.player(attacker),
                defender: def_team.player(defender),
                goalkeeper: def_team.player(keeper),
                attacking: att_team,
                defending: def_team,
                config: &self.config,
            };
            self.duel_resolver.resolve(&ctx, &mut self.state.rng)?
        };

        self.state.team_mut(attacking).stats.record_duel(result.attacker_won);
        self.state.team_mut(defending).stats.record_duel(!result.attacker_won);
        let winner = if result.attacker_won { attacking } else { defending };
        self.state.team_mut(winner).last_duel_win = Some(minute);

        *self.state.activity.duel.get_mut(attacking) = Some(attacker);
        *self.state.activity.duel.get_mut(defending) = Some(defender);
        if result.attacker_won && result.action == DuelAction::Dribble {
            *self.state.activity.sprint.get_mut(attacking) = Some(attacker);
        }

        debug!(minute, side = ?attacking, action = ?result.action, won = result.attacker_won, "duel");
        self.state.emit(
            attacking,
            EventKind::Duel {
                action: result.action,
                attacker: self.state.player(attacking, attacker).event_ref(),
                defender: self.state.player(defending, defender).event_ref(),
                attacker_won: result.attacker_won,
            },
        );

        if let Some(outcome) = result.shot {
            let outcome = match outcome {
                // A lost shot duel is always a block, whatever the resolver says
                _ if !result.attacker_won => ShotOutcome::Blocked,
                ShotOutcome::Goal if !self.state.try_lock_goal(minute) => ShotOutcome::Saved,
                other => other,
            };
            let xg = self.open_play_xg(attacking, outcome.is_on_target());
            self.finish_shot(attacking, attacker, outcome, ShotOrigin::Duel, xg);
        }
        Ok(())
    }

    /// Open-play shot or a header off a corner. Misses may win a corner.
    fn take_shot(&mut self, side: TeamSide, shooter: Slot, strike: Strike) -> Result<(), ResolverError> {
        let minute = self.state.minute;
        let defending = side.opponent();
        let after_corner = self.state.last_event_was_corner(side);

        let (attack, power) = {
            let p = self.state.player(side, shooter);
            match strike {
                Strike::OpenPlay => (
                    0.5 * (self.state.team(side).ratings.attack + p.finishing(minute, &self.config)),
                    p.shot_power(minute, &self.config),
                ),
                Strike::Header { .. } => {
                    let heading = p.heading_power(minute, &self.config);
                    (heading, heading)
                }
            }
        };
        let keeper = self.state.team(defending).goalkeeper();
        let keeping = self.state.player(defending, keeper).keeping(minute, &self.config);
        let defense = self.state.team(defending).ratings.defense;

        let shot_cfg = &self.config.probability.shot;
        let on_target_p = checked("on_target", probability::on_target_probability(attack, defense, shot_cfg))?;
        let goal_p = checked("goal", probability::goal_probability(power, keeping, shot_cfg))?;

        let outcome = if self.state.roll() >= on_target_p {
            ShotOutcome::Wide
        } else if self.state.roll() < goal_p && self.state.try_lock_goal(minute) {
            ShotOutcome::Goal
        } else {
            ShotOutcome::Saved
        };

        let (origin, xg) = match strike {
            Strike::OpenPlay => (ShotOrigin::OpenPlay, self.open_play_xg(side, outcome.is_on_target())),
            Strike::Header { .. } => (ShotOrigin::Corner, self.config.xg.corner_header),
        };
        self.finish_shot(side, shooter, outcome, origin, xg);

        let shot_cfg = &self.config.probability.shot;
        let corner = match outcome {
            ShotOutcome::Wide => Some((CornerOrigin::Blocked, shot_cfg.blocked_corner)),
            ShotOutcome::Saved => Some((CornerOrigin::Parried, shot_cfg.parried_corner)),
            _ => None,
        };
        if let Some((origin, p)) = corner {
            let damping = if after_corner { shot_cfg.corner_repeat_damping } else { 1.0 };
            let p = checked("corner", p * damping)?;
            if self.state.roll() < p {
                let chain = match strike {
                    Strike::OpenPlay => 0,
                    Strike::Header { chain } => chain,
                };
                self.award_corner(side, origin, chain)?;
            }
        }
        Ok(())
    }

    fn award_corner(&mut self, side: TeamSide, origin: CornerOrigin, chain: u8) -> Result<(), ResolverError> {
        self.state.team_mut(side).stats.corners += 1;
        self.disrupt(Disruption::SetPiece);
        self.state.emit(side, EventKind::Corner { origin });

        let header_p = checked("corner_header", self.config.probability.shot.corner_header)?;
        if chain < MAX_CORNER_CHAIN && self.state.roll() < header_p {
            let header = pick_weighted(self.state.teams.get(side), &mut self.state.rng, &[], |p| {
                header_weight(p) * p.attributes.technical.heading as f64
            });
            self.take_shot(side, header, Strike::Header { chain: chain + 1 })?;
        }
        Ok(())
    }

    fn open_play_xg(&self, side: TeamSide, on_target: bool) -> f64 {
        let minute = self.state.minute;
        let window = self.config.xg.recent_duel_window;
        let recent_duel_win = self
            .state
            .team(side)
            .last_duel_win
            .is_some_and(|m| minute.saturating_sub(m) <= window);
        probability::open_play_xg(on_target, recent_duel_win, minute, &self.config.xg)
    }

    /// Records a resolved shot and, for a goal, the goal itself. The goal
    /// lock must already be held for `ShotOutcome::Goal`.
    pub(crate) fn finish_shot(&mut self, side: TeamSide, shooter: Slot, outcome: ShotOutcome, origin: ShotOrigin, xg: f64) {
        self.state.team_mut(side).stats.record_shot(outcome, xg);
        trace!(minute = self.state.minute, side = ?side, ?outcome, ?origin, xg, "shot");
        self.state.emit(
            side,
            EventKind::Shot {
                player: self.state.player(side, shooter).event_ref(),
                on_target: outcome.is_on_target(),
                outcome,
                origin,
                xg: xg as f32,
            },
        );
        if outcome == ShotOutcome::Goal {
            self.credit_goal(side, shooter, GoalContext::from(origin));
        }
    }

    fn credit_goal(&mut self, side: TeamSide, scorer: Slot, context: GoalContext) {
        let minute = self.state.minute;
        let assist_p = self.config.probability.shot.assist_probability;
        let assist = if context.allows_assist() && self.state.roll() < assist_p {
            pick_assist(&mut self.state, side, scorer)
        } else {
            None
        };

        let scorer_ref = self.state.player(side, scorer).event_ref();
        let assist_ref = assist.map(|slot| self.state.player(side, slot).event_ref());
        debug!(minute, side = ?side, scorer = %scorer_ref.name, ?context, "goal");

        self.state.team_mut(side).stats.record_goal(GoalRecord {
            minute,
            side,
            scorer: scorer_ref.clone(),
            assist: assist_ref.clone(),
            context,
        });
        self.disrupt(Disruption::Goal);
        self.state.emit(side, EventKind::Goal { scorer: scorer_ref, assist: assist_ref, context });
    }
}

fn header_weight(p: &PlayerState) -> f64 {
    match p.position {
        Position::GK => 0.0,
        Position::DEF => 1.0,
        Position::MID => 0.6,
        Position::FWD => 1.5,
    }
}

/// Teammate on the pitch other than the scorer, weighted by passing and
/// vision. `None` when the scorer is alone.
fn pick_assist(state: &mut MatchState, side: TeamSide, scorer: Slot) -> Option<Slot> {
    let team = state.teams.get(side);
    let (slots, weights): (Vec<usize>, Vec<f64>) = team
        .active_players()
        .filter(|(idx, _)| Slot::Roster(*idx) != scorer)
        .map(|(idx, p)| (idx, 0.7 * p.attributes.technical.passing as f64 + 0.3 * p.attributes.mental.vision as f64))
        .unzip();
    probability::weighted_index(&weights, &mut state.rng).map(|k| Slot::Roster(slots[k]))
}
