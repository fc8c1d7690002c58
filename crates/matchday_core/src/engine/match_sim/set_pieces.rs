//! Fouls and what follows them: cards, then a penalty or a free kick.

use tracing::debug;

use super::match_state::{pick_best, pick_weighted};
use super::{Disruption, MatchEngine};
use crate::engine::discipline::roll_card;
use crate::engine::player_state::PlayerState;
use crate::engine::probability::{card_probabilities, checked};
use crate::engine::team_state::Slot;
use crate::error::ResolverError;
use crate::models::{CardKind, EventKind, FreekickPhase, PenaltyPhase, ShotOrigin, ShotOutcome, TeamSide};

fn penalty_skill(p: &PlayerState) -> f64 {
    0.6 * p.attributes.technical.shooting as f64 + 0.4 * p.attributes.mental.composure as f64
}

fn freekick_skill(p: &PlayerState) -> f64 {
    0.5 * p.attributes.technical.shooting as f64
        + 0.3 * p.attributes.technical.crossing as f64
        + 0.2 * p.attributes.mental.vision as f64
}

impl MatchEngine {
    /// Foul by the side out of possession against `attacking`.
    pub(crate) fn resolve_foul(&mut self, attacking: TeamSide) -> Result<(), ResolverError> {
        let defending = attacking.opponent();
        let set_piece = &self.config.probability.set_piece;
        let in_box_p = checked("in_box", set_piece.in_box)?;
        let penalty_p = checked("penalty_given", set_piece.penalty_given)?;

        let in_box = self.state.roll() < in_box_p;

        let weights = self.config.probability.foul.offender_weights;
        let offender = pick_weighted(self.state.teams.get(defending), &mut self.state.rng, &[], |p| {
            weights.get(p.position)
        });

        self.state.team_mut(defending).stats.fouls += 1;
        self.disrupt(Disruption::Foul);
        let offender_ref = self.state.player(defending, offender).event_ref();
        self.state.emit(defending, EventKind::Foul { offender: offender_ref });

        self.book(defending, offender);

        if in_box && self.state.roll() < penalty_p {
            self.award_penalty(attacking)
        } else {
            self.award_freekick(attacking)
        }
    }

    /// Card roll for the player who committed the foul.
    fn book(&mut self, side: TeamSide, offender: Slot) {
        let probs = {
            let p = self.state.player(side, offender);
            card_probabilities(
                p.attributes.mental.aggression as f64,
                p.attributes.mental.decisions as f64,
                &self.state.referee.multipliers,
                &self.config.probability.card,
            )
        };
        let prior = self.state.team(side).yellow_count(offender);
        let Some(card) = roll_card(probs, prior, &self.config.probability.card, &mut self.state.rng) else {
            return;
        };

        let team = self.state.team_mut(side);
        if !matches!(card, CardKind::Red) {
            *team.yellow_ledger.entry(offender).or_insert(0) += 1;
        }
        team.stats.record_card(card);
        if card.is_dismissal() {
            team.send_off(offender);
        }
        let player = team.player(offender).event_ref();
        debug!(minute = self.state.minute, side = ?side, player = %player.name, ?card, "card");
        self.disrupt(Disruption::Card);
        self.state.emit(side, EventKind::Card { card, player });
    }

    fn award_penalty(&mut self, side: TeamSide) -> Result<(), ResolverError> {
        let minute = self.state.minute;
        let set_piece = &self.config.probability.set_piece;
        let conversion = checked("penalty_conversion", set_piece.penalty_conversion)?;
        let saved_share = checked("penalty_miss_saved", set_piece.penalty_miss_saved)?;

        self.state.team_mut(side).stats.penalties += 1;
        self.disrupt(Disruption::SetPiece);
        self.state.emit(side, EventKind::Penalty { phase: PenaltyPhase::Awarded });

        let taker = pick_best(self.state.team(side), penalty_skill);
        let converted = self.state.roll() < conversion;
        let outcome = if converted && self.state.try_lock_goal(minute) {
            ShotOutcome::Goal
        } else if converted || self.state.roll() < saved_share {
            ShotOutcome::Saved
        } else {
            ShotOutcome::Wide
        };

        self.finish_shot(side, taker, outcome, ShotOrigin::Penalty, self.config.xg.penalty);
        let phase = if outcome == ShotOutcome::Goal { PenaltyPhase::Scored } else { PenaltyPhase::Missed };
        self.state.emit(side, EventKind::Penalty { phase });
        Ok(())
    }

    /// Counted once when awarded. Only a conversion is recorded as a shot;
    /// a converted kick that finds the minute already scored in is a save.
    fn award_freekick(&mut self, side: TeamSide) -> Result<(), ResolverError> {
        let minute = self.state.minute;
        let conversion = checked("freekick_conversion", self.config.probability.set_piece.freekick_conversion)?;

        self.state.team_mut(side).stats.freekicks += 1;
        self.disrupt(Disruption::SetPiece);
        self.state.emit(side, EventKind::Freekick { phase: FreekickPhase::Awarded });

        if self.state.roll() >= conversion {
            self.state.emit(side, EventKind::Freekick { phase: FreekickPhase::Missed });
            return Ok(());
        }

        let taker = pick_best(self.state.team(side), freekick_skill);
        let xg = self.config.xg.freekick;
        if self.state.try_lock_goal(minute) {
            self.finish_shot(side, taker, ShotOutcome::Goal, ShotOrigin::Freekick, xg);
            self.state.emit(side, EventKind::Freekick { phase: FreekickPhase::Converted });
        } else {
            self.finish_shot(side, taker, ShotOutcome::Saved, ShotOrigin::Freekick, xg);
            self.state.emit(side, EventKind::Freekick { phase: FreekickPhase::Missed });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::match_sim::{MatchEngine, MatchPlan};
    use crate::engine::referee::{RefereeProfile, RefereeSelector};
    use crate::engine::test_support::balanced_team;
    use crate::models::{MatchEvent, Team};

    fn engine(config: EngineConfig, seed: u64) -> MatchEngine {
        let home: Team = balanced_team("Home", 1, 11, 70);
        let away: Team = balanced_team("Away", 101, 11, 70);
        MatchEngine::new(&home, &away, MatchPlan::new(seed).with_config(config)).unwrap()
    }

    fn count(events: &[MatchEvent], pred: impl Fn(&EventKind) -> bool) -> usize {
        events.iter().filter(|e| pred(&e.kind)).count()
    }

    #[test]
    fn test_foul_outside_box_awards_one_freekick() {
        let mut cfg = EngineConfig::default();
        cfg.probability.set_piece.in_box = 0.0;
        let mut e = engine(cfg, 7);
        e.state.minute = 1;
        e.resolve_foul(TeamSide::Home).unwrap();

        let awarded = count(&e.state.events, |k| matches!(k, EventKind::Freekick { phase: FreekickPhase::Awarded }));
        assert_eq!(awarded, 1);
        assert_eq!(e.state.team(TeamSide::Home).stats.freekicks, 1);
        assert_eq!(e.state.team(TeamSide::Away).stats.fouls, 1);
        assert_eq!(e.state.team(TeamSide::Home).stats.penalties, 0);

        let foul = e.state.events.iter().find(|ev| matches!(ev.kind, EventKind::Foul { .. })).unwrap();
        assert_eq!(foul.side, Some(TeamSide::Away));
    }

    #[test]
    fn test_certain_penalty_scores_once() {
        let mut cfg = EngineConfig::default();
        cfg.probability.set_piece.in_box = 1.0;
        cfg.probability.set_piece.penalty_given = 1.0;
        cfg.probability.set_piece.penalty_conversion = 1.0;
        let mut e = engine(cfg, 3);
        e.state.minute = 33;
        e.resolve_foul(TeamSide::Away).unwrap();

        let away = &e.state.team(TeamSide::Away).stats;
        assert_eq!(away.penalties, 1);
        assert_eq!(away.goals, 1);
        assert_eq!(away.shots_on_target, 1);
        assert_eq!(away.freekicks, 0);
        assert!(e.state.events.iter().any(|ev| matches!(ev.kind, EventKind::Penalty { phase: PenaltyPhase::Scored })));

        // Same minute again: the lock turns the conversion into a save
        e.resolve_foul(TeamSide::Away).unwrap();
        let away = &e.state.team(TeamSide::Away).stats;
        assert_eq!(away.goals, 1);
        assert_eq!(away.shots_on_target, 2);
    }

    #[test]
    fn test_missed_freekick_is_not_a_shot() {
        let mut cfg = EngineConfig::default();
        cfg.probability.set_piece.in_box = 0.0;
        cfg.probability.set_piece.freekick_conversion = 0.0;
        let mut e = engine(cfg, 11);
        e.state.minute = 20;
        e.resolve_foul(TeamSide::Home).unwrap();
        assert_eq!(e.state.team(TeamSide::Home).stats.shots, 0);
        assert!(e.state.events.iter().any(|ev| matches!(ev.kind, EventKind::Freekick { phase: FreekickPhase::Missed })));
    }

    #[test]
    fn test_second_yellow_sends_off() {
        let mut cfg = EngineConfig::default();
        cfg.probability.card.red_base = 0.0;
        cfg.probability.card.red_aggression = 0.0;
        cfg.probability.card.red_decisions = 0.0;
        cfg.probability.card.yellow_base = 1.0;
        cfg.probability.card.second_yellow_upgrade = 1.0;
        let home = balanced_team("Home", 1, 11, 70);
        let away = balanced_team("Away", 101, 11, 70);
        let plan = MatchPlan::new(4).with_config(cfg).with_referee(RefereeSelector::Fixed(RefereeProfile::Neutral));
        let mut e = MatchEngine::new(&home, &away, plan).unwrap();
        e.state.minute = 40;

        e.book(TeamSide::Away, Slot::Roster(3));
        assert_eq!(e.state.team(TeamSide::Away).yellow_count(Slot::Roster(3)), 1);
        assert!(e.state.team(TeamSide::Away).active.contains(&3));

        e.book(TeamSide::Away, Slot::Roster(3));
        let away = e.state.team(TeamSide::Away);
        assert_eq!(away.yellow_count(Slot::Roster(3)), 2);
        assert_eq!(away.stats.reds, 1);
        assert_eq!(away.stats.yellows, 1);
        assert!(!away.active.contains(&3));
        assert!(away.players[3].sent_off);
    }
}
