//! Player Substitution Logic
//!
//! - `process_substitution_window`: fatigue-driven change at a window minute
//! - `find_substitution_candidate`: most tired eligible starter + replacement
//! - `execute_substitution`: roster swap, stats and event
//! - `force_injury_substitution`: immediate change for an injured player
//!
//! Substitutes who came on are never taken off again, and dismissed players
//! cannot be replaced.

use tracing::debug;

use super::match_sim::{Disruption, MatchEngine};
use super::possession::TeamRatings;
use super::team_state::{Slot, TeamState};
use crate::models::{EventKind, SubstitutionReason, SubstitutionRecord, TeamSide};

impl MatchEngine {
    /// At most one fatigue substitution per team per window.
    pub(crate) fn process_substitution_window(&mut self, side: TeamSide) {
        if let Some((out_idx, in_idx)) = self.find_substitution_candidate(side) {
            self.execute_substitution(side, out_idx, in_idx, SubstitutionReason::Fatigue);
        }
    }

    /// Most fatigued active outfield player who started the match, paired
    /// with a bench player of the same position if there is one.
    pub(crate) fn find_substitution_candidate(&self, side: TeamSide) -> Option<(usize, usize)> {
        let team = self.state.team(side);
        if team.subs_remaining(self.config.rules.substitution_budget) == 0 || team.bench.is_empty() {
            return None;
        }

        let (out_idx, tired) = team
            .active_players()
            .filter(|(_, p)| p.position.is_outfield() && !p.came_on)
            .min_by(|(ia, a), (ib, b)| a.energy.total_cmp(&b.energy).then(ia.cmp(ib)))?;

        Some((out_idx, replacement(team, tired.position)?))
    }

    /// Swaps `in_idx` from the bench into the place of `out_idx`.
    pub(crate) fn execute_substitution(&mut self, side: TeamSide, out_idx: usize, in_idx: usize, reason: SubstitutionReason) {
        let minute = self.state.minute;
        let team = self.state.team_mut(side);
        let Some(pos) = team.active.iter().position(|&a| a == out_idx) else {
            return;
        };
        team.active[pos] = in_idx;
        team.bench.retain(|&b| b != in_idx);
        team.subs_used += 1;
        team.players[in_idx].came_on = true;

        let player_out = team.player(Slot::Roster(out_idx)).event_ref();
        let player_in = team.player(Slot::Roster(in_idx)).event_ref();
        debug!(minute, side = ?side, out = %player_out.name, r#in = %player_in.name, ?reason, "substitution");

        let ratings = TeamRatings::compute(self.state.team(side), minute, &self.config);
        self.state.team_mut(side).ratings = ratings;

        self.state.substitutions.push(SubstitutionRecord {
            minute,
            side,
            player_out: player_out.clone(),
            player_in: player_in.clone(),
            reason,
        });
        self.disrupt(Disruption::Substitution);
        self.state.emit(side, EventKind::Substitution { player_out, player_in, reason });
    }

    /// Replaces an injured player straight away if budget and bench allow.
    /// Returns whether a change was made; otherwise the player plays on.
    pub(crate) fn force_injury_substitution(&mut self, side: TeamSide, injured_idx: usize) -> bool {
        let team = self.state.team(side);
        if team.subs_remaining(self.config.rules.substitution_budget) == 0 || !team.active.contains(&injured_idx) {
            return false;
        }
        let Some(in_idx) = replacement(team, team.players[injured_idx].position) else {
            return false;
        };
        self.execute_substitution(side, injured_idx, in_idx, SubstitutionReason::Injury);
        true
    }
}

/// Same-position bench player, else the first one on the bench.
fn replacement(team: &TeamState, position: crate::models::Position) -> Option<usize> {
    team.bench
        .iter()
        .copied()
        .find(|&b| team.players.get(b).is_some_and(|p| p.position == position))
        .or_else(|| team.bench.first().copied())
}

#[cfg(test)]
mod tests {
    use crate::engine::match_sim::{MatchEngine, MatchPlan};
    use crate::engine::test_support::balanced_team;
    use crate::models::{Position, SubstitutionReason, TeamSide};

    fn engine(size: usize) -> MatchEngine {
        let home = balanced_team("Home", 1, size, 70);
        let away = balanced_team("Away", 101, size, 70);
        MatchEngine::new(&home, &away, MatchPlan::new(12)).unwrap()
    }

    #[test]
    fn test_most_tired_starter_replaced_like_for_like() {
        let mut e = engine(14);
        e.state.minute = 60;
        e.state.team_mut(TeamSide::Home).players[6].energy = 0.3;
        e.process_substitution_window(TeamSide::Home);

        let home = e.state.team(TeamSide::Home);
        assert!(!home.active.contains(&6));
        // Bench is DEF(11), MID(12), FWD(13): the MID comes on
        assert!(home.active.contains(&12));
        assert_eq!(home.subs_used, 1);
        assert_eq!(home.players[12].position, Position::MID);
        assert_eq!(e.state.substitutions.len(), 1);
        assert_eq!(e.state.substitutions[0].reason, SubstitutionReason::Fatigue);
    }

    #[test]
    fn test_no_bench_no_change() {
        let mut e = engine(11);
        e.state.minute = 60;
        e.process_substitution_window(TeamSide::Away);
        assert!(e.state.substitutions.is_empty());
        assert!(!e.force_injury_substitution(TeamSide::Away, 3));
    }

    #[test]
    fn test_budget_caps_changes() {
        let mut e = engine(18);
        e.config.rules.substitution_budget = 2;
        e.state.minute = 60;
        for _ in 0..5 {
            e.process_substitution_window(TeamSide::Home);
        }
        assert_eq!(e.state.team(TeamSide::Home).subs_used, 2);
    }

    #[test]
    fn test_goalkeeper_injury_brings_bench_player_on() {
        let mut e = engine(12);
        e.state.minute = 30;
        assert!(e.force_injury_substitution(TeamSide::Home, 0));
        let home = e.state.team(TeamSide::Home);
        assert_eq!(home.active[0], 11);
        assert!(home.players[11].came_on);
        assert_eq!(e.state.substitutions[0].reason, SubstitutionReason::Injury);
    }
}
