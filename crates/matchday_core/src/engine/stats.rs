//! Incremental match statistics.
//!
//! Counters are updated at the moment an event is resolved and are the only
//! source for the final report; nothing is recounted from the timeline.

use super::match_sim::MatchState;
use crate::models::{CardKind, GoalRecord, MatchReport, ShotOutcome, TeamStatBlock};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub goals: u8,
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u16,
    pub freekicks: u16,
    pub penalties: u16,
    pub fouls: u16,
    pub yellows: u16,
    pub reds: u16,
    pub duels_won: u16,
    pub duels_lost: u16,
    pub duels_total: u16,
    pub xg: f64,
    pub possession_minutes: u16,
    pub goal_records: Vec<GoalRecord>,
}

impl TeamStats {
    pub fn record_shot(&mut self, outcome: ShotOutcome, xg: f64) {
        self.shots += 1;
        if outcome.is_on_target() {
            self.shots_on_target += 1;
        }
        self.xg += xg;
    }

    /// Must follow the `record_shot` of the scoring attempt.
    pub fn record_goal(&mut self, record: GoalRecord) {
        self.goals = self.goals.saturating_add(1);
        self.goal_records.push(record);
    }

    pub fn record_card(&mut self, card: CardKind) {
        if card.is_dismissal() {
            self.reds += 1;
        } else {
            self.yellows += 1;
        }
    }

    pub fn record_duel(&mut self, won: bool) {
        self.duels_total += 1;
        if won {
            self.duels_won += 1;
        } else {
            self.duels_lost += 1;
        }
    }

    pub fn to_block(&self, minutes_played: u16) -> TeamStatBlock {
        let possession_pct = if minutes_played == 0 {
            50.0
        } else {
            100.0 * self.possession_minutes as f32 / minutes_played as f32
        };
        TeamStatBlock {
            goals: self.goals,
            shots: self.shots,
            shots_on_target: self.shots_on_target,
            corners: self.corners,
            freekicks: self.freekicks,
            penalties: self.penalties,
            fouls: self.fouls,
            yellows: self.yellows,
            reds: self.reds,
            duels_won: self.duels_won,
            duels_lost: self.duels_lost,
            duels_total: self.duels_total,
            possession_pct,
            xg: self.xg as f32,
        }
    }
}

/// Freezes the final state into a report. Goals are listed in minute
/// order across both teams.
pub fn build_report(state: MatchState, final_minute: u8) -> MatchReport {
    let minutes_played = state.teams.home.stats.possession_minutes + state.teams.away.stats.possession_minutes;

    let mut goals: Vec<GoalRecord> = state.teams.iter().flat_map(|(_, t)| t.stats.goal_records.iter().cloned()).collect();
    goals.sort_by_key(|g| g.minute);

    MatchReport {
        seed: state.seed,
        teams: state.teams.map(|_, t| t.name.clone()),
        score: state.score(),
        referee: state.referee.profile,
        stoppage_minutes: state.stoppage_minutes,
        final_minute,
        stats: state.teams.map(|_, t| t.stats.to_block(minutes_played)),
        goals,
        substitutions: state.substitutions,
        players: state.teams.map(|_, t| t.snapshots()),
        events: state.events,
        degraded_minutes: state.degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_counters() {
        let mut stats = TeamStats::default();
        stats.record_shot(ShotOutcome::Saved, 0.1);
        stats.record_shot(ShotOutcome::Wide, 0.05);
        stats.record_shot(ShotOutcome::Blocked, 0.05);
        assert_eq!(stats.shots, 3);
        assert_eq!(stats.shots_on_target, 1);
        assert!((stats.xg - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_second_yellow_counts_as_red() {
        let mut stats = TeamStats::default();
        stats.record_card(CardKind::Yellow);
        stats.record_card(CardKind::SecondYellow);
        assert_eq!((stats.yellows, stats.reds), (1, 1));
    }

    #[test]
    fn test_duel_ledger_balances() {
        let mut stats = TeamStats::default();
        stats.record_duel(true);
        stats.record_duel(false);
        stats.record_duel(false);
        assert_eq!(stats.duels_won + stats.duels_lost, stats.duels_total);
    }

    #[test]
    fn test_possession_percentage() {
        let stats = TeamStats { possession_minutes: 45, ..Default::default() };
        assert!((stats.to_block(90).possession_pct - 50.0).abs() < 1e-6);
        assert_eq!(TeamStats::default().to_block(0).possession_pct, 50.0);
    }
}
