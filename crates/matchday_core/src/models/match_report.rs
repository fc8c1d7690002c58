use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::events::{EventKind, EventPlayer, GoalContext, MatchEvent, SubstitutionReason};
use super::player::Position;
use super::side::{PerSide, TeamSide};
use crate::engine::referee::RefereeProfile;

/// Final per-team counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamStatBlock {
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
    /// Share of minutes in possession, 0-100
    pub possession_pct: f32,
    pub xg: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub minute: u8,
    pub side: TeamSide,
    pub scorer: EventPlayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<EventPlayer>,
    pub context: GoalContext,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionRecord {
    pub minute: u8,
    pub side: TeamSide,
    pub player_out: EventPlayer,
    pub player_in: EventPlayer,
    pub reason: SubstitutionReason,
}

/// End-of-match state of one squad member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub energy: f32,
    pub distance_km: f32,
    pub yellow_cards: u8,
    pub sent_off: bool,
    pub injured: bool,
    pub on_pitch: bool,
}

/// A minute whose resolution failed and was skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DegradedMinute {
    pub minute: u8,
    pub reason: String,
}

/// Immutable result of one simulated match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub seed: u64,
    pub teams: PerSide<String>,
    pub score: PerSide<u8>,
    pub referee: RefereeProfile,
    pub stoppage_minutes: u8,
    /// Last minute played, regulation plus stoppage
    pub final_minute: u8,
    pub stats: PerSide<TeamStatBlock>,
    pub goals: Vec<GoalRecord>,
    pub substitutions: Vec<SubstitutionRecord>,
    pub players: PerSide<Vec<PlayerSnapshot>>,
    pub events: Vec<MatchEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_minutes: Vec<DegradedMinute>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("{side:?}: shots on target {on_target} exceed shots {shots}")]
    OnTargetExceedsShots { side: TeamSide, on_target: u16, shots: u16 },

    #[error("{side:?}: goals {goals} exceed shots on target {on_target}")]
    GoalsExceedOnTarget { side: TeamSide, goals: u8, on_target: u16 },

    #[error("{side:?}: score {score} disagrees with {goals} recorded goals")]
    ScoreMismatch { side: TeamSide, score: u8, goals: usize },

    #[error("goal recorded in minute {minute}")]
    GoalMinuteOutOfRange { minute: u8 },

    #[error("more than one goal in minute {minute}")]
    DuplicateGoalMinute { minute: u8 },

    #[error("{side:?}: duels won {won} + lost {lost} != total {total}")]
    DuelLedger { side: TeamSide, won: u16, lost: u16, total: u16 },

    #[error("duel totals differ between teams ({home} vs {away})")]
    DuelTotalsDiffer { home: u16, away: u16 },

    #[error("event at minute {minute} outside 0..={final_minute}")]
    EventMinuteOutOfRange { minute: u8, final_minute: u8 },

    #[error("{name}: energy {energy} outside [0, 1]")]
    EnergyOutOfRange { name: String, energy: f32 },
}

impl MatchReport {
    pub fn total_goals(&self) -> u32 {
        self.score.home as u32 + self.score.away as u32
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.score.home.cmp(&self.score.away) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn goals_for(&self, side: TeamSide) -> impl Iterator<Item = &GoalRecord> {
        self.goals.iter().filter(move |g| g.side == side)
    }

    /// Cross-checks the counters against each other and against the
    /// timeline. Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (side, stats) in self.stats.iter() {
            if stats.shots_on_target > stats.shots {
                return Err(InvariantViolation::OnTargetExceedsShots {
                    side,
                    on_target: stats.shots_on_target,
                    shots: stats.shots,
                });
            }
            if stats.goals as u16 > stats.shots_on_target {
                return Err(InvariantViolation::GoalsExceedOnTarget {
                    side,
                    goals: stats.goals,
                    on_target: stats.shots_on_target,
                });
            }
            let score = *self.score.get(side);
            let recorded = self.goals_for(side).count();
            let goal_events = self.events.iter().filter(|e| e.is_goal() && e.side == Some(side)).count();
            if recorded != score as usize || goal_events != recorded || stats.goals != score {
                return Err(InvariantViolation::ScoreMismatch { side, score, goals: recorded });
            }
            if stats.duels_won + stats.duels_lost != stats.duels_total {
                return Err(InvariantViolation::DuelLedger {
                    side,
                    won: stats.duels_won,
                    lost: stats.duels_lost,
                    total: stats.duels_total,
                });
            }
        }

        if self.stats.home.duels_total != self.stats.away.duels_total {
            return Err(InvariantViolation::DuelTotalsDiffer {
                home: self.stats.home.duels_total,
                away: self.stats.away.duels_total,
            });
        }

        let mut goal_minutes = BTreeSet::new();
        for goal in &self.goals {
            if goal.minute < 1 || goal.minute > self.final_minute {
                return Err(InvariantViolation::GoalMinuteOutOfRange { minute: goal.minute });
            }
            if !goal_minutes.insert(goal.minute) {
                return Err(InvariantViolation::DuplicateGoalMinute { minute: goal.minute });
            }
        }

        if let Some(event) = self.events.iter().find(|e| e.minute > self.final_minute) {
            return Err(InvariantViolation::EventMinuteOutOfRange {
                minute: event.minute,
                final_minute: self.final_minute,
            });
        }

        for (_, squad) in self.players.iter() {
            if let Some(p) = squad.iter().find(|p| !(0.0..=1.0).contains(&p.energy)) {
                return Err(InvariantViolation::EnergyOutOfRange { name: p.name.clone(), energy: p.energy });
            }
        }

        Ok(())
    }

    /// Number of timeline events whose kind matches `pred`.
    pub fn count_events(&self, side: Option<TeamSide>, pred: impl Fn(&EventKind) -> bool) -> usize {
        self.events
            .iter()
            .filter(|e| side.is_none() || e.side == side)
            .filter(|e| pred(&e.kind))
            .count()
    }
}
