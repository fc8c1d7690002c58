use serde::{Deserialize, Serialize};

use super::side::TeamSide;
use super::team::{Pressing, Style};

/// One entry of the match timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    /// Owning team; `None` for match-wide announcements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TeamSide>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl MatchEvent {
    pub fn team(minute: u8, side: TeamSide, kind: EventKind) -> Self {
        Self { minute, side: Some(side), kind }
    }

    pub fn announce(minute: u8, announcement: Announcement) -> Self {
        Self { minute, side: None, kind: EventKind::Announce { announcement } }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.kind, EventKind::Goal { .. })
    }
}

/// Player reference carried in event payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventPlayer {
    pub id: u32,
    pub name: String,
}

/// Closed event taxonomy. Commentary layers match on the variant (or use
/// [`EventKind::commentary_key`]) instead of comparing strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Announce {
        announcement: Announcement,
    },
    Shot {
        player: EventPlayer,
        on_target: bool,
        outcome: ShotOutcome,
        origin: ShotOrigin,
        xg: f32,
    },
    Goal {
        scorer: EventPlayer,
        #[serde(skip_serializing_if = "Option::is_none")]
        assist: Option<EventPlayer>,
        context: GoalContext,
    },
    Card {
        card: CardKind,
        player: EventPlayer,
    },
    Foul {
        offender: EventPlayer,
    },
    Corner {
        origin: CornerOrigin,
    },
    Freekick {
        phase: FreekickPhase,
    },
    Penalty {
        phase: PenaltyPhase,
    },
    Duel {
        action: DuelAction,
        attacker: EventPlayer,
        defender: EventPlayer,
        attacker_won: bool,
    },
    Injury {
        player: EventPlayer,
        severity: InjurySeverity,
    },
    Substitution {
        player_out: EventPlayer,
        player_in: EventPlayer,
        reason: SubstitutionReason,
    },
    TacticalShift {
        style: Style,
        pressing: Pressing,
    },
    Narration {
        beat: NarrationBeat,
    },
}

impl EventKind {
    /// Phrase-pool key for commentary lookup.
    pub fn commentary_key(&self) -> &'static str {
        match self {
            EventKind::Announce { announcement } => match announcement {
                Announcement::KickOff => "kickoff",
                Announcement::HalfTime => "half_time",
                Announcement::StoppageTime { .. } => "stoppage_time",
                Announcement::FullTime => "full_time",
            },
            EventKind::Shot { outcome, .. } => match outcome {
                ShotOutcome::Goal => "shot_scored",
                ShotOutcome::Saved => "shot_saved",
                ShotOutcome::Wide => "shot_wide",
                ShotOutcome::Blocked => "shot_blocked",
            },
            EventKind::Goal { .. } => "goal",
            EventKind::Card { card, .. } => match card {
                CardKind::Yellow => "yellow_card",
                CardKind::SecondYellow => "second_yellow",
                CardKind::Red => "red_card",
            },
            EventKind::Foul { .. } => "foul",
            EventKind::Corner { .. } => "corner",
            EventKind::Freekick { phase } => match phase {
                FreekickPhase::Awarded => "freekick_awarded",
                FreekickPhase::Converted => "freekick_converted",
                FreekickPhase::Missed => "freekick_missed",
            },
            EventKind::Penalty { phase } => match phase {
                PenaltyPhase::Awarded => "penalty_awarded",
                PenaltyPhase::Scored => "penalty_scored",
                PenaltyPhase::Missed => "penalty_missed",
            },
            EventKind::Duel { attacker_won: true, .. } => "duel_won",
            EventKind::Duel { attacker_won: false, .. } => "duel_lost",
            EventKind::Injury { .. } => "injury",
            EventKind::Substitution { .. } => "substitution",
            EventKind::TacticalShift { .. } => "tactical_shift",
            EventKind::Narration { beat } => match beat {
                NarrationBeat::BuildUp => "build_up",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Announcement {
    KickOff,
    HalfTime,
    StoppageTime { minutes: u8 },
    FullTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShotOutcome {
    Goal,
    Saved,
    Wide,
    Blocked,
}

impl ShotOutcome {
    /// Goals and saves are on target; wide and blocked shots are not.
    pub fn is_on_target(self) -> bool {
        matches!(self, ShotOutcome::Goal | ShotOutcome::Saved)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShotOrigin {
    OpenPlay,
    Duel,
    Corner,
    Freekick,
    Penalty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalContext {
    OpenPlay,
    Duel,
    Corner,
    Freekick,
    Penalty,
}

impl GoalContext {
    /// Set-piece goals from a dead ball never carry an assist.
    pub fn allows_assist(self) -> bool {
        matches!(self, GoalContext::OpenPlay | GoalContext::Duel | GoalContext::Corner)
    }
}

impl From<ShotOrigin> for GoalContext {
    fn from(origin: ShotOrigin) -> Self {
        match origin {
            ShotOrigin::OpenPlay => GoalContext::OpenPlay,
            ShotOrigin::Duel => GoalContext::Duel,
            ShotOrigin::Corner => GoalContext::Corner,
            ShotOrigin::Freekick => GoalContext::Freekick,
            ShotOrigin::Penalty => GoalContext::Penalty,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Yellow,
    /// Second booking, player is sent off
    SecondYellow,
    Red,
}

impl CardKind {
    pub fn is_dismissal(self) -> bool {
        !matches!(self, CardKind::Yellow)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrigin {
    /// Off-target shot deflected behind
    Blocked,
    /// Save pushed behind
    Parried,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FreekickPhase {
    Awarded,
    Converted,
    Missed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyPhase {
    Awarded,
    Scored,
    Missed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DuelAction {
    Dribble,
    Pass,
    Shot,
    Tackle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionReason {
    Fatigue,
    Injury,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NarrationBeat {
    BuildUp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> EventPlayer {
        EventPlayer { id: 7, name: "Kim".to_string() }
    }

    #[test]
    fn test_event_serializes_with_flat_kind_tag() {
        let event = MatchEvent::team(12, TeamSide::Home, EventKind::Freekick { phase: FreekickPhase::Awarded });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["minute"], 12);
        assert_eq!(json["side"], "home");
        assert_eq!(json["kind"], "freekick");
        assert_eq!(json["phase"], "awarded");

        let back: MatchEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_announcements_omit_side() {
        let event = MatchEvent::announce(0, Announcement::KickOff);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("side").is_none());
    }

    #[test]
    fn test_commentary_keys() {
        let shot = EventKind::Shot {
            player: player(),
            on_target: true,
            outcome: ShotOutcome::Saved,
            origin: ShotOrigin::OpenPlay,
            xg: 0.1,
        };
        assert_eq!(shot.commentary_key(), "shot_saved");
        assert_eq!(EventKind::Penalty { phase: PenaltyPhase::Missed }.commentary_key(), "penalty_missed");
        assert_eq!(
            EventKind::Card { card: CardKind::SecondYellow, player: player() }.commentary_key(),
            "second_yellow"
        );
    }

    #[test]
    fn test_set_piece_goals_never_assisted() {
        assert!(!GoalContext::Penalty.allows_assist());
        assert!(!GoalContext::Freekick.allows_assist());
        assert!(GoalContext::Corner.allows_assist());
    }
}
