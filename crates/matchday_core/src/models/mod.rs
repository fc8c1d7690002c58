pub mod events;
pub mod match_report;
pub mod player;
pub mod side;
pub mod team;

pub use events::{
    Announcement, CardKind, CornerOrigin, DuelAction, EventKind, EventPlayer, FreekickPhase,
    GoalContext, InjurySeverity, MatchEvent, NarrationBeat, PenaltyPhase, ShotOrigin, ShotOutcome,
    SubstitutionReason,
};
pub use match_report::{
    DegradedMinute, GoalRecord, InvariantViolation, MatchReport, PlayerSnapshot, SubstitutionRecord,
    TeamStatBlock,
};
pub use player::{
    MentalAttributes, PhysicalAttributes, Player, PlayerAttributes, Position, TechnicalAttributes,
    WorkRate,
};
pub use side::{PerSide, TeamSide};
pub use team::{AttackChannel, Pressing, Style, Team, Width};
