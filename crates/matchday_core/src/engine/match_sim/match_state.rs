use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

use crate::engine::config::EngineConfig;
use crate::engine::fatigue::MinuteActivity;
use crate::engine::player_state::PlayerState;
use crate::engine::probability::weighted_index;
use crate::engine::referee::{Referee, RefereeSelector};
use crate::engine::team_state::{Slot, TeamState};
use crate::models::{
    DegradedMinute, EventKind, MatchEvent, PerSide, Position, SubstitutionRecord, Team, TeamSide,
};

/// Everything one match mutates. Created once per match, consumed by the
/// report builder.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub seed: u64,
    pub minute: u8,
    pub teams: PerSide<TeamState>,
    pub referee: Referee,
    /// Minutes already credited with a goal
    pub goal_lock: BTreeSet<u8>,
    pub duel_minutes: BTreeSet<u8>,
    pub disruption: f64,
    pub stoppage_minutes: u8,
    pub events: Vec<MatchEvent>,
    pub substitutions: Vec<SubstitutionRecord>,
    pub degraded: Vec<DegradedMinute>,
    pub activity: MinuteActivity,
    pub(crate) rng: ChaCha8Rng,
}

/// State captured before a minute is resolved, restored if it fails.
#[derive(Debug, Clone)]
pub(crate) struct MinuteCheckpoint {
    teams: PerSide<TeamState>,
    goal_lock: BTreeSet<u8>,
    disruption: f64,
    events: usize,
    activity: MinuteActivity,
}

impl MatchState {
    /// Seeds the RNG, picks the referee, snapshots both teams and schedules
    /// the duels, in that order.
    pub fn new(home: &Team, away: &Team, seed: u64, referee: RefereeSelector, cfg: &EngineConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let referee = Referee::new(referee.resolve(&mut rng), &cfg.referee);
        let home = TeamState::from_team(home, cfg, &mut rng);
        let away = TeamState::from_team(away, cfg, &mut rng);
        let duel_minutes = schedule_duels(cfg.rules.half_length, cfg.rules.duels_per_half, &mut rng);

        Self {
            seed,
            minute: 0,
            teams: PerSide::new(home, away),
            referee,
            goal_lock: BTreeSet::new(),
            duel_minutes,
            disruption: 0.0,
            stoppage_minutes: 0,
            events: Vec::new(),
            substitutions: Vec::new(),
            degraded: Vec::new(),
            activity: MinuteActivity::default(),
            rng,
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub(crate) fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    #[inline]
    pub fn team(&self, side: TeamSide) -> &TeamState {
        self.teams.get(side)
    }

    #[inline]
    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamState {
        self.teams.get_mut(side)
    }

    pub fn player(&self, side: TeamSide, slot: Slot) -> &PlayerState {
        self.teams.get(side).player(slot)
    }

    pub fn score(&self) -> PerSide<u8> {
        self.teams.map(|_, t| t.stats.goals)
    }

    pub(crate) fn emit(&mut self, side: TeamSide, kind: EventKind) {
        self.events.push(MatchEvent::team(self.minute, side, kind));
    }

    /// Claims `minute` for a goal. `false` if a goal was already credited
    /// in that minute.
    pub fn try_lock_goal(&mut self, minute: u8) -> bool {
        self.goal_lock.insert(minute)
    }

    pub fn is_goal_locked(&self, minute: u8) -> bool {
        self.goal_lock.contains(&minute)
    }

    pub fn last_event_was_corner(&self, side: TeamSide) -> bool {
        matches!(
            self.events.last(),
            Some(MatchEvent { side: Some(s), kind: EventKind::Corner { .. }, .. }) if *s == side
        )
    }

    pub(crate) fn checkpoint(&self) -> MinuteCheckpoint {
        MinuteCheckpoint {
            teams: self.teams.clone(),
            goal_lock: self.goal_lock.clone(),
            disruption: self.disruption,
            events: self.events.len(),
            activity: self.activity.clone(),
        }
    }

    /// Undoes everything since `checkpoint` except RNG consumption.
    pub(crate) fn restore(&mut self, checkpoint: MinuteCheckpoint) {
        self.teams = checkpoint.teams;
        self.goal_lock = checkpoint.goal_lock;
        self.disruption = checkpoint.disruption;
        self.events.truncate(checkpoint.events);
        self.activity = checkpoint.activity;
    }
}

/// `per_half` duel minutes in each half, one drawn uniformly from each of
/// `per_half` consecutive equal segments.
pub fn schedule_duels<R: Rng + ?Sized>(half_length: u8, per_half: u8, rng: &mut R) -> BTreeSet<u8> {
    let mut minutes = BTreeSet::new();
    let n = per_half.min(half_length);
    if n == 0 {
        return minutes;
    }
    let segment = half_length / n;
    for half in 0..2u8 {
        let start = half * half_length + 1;
        let end = (half + 1) * half_length;
        for i in 0..n {
            let lo = start + i * segment;
            let hi = if i + 1 == n { end } else { lo + segment - 1 };
            minutes.insert(rng.gen_range(lo..=hi));
        }
    }
    minutes
}

/// Weighted pick among the active players of `team`.
///
/// Players at `preferred` positions are tried first, then the outfield,
/// then anyone on the pitch, then the team's placeholder.
pub(crate) fn pick_weighted<R: Rng + ?Sized>(
    team: &TeamState,
    rng: &mut R,
    preferred: &[Position],
    weight: impl Fn(&PlayerState) -> f64,
) -> Slot {
    let in_pool = |pool: usize, p: &PlayerState| match pool {
        0 => preferred.is_empty() || preferred.contains(&p.position),
        1 => p.position.is_outfield(),
        _ => true,
    };
    for pool in 0..3 {
        let (slots, weights): (Vec<usize>, Vec<f64>) =
            team.active_players().filter(|(_, p)| in_pool(pool, *p)).map(|(idx, p)| (idx, weight(p))).unzip();
        if let Some(k) = weighted_index(&weights, rng) {
            return Slot::Roster(slots[k]);
        }
    }
    Slot::Placeholder
}

/// Highest-scoring active outfield player, else anyone on the pitch.
pub(crate) fn pick_best(team: &TeamState, score: impl Fn(&PlayerState) -> f64) -> Slot {
    let best = |outfield_only: bool| {
        team.active_players()
            .filter(|(_, p)| !outfield_only || p.position.is_outfield())
            .max_by(|(ia, a), (ib, b)| score(*a).total_cmp(&score(*b)).then(ib.cmp(ia)))
            .map(|(idx, _)| Slot::Roster(idx))
    };
    best(true).or_else(|| best(false)).unwrap_or(Slot::Placeholder)
}
