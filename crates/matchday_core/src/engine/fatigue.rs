//! Fatigue model: per-minute energy drain and distance covered, plus the
//! half-time rest step.

use super::config::EngineConfig;
use super::player_state::{PlayerState, RatingBuff};
use super::team_state::{Slot, TeamState};
use crate::models::PerSide;

/// Who did something strenuous this minute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinuteActivity {
    pub duel: PerSide<Option<Slot>>,
    pub sprint: PerSide<Option<Slot>>,
}

impl MinuteActivity {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-player effort flags for one tick.
#[derive(Debug, Clone, Copy, Default)]
struct Effort {
    duel: bool,
    sprint: bool,
}

/// One minute of fatigue for every active player of both teams.
pub fn apply_tick(home: &mut TeamState, away: &mut TeamState, activity: &MinuteActivity, cfg: &EngineConfig) {
    drain_team(home, activity.duel.home, activity.sprint.home, cfg);
    drain_team(away, activity.duel.away, activity.sprint.away, cfg);
}

fn drain_team(team: &mut TeamState, duel: Option<Slot>, sprint: Option<Slot>, cfg: &EngineConfig) {
    let team_drain = 1.0 + cfg.fatigue.style_extra.get(team.style) + cfg.fatigue.pressing_extra.get(team.pressing);
    let team_pace = cfg.distance.style.get(team.style) * cfg.distance.pressing.get(team.pressing);

    for &idx in &team.active {
        let effort = Effort { duel: duel == Some(Slot::Roster(idx)), sprint: sprint == Some(Slot::Roster(idx)) };
        if let Some(player) = team.players.get_mut(idx) {
            drain_player(player, team_drain, team_pace, effort, cfg);
        }
    }
}

fn drain_player(player: &mut PlayerState, team_drain: f64, team_pace: f64, effort: Effort, cfg: &EngineConfig) {
    let f = &cfg.fatigue;
    let stamina = player.attributes.physical.stamina as f64;
    let stamina_mult = (1.0 - (stamina - f.stamina_pivot) / f.stamina_divisor).clamp(f.stamina_min, f.stamina_max);

    let mut drain = f.base_drain * f.position.get(player.position) * f.work_rate.get(player.work_rate) * stamina_mult * team_drain;
    if effort.duel {
        drain += f.duel_drain;
    }
    if effort.sprint {
        drain += f.sprint_drain;
    }
    if drain.is_finite() && drain > 0.0 {
        let floor = f.energy_floor.clamp(0.0, 1.0).min(player.energy);
        player.energy = (player.energy - drain).max(floor);
    }

    let d = &cfg.distance;
    let mut km = d.base_km_per_minute
        * team_pace
        * d.position.get(player.position)
        * d.work_rate.get(player.work_rate)
        * (1.0 + player.distance_jitter);
    if effort.sprint {
        km += d.sprint_boost_km;
    }
    if km.is_finite() && km > 0.0 {
        player.distance_km += km;
    }
}

/// Half-time rest: flat regeneration for the most depleted players and a
/// temporary buff for the top-rated one. `half_end` is the last minute of
/// the first half.
pub fn apply_halftime(team: &mut TeamState, half_end: u8, cfg: &EngineConfig) {
    let rules = &cfg.rules;

    let mut by_energy: Vec<usize> = team.active.clone();
    by_energy.sort_by(|&a, &b| team.players[a].energy.total_cmp(&team.players[b].energy).then(a.cmp(&b)));
    for &idx in by_energy.iter().take(rules.halftime_regen_players) {
        let p = &mut team.players[idx];
        p.energy = (p.energy + rules.halftime_regen.max(0.0)).min(1.0);
    }

    let top = team
        .active
        .iter()
        .copied()
        .max_by(|&a, &b| {
            team.players[a]
                .overall(half_end, cfg)
                .total_cmp(&team.players[b].overall(half_end, cfg))
                .then(b.cmp(&a))
        });
    if let Some(idx) = top {
        team.players[idx].buff = Some(RatingBuff {
            multiplier: 1.0 + rules.halftime_buff_percent / 100.0,
            until_minute: half_end.saturating_add(rules.halftime_buff_minutes),
        });
    }
}
