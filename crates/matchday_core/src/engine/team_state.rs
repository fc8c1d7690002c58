use rand::Rng;
use std::collections::BTreeMap;

use super::config::EngineConfig;
use super::player_state::PlayerState;
use super::possession::TeamRatings;
use super::stats::TeamStats;
use crate::models::{AttackChannel, PlayerSnapshot, Position, Pressing, Style, Team, Width};

/// Reference to whoever performs an action: a squad member or the team's
/// synthesized stand-in when the pitch has nobody suitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Roster(usize),
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct TeamState {
    pub name: String,
    pub style: Style,
    pub pressing: Pressing,
    pub width: Width,
    pub attack_channel: AttackChannel,
    /// Whole squad in roster order; indices are stable for the match
    pub players: Vec<PlayerState>,
    /// Roster indices currently on the pitch
    pub active: Vec<usize>,
    /// Unused substitutes, roster order
    pub bench: Vec<usize>,
    pub placeholder: PlayerState,
    pub yellow_ledger: BTreeMap<Slot, u8>,
    pub subs_used: u8,
    pub stats: TeamStats,
    pub ratings: TeamRatings,
    /// Minute of the most recent duel this team won
    pub last_duel_win: Option<u8>,
}

impl TeamState {
    /// Deep copy of the caller's team. Distance jitter is drawn per player
    /// from the match RNG in roster order.
    pub fn from_team<R: Rng + ?Sized>(team: &Team, cfg: &EngineConfig, rng: &mut R) -> Self {
        let jitter = cfg.distance.clamped_jitter();
        let players: Vec<PlayerState> = team
            .players
            .iter()
            .map(|p| PlayerState::from_player(p, rng.gen_range(-jitter..=jitter)))
            .collect();

        let starters = players.len().min(Team::STARTERS);
        let mut state = Self {
            name: team.name.clone(),
            style: team.style,
            pressing: team.pressing,
            width: team.width,
            attack_channel: team.attack_channel,
            active: (0..starters).collect(),
            bench: (starters..players.len()).collect(),
            players,
            placeholder: PlayerState::placeholder(&team.name),
            yellow_ledger: BTreeMap::new(),
            subs_used: 0,
            stats: TeamStats::default(),
            ratings: TeamRatings::default(),
            last_duel_win: None,
        };
        state.ratings = TeamRatings::compute(&state, 0, cfg);
        state
    }

    pub fn player(&self, slot: Slot) -> &PlayerState {
        match slot {
            Slot::Roster(idx) => self.players.get(idx).unwrap_or(&self.placeholder),
            Slot::Placeholder => &self.placeholder,
        }
    }

    pub fn player_mut(&mut self, slot: Slot) -> &mut PlayerState {
        match slot {
            Slot::Roster(idx) if idx < self.players.len() => &mut self.players[idx],
            _ => &mut self.placeholder,
        }
    }

    pub fn active_players(&self) -> impl Iterator<Item = (usize, &PlayerState)> {
        self.active.iter().filter_map(|&idx| self.players.get(idx).map(|p| (idx, p)))
    }

    /// Active roster indices matching `pred`.
    pub fn active_where(&self, pred: impl Fn(&PlayerState) -> bool) -> Vec<usize> {
        self.active_players().filter(|(_, p)| pred(p)).map(|(idx, _)| idx).collect()
    }

    pub fn active_outfield(&self) -> Vec<usize> {
        self.active_where(|p| p.position.is_outfield())
    }

    pub fn active_at(&self, positions: &[Position]) -> Vec<usize> {
        self.active_where(|p| positions.contains(&p.position))
    }

    /// First goalkeeper on the pitch, else anyone on the pitch.
    pub fn goalkeeper(&self) -> Slot {
        self.active_players()
            .find(|(_, p)| p.position.is_goalkeeper())
            .or_else(|| self.active_players().next())
            .map(|(idx, _)| Slot::Roster(idx))
            .unwrap_or(Slot::Placeholder)
    }

    pub fn yellow_count(&self, slot: Slot) -> u8 {
        self.yellow_ledger.get(&slot).copied().unwrap_or(0)
    }

    pub fn subs_remaining(&self, budget: u8) -> u8 {
        budget.saturating_sub(self.subs_used)
    }

    /// Removes a dismissed player from the pitch. The placeholder cannot be
    /// sent off.
    pub fn send_off(&mut self, slot: Slot) {
        if let Slot::Roster(idx) = slot {
            self.active.retain(|&a| a != idx);
            if let Some(p) = self.players.get_mut(idx) {
                p.sent_off = true;
            }
        }
    }

    /// Moves one step up in style and pressing. Returns the new settings
    /// when anything changed.
    pub fn shift_tactics_up(&mut self) -> Option<(Style, Pressing)> {
        let style = self.style.intensified();
        let pressing = self.pressing.intensified();
        if style == self.style && pressing == self.pressing {
            return None;
        }
        self.style = style;
        self.pressing = pressing;
        Some((style, pressing))
    }

    pub fn mean_active_attribute(&self, attr: impl Fn(&PlayerState) -> u8) -> f64 {
        let values: Vec<f64> = self.active_players().map(|(_, p)| attr(p) as f64).collect();
        if values.is_empty() {
            50.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, p)| p.snapshot(self.active.contains(&idx), self.yellow_count(Slot::Roster(idx))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerAttributes};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squad(n: u32) -> Team {
        let players = (0..n)
            .map(|i| {
                let pos = match i {
                    0 => Position::GK,
                    1..=4 => Position::DEF,
                    5..=8 => Position::MID,
                    _ => Position::FWD,
                };
                Player::new(i + 1, format!("P{}", i + 1), pos).with_attributes(PlayerAttributes::uniform(60))
            })
            .collect();
        Team::new("Squad", players)
    }

    #[test]
    fn test_first_eleven_start() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = TeamState::from_team(&squad(14), &EngineConfig::default(), &mut rng);
        assert_eq!(state.active, (0..11).collect::<Vec<_>>());
        assert_eq!(state.bench, vec![11, 12, 13]);
        assert_eq!(state.goalkeeper(), Slot::Roster(0));
    }

    #[test]
    fn test_jitter_distinguishes_players() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = TeamState::from_team(&squad(11), &EngineConfig::default(), &mut rng);
        let mut jitters: Vec<f64> = state.players.iter().map(|p| p.distance_jitter).collect();
        assert!(jitters.iter().all(|j| j.abs() <= 0.07));
        jitters.dedup();
        assert_eq!(jitters.len(), 11);
    }

    #[test]
    fn test_empty_team_falls_back_to_placeholder() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = TeamState::from_team(&Team::new("Ghosts", Vec::new()), &EngineConfig::default(), &mut rng);
        assert_eq!(state.goalkeeper(), Slot::Placeholder);
        assert_eq!(state.player(Slot::Roster(5)).name, "Ghosts player");
        assert_eq!(state.mean_active_attribute(|p| p.attributes.mental.aggression), 50.0);
    }

    #[test]
    fn test_send_off_leaves_pitch() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = TeamState::from_team(&squad(11), &EngineConfig::default(), &mut rng);
        state.send_off(Slot::Roster(3));
        assert_eq!(state.active.len(), 10);
        assert!(state.players[3].sent_off);
        state.send_off(Slot::Placeholder);
        assert_eq!(state.active.len(), 10);
    }

    #[test]
    fn test_tactics_shift_saturates() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let team = squad(11).with_tactics(Style::Defensive, Pressing::Low);
        let mut state = TeamState::from_team(&team, &EngineConfig::default(), &mut rng);
        assert_eq!(state.shift_tactics_up(), Some((Style::Balanced, Pressing::Normal)));
        assert_eq!(state.shift_tactics_up(), Some((Style::Attacking, Pressing::High)));
        assert_eq!(state.shift_tactics_up(), None);
        assert_eq!((state.style, state.pressing), (Style::Attacking, Pressing::High));
    }

    #[test]
    fn test_extreme_jitter_is_bounded() {
        let mut cfg = EngineConfig::default();
        cfg.distance.jitter = 1e308;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let state = TeamState::from_team(&squad(11), &cfg, &mut rng);
        assert!(state.players.iter().all(|p| p.distance_jitter.abs() <= 1.0));
    }
}
