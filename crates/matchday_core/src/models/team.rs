use serde::{Deserialize, Serialize};

use super::player::{Player, Position};

/// Overall attacking intent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Attacking,
    #[default]
    Balanced,
    Defensive,
}

impl Style {
    /// One step towards `Attacking`; already attacking stays put.
    pub fn intensified(self) -> Self {
        match self {
            Style::Defensive => Style::Balanced,
            Style::Balanced | Style::Attacking => Style::Attacking,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pressing {
    Low,
    #[default]
    Normal,
    High,
}

impl Pressing {
    pub fn intensified(self) -> Self {
        match self {
            Pressing::Low => Pressing::Normal,
            Pressing::Normal | Pressing::High => Pressing::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    Narrow,
    #[default]
    Normal,
    Wide,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttackChannel {
    Wings,
    #[default]
    Center,
}

/// Team descriptor as supplied by the caller. The first eleven players of
/// `players` start; the rest form the bench.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub pressing: Pressing,
    #[serde(default)]
    pub width: Width,
    #[serde(default)]
    pub attack_channel: AttackChannel,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Team {
    pub const STARTERS: usize = 11;

    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            style: Style::default(),
            pressing: Pressing::default(),
            width: Width::default(),
            attack_channel: AttackChannel::default(),
            players,
        }
    }

    pub fn with_tactics(mut self, style: Style, pressing: Pressing) -> Self {
        self.style = style;
        self.pressing = pressing;
        self
    }

    pub fn with_shape(mut self, width: Width, attack_channel: AttackChannel) -> Self {
        self.width = width;
        self.attack_channel = attack_channel;
        self
    }

    pub fn starters(&self) -> &[Player] {
        &self.players[..self.players.len().min(Self::STARTERS)]
    }

    pub fn bench(&self) -> &[Player] {
        self.players.get(Self::STARTERS..).unwrap_or(&[])
    }

    pub fn count_starters_at(&self, position: Position) -> usize {
        self.starters().iter().filter(|p| p.position == position).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensify_saturates() {
        assert_eq!(Style::Defensive.intensified(), Style::Balanced);
        assert_eq!(Style::Attacking.intensified(), Style::Attacking);
        assert_eq!(Pressing::Low.intensified(), Pressing::Normal);
        assert_eq!(Pressing::High.intensified(), Pressing::High);
    }

    #[test]
    fn test_starters_and_bench_split() {
        let players = (0..14).map(|i| Player::new(i, format!("P{i}"), Position::MID)).collect();
        let team = Team::new("Split", players);
        assert_eq!(team.starters().len(), 11);
        assert_eq!(team.bench().len(), 3);

        let short = Team::new("Short", vec![Player::new(1, "Solo", Position::GK)]);
        assert_eq!(short.starters().len(), 1);
        assert!(short.bench().is_empty());
    }

    #[test]
    fn test_tactics_default_when_absent() {
        let team: Team = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert_eq!(team.style, Style::Balanced);
        assert_eq!(team.pressing, Pressing::Normal);
        assert_eq!(team.attack_channel, AttackChannel::Center);
        assert!(team.players.is_empty());
    }
}
