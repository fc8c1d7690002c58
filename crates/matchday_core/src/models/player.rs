use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse playing position. Specific role codes (CB, CM, ST, ...) collapse
/// onto the four lines the engine reasons about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    GK,
    #[serde(alias = "DF", alias = "CB", alias = "LB", alias = "RB", alias = "LWB", alias = "RWB")]
    DEF,
    #[serde(alias = "MF", alias = "CDM", alias = "CM", alias = "CAM", alias = "LM", alias = "RM")]
    MID,
    #[serde(alias = "FW", alias = "ST", alias = "CF", alias = "LW", alias = "RW")]
    FWD,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_outfield(&self) -> bool {
        !self.is_goalkeeper()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "DEF" | "DF" | "CB" | "LB" | "RB" | "LWB" | "RWB" => Ok(Position::DEF),
            "MID" | "MF" | "CDM" | "CM" | "CAM" | "LM" | "RM" => Ok(Position::MID),
            "FWD" | "FW" | "ST" | "CF" | "LW" | "RW" => Ok(Position::FWD),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Effort classification; modulates fatigue drain and distance covered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkRate {
    Low,
    #[default]
    #[serde(alias = "medium")]
    Med,
    High,
}

fn neutral_rating() -> u8 {
    50
}

fn full() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicalAttributes {
    pub pace: u8,
    pub acceleration: u8,
    pub stamina: u8,
    pub strength: u8,
    pub agility: u8,
    pub balance: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TechnicalAttributes {
    pub passing: u8,
    pub shooting: u8,
    pub dribbling: u8,
    pub first_touch: u8,
    pub crossing: u8,
    pub heading: u8,
    pub tackling: u8,
    pub marking: u8,
    /// Goalkeeping
    pub reflexes: u8,
    pub handling: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MentalAttributes {
    pub positioning: u8,
    pub anticipation: u8,
    pub decisions: u8,
    pub composure: u8,
    pub vision: u8,
    pub concentration: u8,
    pub aggression: u8,
}

impl PhysicalAttributes {
    pub fn uniform(value: u8) -> Self {
        Self { pace: value, acceleration: value, stamina: value, strength: value, agility: value, balance: value }
    }

    pub fn average(&self) -> f32 {
        let values = [self.pace, self.acceleration, self.stamina, self.strength, self.agility, self.balance];
        mean_u8(&values)
    }
}

impl TechnicalAttributes {
    pub fn uniform(value: u8) -> Self {
        Self {
            passing: value,
            shooting: value,
            dribbling: value,
            first_touch: value,
            crossing: value,
            heading: value,
            tackling: value,
            marking: value,
            reflexes: value,
            handling: value,
        }
    }

    pub fn average(&self) -> f32 {
        let values = [
            self.passing,
            self.shooting,
            self.dribbling,
            self.first_touch,
            self.crossing,
            self.heading,
            self.tackling,
            self.marking,
            self.reflexes,
            self.handling,
        ];
        mean_u8(&values)
    }
}

impl MentalAttributes {
    pub fn uniform(value: u8) -> Self {
        Self {
            positioning: value,
            anticipation: value,
            decisions: value,
            composure: value,
            vision: value,
            concentration: value,
            aggression: value,
        }
    }

    pub fn average(&self) -> f32 {
        let values = [
            self.positioning,
            self.anticipation,
            self.decisions,
            self.composure,
            self.vision,
            self.concentration,
            self.aggression,
        ];
        mean_u8(&values)
    }
}

impl Default for PhysicalAttributes {
    fn default() -> Self {
        Self::uniform(neutral_rating())
    }
}

impl Default for TechnicalAttributes {
    fn default() -> Self {
        Self::uniform(neutral_rating())
    }
}

impl Default for MentalAttributes {
    fn default() -> Self {
        Self::uniform(neutral_rating())
    }
}

/// The three attribute groups. Any group (or any single attribute) missing
/// from input data reads as a neutral 50.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerAttributes {
    pub physical: PhysicalAttributes,
    pub technical: TechnicalAttributes,
    pub mental: MentalAttributes,
}

impl PlayerAttributes {
    pub fn uniform(value: u8) -> Self {
        Self {
            physical: PhysicalAttributes::uniform(value),
            technical: TechnicalAttributes::uniform(value),
            mental: MentalAttributes::uniform(value),
        }
    }

    /// `0.5·physical + 0.35·technical + 0.15·mental` on the 0-100 scale.
    pub fn weighted_overall(&self) -> f32 {
        0.5 * self.physical.average() + 0.35 * self.technical.average() + 0.15 * self.mental.average()
    }
}

/// Roster entry as supplied by the caller. The engine copies it into its own
/// state and never touches the original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub attributes: PlayerAttributes,
    /// Starting energy, 0.0-1.0
    #[serde(default = "full")]
    pub energy: f32,
    #[serde(default)]
    pub work_rate: WorkRate,
    /// Current form, 1.0 is neutral
    #[serde(default = "full")]
    pub form: f32,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            attributes: PlayerAttributes::default(),
            energy: 1.0,
            work_rate: WorkRate::Med,
            form: 1.0,
        }
    }

    pub fn with_attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_work_rate(mut self, work_rate: WorkRate) -> Self {
        self.work_rate = work_rate;
        self
    }
}

fn mean_u8(values: &[u8]) -> f32 {
    if values.is_empty() {
        return neutral_rating() as f32;
    }
    values.iter().map(|&v| v as f32).sum::<f32>() / values.len() as f32
}
