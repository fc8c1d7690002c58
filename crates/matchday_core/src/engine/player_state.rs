//! In-match player snapshot.
//!
//! Built once from the caller's [`Player`] and then owned by the match; the
//! caller's roster is never aliased or mutated.

use crate::engine::config::EngineConfig;
use crate::models::{EventPlayer, Player, PlayerAttributes, PlayerSnapshot, Position, WorkRate};

/// Temporary rating boost granted at half-time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBuff {
    pub multiplier: f64,
    /// Last minute (inclusive) the buff applies
    pub until_minute: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub attributes: PlayerAttributes,
    pub work_rate: WorkRate,
    pub form: f64,
    /// 0.0-1.0, only rises at half-time
    pub energy: f64,
    pub distance_km: f64,
    /// Stable per-player distance jitter, drawn once at kick-off
    pub distance_jitter: f64,
    pub injured: bool,
    pub sent_off: bool,
    /// Entered as a substitute
    pub came_on: bool,
    pub buff: Option<RatingBuff>,
}

impl PlayerState {
    pub fn from_player(player: &Player, distance_jitter: f64) -> Self {
        let energy = if player.energy.is_finite() { player.energy.clamp(0.0, 1.0) as f64 } else { 1.0 };
        let form = if player.form.is_finite() { player.form.clamp(0.5, 1.5) as f64 } else { 1.0 };
        Self {
            id: player.id,
            name: player.name.clone(),
            position: player.position,
            attributes: player.attributes.clone(),
            work_rate: player.work_rate,
            form,
            energy,
            distance_km: 0.0,
            distance_jitter,
            injured: false,
            sent_off: false,
            came_on: false,
            buff: None,
        }
    }

    /// Stand-in used when a team has nobody suitable on the pitch.
    pub fn placeholder(team_name: &str) -> Self {
        let player = Player::new(0, format!("{team_name} player"), Position::MID);
        Self::from_player(&player, 0.0)
    }

    pub fn event_ref(&self) -> EventPlayer {
        EventPlayer { id: self.id, name: self.name.clone() }
    }

    /// Attribute-only rating, `0.5·physical + 0.35·technical + 0.15·mental`.
    pub fn base_overall(&self) -> f64 {
        self.attributes.weighted_overall() as f64
    }

    /// Rating used for selection and team composites: base scaled by form,
    /// energy, injury and any active buff.
    pub fn overall(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        self.base_overall() * self.form * self.energy * self.injury_factor(cfg) * self.buff_factor(minute)
    }

    /// Multiplier applied to raw attributes in contests: stepped fatigue
    /// penalty, injury and buff.
    pub fn condition(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        let fatigue = cfg
            .fatigue
            .skill_thresholds
            .iter()
            .find(|(threshold, _)| self.energy < *threshold)
            .map(|(_, mult)| *mult)
            .unwrap_or(1.0);
        fatigue * self.injury_factor(cfg) * self.buff_factor(minute)
    }

    fn injury_factor(&self, cfg: &EngineConfig) -> f64 {
        if self.injured {
            cfg.injury.injured_rating_multiplier
        } else {
            1.0
        }
    }

    fn buff_factor(&self, minute: u8) -> f64 {
        match self.buff {
            Some(buff) if minute <= buff.until_minute => buff.multiplier,
            _ => 1.0,
        }
    }

    // ========== Derived contest scores ==========

    pub fn finishing(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        let t = &self.attributes.technical;
        let raw = 0.6 * t.shooting as f64 + 0.2 * t.first_touch as f64 + 0.2 * self.attributes.mental.composure as f64;
        raw * self.condition(minute, cfg)
    }

    pub fn shot_power(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        let raw = 0.6 * self.attributes.technical.shooting as f64
            + 0.2 * self.attributes.physical.strength as f64
            + 0.2 * self.attributes.mental.composure as f64;
        raw * self.condition(minute, cfg)
    }

    pub fn heading_power(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        let raw = 0.6 * self.attributes.technical.heading as f64
            + 0.25 * self.attributes.physical.strength as f64
            + 0.15 * self.attributes.mental.positioning as f64;
        raw * self.condition(minute, cfg)
    }

    /// Shot-stopping from reflexes, handling and positioning.
    pub fn keeping(&self, minute: u8, cfg: &EngineConfig) -> f64 {
        let raw = 0.4 * self.attributes.technical.reflexes as f64
            + 0.35 * self.attributes.technical.handling as f64
            + 0.25 * self.attributes.mental.positioning as f64;
        raw * self.condition(minute, cfg)
    }

    pub fn snapshot(&self, on_pitch: bool, yellow_cards: u8) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            energy: self.energy as f32,
            distance_km: self.distance_km as f32,
            yellow_cards,
            sent_off: self.sent_off,
            injured: self.injured,
            on_pitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: u8) -> PlayerState {
        let player = Player::new(1, "Test", Position::MID).with_attributes(PlayerAttributes::uniform(value));
        PlayerState::from_player(&player, 0.0)
    }

    #[test]
    fn test_overall_scales_with_energy_and_form() {
        let cfg = EngineConfig::default();
        let mut p = uniform(70);
        assert!((p.overall(1, &cfg) - 70.0).abs() < 1e-4);

        p.energy = 0.5;
        assert!((p.overall(1, &cfg) - 35.0).abs() < 1e-4);

        p.form = 1.2;
        assert!((p.overall(1, &cfg) - 42.0).abs() < 1e-4);
    }

    #[test]
    fn test_condition_thresholds() {
        let cfg = EngineConfig::default();
        let mut p = uniform(60);
        assert_eq!(p.condition(1, &cfg), 1.0);
        p.energy = 0.65;
        assert!((p.condition(1, &cfg) - 0.95).abs() < 1e-9);
        p.energy = 0.45;
        assert!((p.condition(1, &cfg) - 0.88).abs() < 1e-9);
        p.energy = 0.2;
        assert!((p.condition(1, &cfg) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_injury_and_buff_factors() {
        let cfg = EngineConfig::default();
        let mut p = uniform(60);
        p.injured = true;
        assert!((p.condition(1, &cfg) - 0.85).abs() < 1e-9);

        p.injured = false;
        p.buff = Some(RatingBuff { multiplier: 1.1, until_minute: 65 });
        assert!((p.condition(65, &cfg) - 1.1).abs() < 1e-9);
        assert_eq!(p.condition(66, &cfg), 1.0);
    }

    #[test]
    fn test_out_of_range_input_is_sanitized() {
        let mut player = Player::new(3, "Odd", Position::DEF);
        player.energy = 1.7;
        player.form = f32::NAN;
        let p = PlayerState::from_player(&player, 0.01);
        assert_eq!(p.energy, 1.0);
        assert_eq!(p.form, 1.0);
    }
}
