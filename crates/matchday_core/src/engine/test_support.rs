//! Shared fixtures for unit tests.

use rand::RngCore;

use crate::models::{Player, PlayerAttributes, Position, Team};

/// Replays a fixed list of `gen::<f64>()` draws, then repeats the last one.
pub struct ScriptedRng {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        Self { draws: draws.to_vec(), next: 0 }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    // `gen::<f64>()` keeps the top 53 bits: value = (u64 >> 11) * 2^-53
    fn next_u64(&mut self) -> u64 {
        let draw = self.draws.get(self.next).or(self.draws.last()).copied().unwrap_or(0.0);
        self.next += 1;
        ((draw.clamp(0.0, 1.0 - f64::EPSILON) * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// 4-4-2 squad of `size` players, ids from `first_id`. Every attribute is
/// `rating` except aggression and decisions, which stay neutral.
pub fn balanced_team(name: &str, first_id: u32, size: usize, rating: u8) -> Team {
    let players = (0..size)
        .map(|i| {
            let position = match i {
                0 => Position::GK,
                1..=4 => Position::DEF,
                5..=8 => Position::MID,
                9 | 10 => Position::FWD,
                _ => [Position::DEF, Position::MID, Position::FWD][(i - 11) % 3],
            };
            let mut attributes = PlayerAttributes::uniform(rating);
            attributes.mental.aggression = 50;
            attributes.mental.decisions = 50;
            Player::new(first_id + i as u32, format!("{name} {}", i + 1), position).with_attributes(attributes)
        })
        .collect();
    Team::new(name, players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_scripted_draws_replay_exactly() {
        let mut rng = ScriptedRng::new(&[0.25, 0.5, 0.999]);
        assert_eq!(rng.gen::<f64>(), 0.25);
        assert_eq!(rng.gen::<f64>(), 0.5);
        assert!((rng.gen::<f64>() - 0.999).abs() < 1e-12);
        assert!((rng.gen::<f64>() - 0.999).abs() < 1e-12);
    }
}
