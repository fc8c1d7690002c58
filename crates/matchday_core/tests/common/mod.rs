//! Squad builders shared by the integration tests.
#![allow(dead_code)]

use matchday_core::models::{PlayerAttributes, WorkRate};
use matchday_core::{Player, Position, Pressing, Style, Team};

const SHAPE: [Position; 11] = [
    Position::GK,
    Position::DEF,
    Position::DEF,
    Position::DEF,
    Position::DEF,
    Position::MID,
    Position::MID,
    Position::MID,
    Position::MID,
    Position::FWD,
    Position::FWD,
];

/// 4-4-2 with `size - 11` bench players cycling DEF, MID, FWD.
pub fn squad(name: &str, first_id: u32, size: usize, rating: u8) -> Team {
    let players = (0..size)
        .map(|i| {
            let position = match SHAPE.get(i) {
                Some(&position) => position,
                None => [Position::DEF, Position::MID, Position::FWD][(i - 11) % 3],
            };
            let mut attributes = PlayerAttributes::uniform(rating);
            attributes.mental.aggression = 50;
            attributes.mental.decisions = 50;
            let work_rate = if i % 4 == 0 { WorkRate::High } else { WorkRate::Med };
            Player::new(first_id + i as u32, format!("{name} {}", i + 1), position)
                .with_attributes(attributes)
                .with_work_rate(work_rate)
        })
        .collect();
    Team::new(name, players)
}

pub fn starters_only(name: &str, first_id: u32) -> Team {
    squad(name, first_id, 11, 70)
}

pub fn with_bench(name: &str, first_id: u32) -> Team {
    squad(name, first_id, 14, 70)
}

pub fn pressing_side(name: &str, first_id: u32) -> Team {
    with_bench(name, first_id).with_tactics(Style::Attacking, Pressing::High)
}
