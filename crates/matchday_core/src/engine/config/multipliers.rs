//! Small lookup tables keyed by the tactical and positional enums.

use serde::{Deserialize, Serialize};

use crate::models::{Position, Pressing, Style, WorkRate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ByStyle {
    pub attacking: f64,
    pub balanced: f64,
    pub defensive: f64,
}

impl ByStyle {
    pub const fn new(attacking: f64, balanced: f64, defensive: f64) -> Self {
        Self { attacking, balanced, defensive }
    }

    #[inline]
    pub fn get(&self, style: Style) -> f64 {
        match style {
            Style::Attacking => self.attacking,
            Style::Balanced => self.balanced,
            Style::Defensive => self.defensive,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ByPressing {
    pub low: f64,
    pub normal: f64,
    pub high: f64,
}

impl ByPressing {
    pub const fn new(low: f64, normal: f64, high: f64) -> Self {
        Self { low, normal, high }
    }

    #[inline]
    pub fn get(&self, pressing: Pressing) -> f64 {
        match pressing {
            Pressing::Low => self.low,
            Pressing::Normal => self.normal,
            Pressing::High => self.high,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ByPosition {
    pub gk: f64,
    pub def: f64,
    pub mid: f64,
    pub fwd: f64,
}

impl ByPosition {
    pub const fn new(gk: f64, def: f64, mid: f64, fwd: f64) -> Self {
        Self { gk, def, mid, fwd }
    }

    #[inline]
    pub fn get(&self, position: Position) -> f64 {
        match position {
            Position::GK => self.gk,
            Position::DEF => self.def,
            Position::MID => self.mid,
            Position::FWD => self.fwd,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ByWorkRate {
    pub low: f64,
    pub med: f64,
    pub high: f64,
}

impl ByWorkRate {
    pub const fn new(low: f64, med: f64, high: f64) -> Self {
        Self { low, med, high }
    }

    #[inline]
    pub fn get(&self, work_rate: WorkRate) -> f64 {
        match work_rate {
            WorkRate::Low => self.low,
            WorkRate::Med => self.med,
            WorkRate::High => self.high,
        }
    }
}
