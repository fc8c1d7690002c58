//! Duel sub-resolver: discrete 1v1 confrontations on scheduled minutes.
//!
//! [`DuelResolver`] is the injection seam; the match engine owns a boxed
//! resolver and [`AttributeDuelResolver`] is the default.

use rand::{Rng, RngCore};

use super::config::EngineConfig;
use super::player_state::PlayerState;
use super::probability::{self, clamped_linear_win, weighted_index};
use super::team_state::TeamState;
use crate::error::ResolverError;
use crate::models::{AttackChannel, DuelAction, ShotOutcome, Style};

/// Everything a resolver may look at. Read-only: resolvers cannot touch
/// match state.
#[derive(Debug, Clone, Copy)]
pub struct DuelContext<'a> {
    pub minute: u8,
    pub attacker: &'a PlayerState,
    pub defender: &'a PlayerState,
    pub goalkeeper: &'a PlayerState,
    pub attacking: &'a TeamState,
    pub defending: &'a TeamState,
    pub config: &'a EngineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelResult {
    pub action: DuelAction,
    pub attacker_won: bool,
    /// Present only for shot duels
    pub shot: Option<ShotOutcome>,
}

pub trait DuelResolver: Send + Sync {
    fn resolve(&self, ctx: &DuelContext<'_>, rng: &mut dyn RngCore) -> Result<DuelResult, ResolverError>;
}

/// Attribute-driven resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeDuelResolver;

const ACTIONS: [DuelAction; 4] = [DuelAction::Dribble, DuelAction::Pass, DuelAction::Shot, DuelAction::Tackle];

impl AttributeDuelResolver {
    fn choose_action(&self, ctx: &DuelContext<'_>, rng: &mut dyn RngCore) -> DuelAction {
        let cfg = &ctx.config.probability.duel;
        let mut weights = [cfg.dribble_weight, cfg.pass_weight, cfg.shot_weight, cfg.tackle_weight];
        match ctx.attacking.style {
            Style::Attacking => weights[2] *= cfg.attacking_shot_bias,
            Style::Defensive => weights[2] *= cfg.defensive_shot_bias,
            Style::Balanced => {}
        }
        match ctx.attacking.attack_channel {
            AttackChannel::Wings => weights[0] *= cfg.wings_dribble_bias,
            AttackChannel::Center => weights[1] *= cfg.center_pass_bias,
        }
        weighted_index(&weights, rng).map(|i| ACTIONS[i]).unwrap_or(DuelAction::Dribble)
    }

    /// Attacker and defender scores for `action`, style-modulated.
    pub fn scores(&self, action: DuelAction, ctx: &DuelContext<'_>) -> (f64, f64) {
        let (a, d) = (&ctx.attacker.attributes, &ctx.defender.attributes);
        let w = |parts: &[(u8, f64)]| parts.iter().map(|&(v, wt)| v as f64 * wt).sum::<f64>();

        let (att, def) = match action {
            DuelAction::Dribble => (
                w(&[(a.technical.dribbling, 0.5), (a.physical.pace, 0.3), (a.physical.agility, 0.2)]),
                w(&[(d.technical.tackling, 0.5), (d.physical.pace, 0.3), (d.mental.anticipation, 0.2)]),
            ),
            DuelAction::Pass => (
                w(&[(a.technical.passing, 0.5), (a.mental.vision, 0.3), (a.technical.first_touch, 0.2)]),
                w(&[(d.technical.marking, 0.5), (d.mental.anticipation, 0.3), (d.mental.positioning, 0.2)]),
            ),
            DuelAction::Shot => (
                w(&[(a.technical.shooting, 0.5), (a.mental.composure, 0.3), (a.technical.first_touch, 0.2)]),
                w(&[(d.technical.marking, 0.5), (d.mental.positioning, 0.3), (d.physical.strength, 0.2)]),
            ),
            DuelAction::Tackle => (
                w(&[(a.physical.strength, 0.4), (a.physical.balance, 0.3), (a.mental.composure, 0.3)]),
                w(&[(d.technical.tackling, 0.5), (d.physical.strength, 0.3), (d.mental.aggression, 0.2)]),
            ),
        };

        let edge = ctx.config.probability.duel.style_edge;
        let att_style = if ctx.attacking.style == Style::Attacking { edge } else { 1.0 };
        let def_style = if ctx.defending.style == Style::Defensive { edge } else { 1.0 };

        (
            att * ctx.attacker.condition(ctx.minute, ctx.config) * att_style,
            def * ctx.defender.condition(ctx.minute, ctx.config) * def_style,
        )
    }

    /// Shot against the goalkeeper, same curves as open play.
    fn resolve_shot(&self, ctx: &DuelContext<'_>, rng: &mut dyn RngCore) -> Result<ShotOutcome, ResolverError> {
        let shot_cfg = &ctx.config.probability.shot;
        let keeping = ctx.goalkeeper.keeping(ctx.minute, ctx.config);

        let on_target = probability::checked(
            "duel_on_target",
            probability::on_target_probability(ctx.attacker.finishing(ctx.minute, ctx.config), keeping, shot_cfg),
        )?;
        if rng.gen::<f64>() >= on_target {
            return Ok(ShotOutcome::Wide);
        }

        let goal = probability::checked(
            "duel_goal",
            probability::goal_probability(ctx.attacker.shot_power(ctx.minute, ctx.config), keeping, shot_cfg),
        )?;
        Ok(if rng.gen::<f64>() < goal { ShotOutcome::Goal } else { ShotOutcome::Saved })
    }
}

impl DuelResolver for AttributeDuelResolver {
    fn resolve(&self, ctx: &DuelContext<'_>, rng: &mut dyn RngCore) -> Result<DuelResult, ResolverError> {
        let cfg = &ctx.config.probability.duel;
        let action = self.choose_action(ctx, rng);
        let (att, def) = self.scores(action, ctx);

        let win = probability::checked(
            "duel_win",
            clamped_linear_win(probability::safe_ratio(att, def), cfg.slope, cfg.min_probability, cfg.max_probability),
        )?;
        let attacker_won = rng.gen::<f64>() < win;

        let shot = match (action, attacker_won) {
            (DuelAction::Shot, true) => Some(self.resolve_shot(ctx, rng)?),
            (DuelAction::Shot, false) => Some(ShotOutcome::Blocked),
            _ => None,
        };

        Ok(DuelResult { action, attacker_won, shot })
    }
}
