// Batch match statistics
// Run with: cargo run --bin batch_stats --release -- --matches 500
//
// Plays N consecutive seeds in parallel and prints per-match averages.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::info;

use matchday_core::models::{Player, PlayerAttributes, Position, Team};
use matchday_core::{simulate_with, EngineConfig, MatchPlan, MatchReport, RefereeSelector};

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch distribution runner for the match engine", long_about = None)]
struct Cli {
    /// Number of matches to play.
    #[arg(long, default_value_t = 200)]
    matches: u64,
    /// First seed; matches use consecutive seeds from here.
    #[arg(long, default_value_t = 0)]
    seed_start: u64,
    /// JSON file holding an array of exactly two teams. Two balanced
    /// 70-rated sides are used when omitted.
    #[arg(long)]
    teams: Option<PathBuf>,
    /// random | lenient | neutral | strict
    #[arg(long, default_value = "neutral")]
    referee: String,
    /// YAML engine config; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Default, Clone, Copy)]
struct Totals {
    goals: u64,
    yellows: u64,
    reds: u64,
    shots: u64,
    on_target: u64,
    corners: u64,
    degraded: u64,
}

impl Totals {
    fn from_report(report: &MatchReport) -> Self {
        let sum = |f: fn(&matchday_core::models::TeamStatBlock) -> u64| f(&report.stats.home) + f(&report.stats.away);
        Self {
            goals: report.total_goals() as u64,
            yellows: sum(|s| s.yellows as u64),
            reds: sum(|s| s.reds as u64),
            shots: sum(|s| s.shots as u64),
            on_target: sum(|s| s.shots_on_target as u64),
            corners: sum(|s| s.corners as u64),
            degraded: report.degraded_minutes.len() as u64,
        }
    }

    fn add(self, other: Self) -> Self {
        Self {
            goals: self.goals + other.goals,
            yellows: self.yellows + other.yellows,
            reds: self.reds + other.reds,
            shots: self.shots + other.shots,
            on_target: self.on_target + other.on_target,
            corners: self.corners + other.corners,
            degraded: self.degraded + other.degraded,
        }
    }
}

fn default_team(name: &str, first_id: u32) -> Team {
    let positions = [
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
        Position::DEF,
        Position::MID,
        Position::FWD,
    ];
    let players = positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            Player::new(first_id + i as u32, format!("{name} {}", i + 1), pos)
                .with_attributes(PlayerAttributes::uniform(70))
        })
        .collect();
    Team::new(name, players)
}

fn load_teams(path: Option<&PathBuf>) -> Result<(Team, Team)> {
    let Some(path) = path else {
        return Ok((default_team("Home", 1), default_team("Away", 101)));
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut teams: Vec<Team> = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    if teams.len() != 2 {
        bail!("{} holds {} teams, expected 2", path.display(), teams.len());
    }
    let away = teams.remove(1);
    let home = teams.remove(0);
    Ok((home, away))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    let cli = Cli::parse();
    let (home, away) = load_teams(cli.teams.as_ref())?;
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    let referee = RefereeSelector::from_key(&cli.referee);

    info!(matches = cli.matches, seed_start = cli.seed_start, ?referee, "running batch");

    let totals = (cli.seed_start..cli.seed_start + cli.matches)
        .into_par_iter()
        .map(|seed| {
            let plan = MatchPlan { seed, referee, config: config.clone() };
            simulate_with(&home, &away, plan).map(|report| Totals::from_report(&report))
        })
        .try_reduce(Totals::default, |a, b| Ok(a.add(b)))?;

    let n = cli.matches.max(1) as f64;
    println!("{} vs {} over {} matches", home.name, away.name, cli.matches);
    println!("  goals/match     {:.2}", totals.goals as f64 / n);
    println!("  yellows/match   {:.2}", totals.yellows as f64 / n);
    println!("  reds/match      {:.2}", totals.reds as f64 / n);
    println!("  shots/match     {:.2}", totals.shots as f64 / n);
    println!("  on target/match {:.2}", totals.on_target as f64 / n);
    println!("  corners/match   {:.2}", totals.corners as f64 / n);
    if totals.degraded > 0 {
        println!("  degraded minutes {}", totals.degraded);
    }
    Ok(())
}
