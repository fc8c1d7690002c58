use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::{simulate_teams, MatchPlan};
use crate::engine::referee::RefereeSelector;
use crate::error::Result;
use crate::models::{MatchReport, Team};

fn default_referee() -> String {
    "neutral".to_string()
}

fn layered_config<'de, D>(deserializer: D) -> std::result::Result<Option<EngineConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer)?
        .map(EngineConfig::from_overrides)
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Drawn from OS entropy when absent; the report records the value used
    #[serde(default)]
    pub seed: Option<u64>,
    /// "random" | "lenient" | "neutral" | "strict"; unknown keys are neutral
    #[serde(default = "default_referee")]
    pub referee: String,
    /// Home first, then away
    pub teams: Vec<Team>,
    /// Overlaid onto the defaults, so single table entries can be overridden
    #[serde(default, deserialize_with = "layered_config")]
    pub config: Option<EngineConfig>,
}

impl MatchRequest {
    pub fn new(home: Team, away: Team) -> Self {
        Self { seed: None, referee: default_referee(), teams: vec![home, away], config: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn into_plan(self) -> (Vec<Team>, MatchPlan) {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let plan = MatchPlan {
            seed,
            referee: RefereeSelector::from_key(&self.referee),
            config: self.config.unwrap_or_default(),
        };
        (self.teams, plan)
    }
}

/// Runs a request and returns the structured report.
pub fn simulate_request(request: MatchRequest) -> Result<MatchReport> {
    let (teams, plan) = request.into_plan();
    debug!(seed = plan.seed, teams = teams.len(), "json request");
    simulate_teams(&teams, plan)
}

/// JSON in, JSON out. Malformed input and a team count other than two are
/// errors; everything else produces a report.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let report = simulate_request(request)?;
    Ok(serde_json::to_string(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use crate::models::{Player, Position};
    use serde_json::{json, Value};

    fn team_json(name: &str, first_id: u32) -> Value {
        let positions = ["GK", "CB", "CB", "LB", "RB", "CM", "CM", "LM", "RM", "ST", "ST"];
        let players: Vec<Value> = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| json!({ "id": first_id + i as u32, "name": format!("{name} {i}"), "position": pos }))
            .collect();
        json!({ "name": name, "style": "attacking", "players": players })
    }

    #[test]
    fn test_round_trip_with_seed() {
        let request = json!({
            "seed": 42,
            "referee": "strict",
            "teams": [team_json("Reds", 1), team_json("Blues", 100)],
        });
        let out = simulate_match_json(&request.to_string()).unwrap();
        let report: MatchReport = serde_json::from_str(&out).unwrap();
        assert_eq!(report.seed, 42);
        assert_eq!(report.referee.as_str(), "strict");
        assert_eq!(report.teams.home, "Reds");
        report.check_invariants().unwrap();

        // Same request, same bytes
        assert_eq!(out, simulate_match_json(&request.to_string()).unwrap());
    }

    #[test]
    fn test_missing_seed_is_recorded() {
        let request = MatchRequest::new(
            Team::new("A", vec![Player::new(1, "Solo", Position::FWD)]),
            Team::new("B", vec![Player::new(2, "Keeper", Position::GK)]),
        );
        let report = simulate_request(request.clone()).unwrap();
        let replay = simulate_request(request.with_seed(report.seed)).unwrap();
        assert_eq!(report, replay);
    }

    #[test]
    fn test_wrong_team_count() {
        let request = json!({ "teams": [team_json("Only", 1)] });
        let err = simulate_match_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, MatchError::InvalidTeamCount { found: 1 }));
    }

    #[test]
    fn test_malformed_json() {
        let err = simulate_match_json("{ not json").unwrap_err();
        assert!(matches!(err, MatchError::Deserialization(_)));
    }

    #[test]
    fn test_partial_config_and_bad_duration() {
        let request = json!({
            "seed": 1,
            "teams": [team_json("Reds", 1), team_json("Blues", 100)],
            "config": { "rules": { "half_length": 0 } },
        });
        let err = simulate_match_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, MatchError::InvalidDuration { half_length: 0, .. }));

        let request = json!({
            "seed": 1,
            "teams": [team_json("Reds", 1), team_json("Blues", 100)],
            "config": { "rules": { "half_length": 10 } },
        });
        let report: MatchReport = serde_json::from_str(&simulate_match_json(&request.to_string()).unwrap()).unwrap();
        assert_eq!(report.final_minute, 20 + report.stoppage_minutes);
    }

    #[test]
    fn test_partial_table_in_request_config() {
        let request = json!({
            "seed": 3,
            "teams": [team_json("Reds", 1), team_json("Blues", 100)],
            "config": { "fatigue": { "position": { "gk": 0.4 } } },
        });
        let parsed: MatchRequest = serde_json::from_value(request.clone()).unwrap();
        let config = parsed.config.unwrap();
        assert_eq!(config.fatigue.position.gk, 0.4);
        assert_eq!(config.fatigue.position.mid, EngineConfig::default().fatigue.position.mid);

        assert!(simulate_match_json(&request.to_string()).is_ok());
    }
}
