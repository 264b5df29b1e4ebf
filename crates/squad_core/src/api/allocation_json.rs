//! JSON API for team allocation
//!
//! Request in, response out, both as JSON strings, for callers that hold the
//! roster outside Rust (GUI front ends, scripts).

use crate::allocation::{allocate, AllocationResult, FairnessReport, Selection};
use crate::config::AllocationConfig;
use crate::error::{Result, SquadError};
use crate::models::{Player, PlayerRecord};
use crate::SCHEMA_VERSION;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AllocationRequest {
    pub schema_version: u8,
    /// Omit for a fresh random draw
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: Vec<PlayerRecord>,
    /// Omit to use the default settings
    #[serde(default)]
    pub config: Option<AllocationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    /// 1-based
    pub index: usize,
    pub score: f64,
    pub goalkeepers: usize,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub schema_version: u8,
    pub selection: Selection,
    pub retries_used: usize,
    pub attempts_evaluated: usize,
    pub chosen_attempt: usize,
    pub teams: Vec<TeamSummary>,
    pub fairness: FairnessReport,
    pub score_spread: f64,
    pub generated_at: DateTime<Utc>,
}

impl From<&AllocationResult> for AllocationResponse {
    fn from(result: &AllocationResult) -> Self {
        let teams = result
            .teams()
            .iter()
            .enumerate()
            .map(|(idx, team)| TeamSummary {
                index: idx + 1,
                score: team.score(),
                goalkeepers: team.goalkeeper_count(),
                players: team.players.clone(),
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            selection: result.selection,
            retries_used: result.retries_used,
            attempts_evaluated: result.attempts.len(),
            chosen_attempt: result.chosen.attempt_index,
            teams,
            fairness: result.chosen.fairness.clone(),
            score_spread: result.chosen.score_spread(),
            generated_at: Utc::now(),
        }
    }
}

/// Run an allocation from a JSON request and return the JSON response.
pub fn allocate_json(request_json: &str) -> Result<String> {
    let request: AllocationRequest = serde_json::from_str(request_json)?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(SquadError::Deserialization(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }

    let config = request.config.unwrap_or_default();
    info!(
        players = request.players.len(),
        teams = config.team_count,
        "Processing allocation request"
    );

    let result = match request.seed {
        Some(seed) => allocate(&request.players, &config, &mut ChaCha8Rng::seed_from_u64(seed))?,
        None => allocate(&request.players, &config, &mut rand::thread_rng())?,
    };

    let response = AllocationResponse::from(&result);
    serde_json::to_string(&response).map_err(|e| SquadError::Serialization(e.to_string()))
}

/// JSON schema of [`AllocationRequest`]
pub fn allocation_request_schema() -> Result<String> {
    let schema = schemars::schema_for!(AllocationRequest);
    serde_json::to_string_pretty(&schema).map_err(|e| SquadError::Serialization(e.to_string()))
}
