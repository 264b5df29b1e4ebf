//! Bounded retry loop around the balancer and the fairness evaluator
//!
//! Attempt 1..=max_retries: balance, evaluate, record. The first accepted
//! attempt wins; otherwise the attempt with the smallest violation score
//! (earliest on ties) is returned as a fallback. Balancer errors are
//! structural and end the loop immediately.

use super::balancer::TeamBalancer;
use super::fairness::{FairnessEvaluator, FairnessReport};
use crate::config::AllocationConfig;
use crate::error::{Result, SquadError};
use crate::models::{PlayerRecord, Team};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How the returned attempt was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Passed every fairness tolerance
    Accepted,
    /// Least-violating attempt after the retry limit
    Fallback,
}

/// One balancing trial and its evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based
    pub attempt_index: usize,
    pub teams: Vec<Team>,
    pub fairness: FairnessReport,
}

impl Attempt {
    pub fn team_scores(&self) -> Vec<f64> {
        self.teams.iter().map(Team::score).collect()
    }

    /// Highest team score minus lowest team score
    pub fn score_spread(&self) -> f64 {
        let scores = self.team_scores();
        if scores.is_empty() {
            return 0.0;
        }
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    }
}

/// Outcome of one allocation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub chosen: Attempt,
    pub selection: Selection,
    pub retries_used: usize,
    /// Every evaluated attempt, in order
    pub attempts: Vec<Attempt>,
}

impl AllocationResult {
    pub fn teams(&self) -> &[Team] {
        &self.chosen.teams
    }

    pub fn is_accepted(&self) -> bool {
        self.selection == Selection::Accepted
    }
}

/// Runs the balancer / evaluator loop for one configuration.
#[derive(Debug, Clone)]
pub struct RetryOrchestrator {
    balancer: TeamBalancer,
    evaluator: FairnessEvaluator,
}

impl RetryOrchestrator {
    pub fn new(balancer: TeamBalancer, evaluator: FairnessEvaluator) -> Self {
        Self { balancer, evaluator }
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::new(TeamBalancer::from_config(config), FairnessEvaluator::from_config(config))
    }

    /// Run up to `max_retries` attempts and pick the result.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        players: &[PlayerRecord],
        team_count: usize,
        max_retries: usize,
        rng: &mut R,
    ) -> Result<AllocationResult> {
        if max_retries == 0 {
            return Err(SquadError::InvalidRetryLimit(max_retries));
        }
        if team_count != 2 {
            warn!(team_count, "per-line fairness is only checked for two teams");
        }

        let mut attempts: Vec<Attempt> = Vec::new();

        for attempt_index in 1..=max_retries {
            let teams = self.balancer.balance(players, team_count, rng)?;
            let fairness = self.evaluator.evaluate(&teams);

            debug!(
                attempt = attempt_index,
                accepted = fairness.accepted,
                violation = fairness.violation_score,
                "allocation attempt evaluated"
            );

            let accepted = fairness.accepted;
            attempts.push(Attempt { attempt_index, teams, fairness });

            if accepted {
                info!(attempt = attempt_index, "fair allocation found");
                let chosen = attempts[attempts.len() - 1].clone();
                return Ok(AllocationResult {
                    chosen,
                    selection: Selection::Accepted,
                    retries_used: attempt_index - 1,
                    attempts,
                });
            }
        }

        let best = least_violating(&attempts);
        let chosen = attempts[best].clone();
        warn!(
            attempt = chosen.attempt_index,
            violation = chosen.fairness.violation_score,
            max_retries,
            "no attempt met the fairness tolerances, using least-violating attempt"
        );

        Ok(AllocationResult {
            chosen,
            selection: Selection::Fallback,
            retries_used: max_retries,
            attempts,
        })
    }
}

/// Index of the first attempt with the minimum violation score.
fn least_violating(attempts: &[Attempt]) -> usize {
    let mut best = 0;
    for (idx, attempt) in attempts.iter().enumerate().skip(1) {
        if attempt.fairness.violation_score < attempts[best].fairness.violation_score {
            best = idx;
        }
    }
    best
}
