//! Per-line fairness check between two teams
//!
//! For each outfield line the two teams' tier samples are summarized by
//! median and interquartile spread; the absolute differences are compared
//! against the configured tolerances.

use crate::config::{AllocationConfig, LineTolerances};
use crate::models::{Line, Team};
use crate::stats::{interquartile_spread, median};
use serde::{Deserialize, Serialize};

/// Absorbs floating-point noise when comparing a delta to its tolerance.
pub const FAIRNESS_EPSILON: f64 = 1e-9;

/// Amount by which `delta` exceeds `tolerance`, or 0.0 when within it.
fn excess(delta: f64, tolerance: f64) -> f64 {
    if delta > tolerance + FAIRNESS_EPSILON {
        delta - tolerance
    } else {
        0.0
    }
}

/// Statistics for one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFairness {
    pub line: Line,
    pub median_team1: f64,
    pub median_team2: f64,
    pub median_delta: f64,
    pub median_tolerance: f64,
    pub iqr_team1: f64,
    pub iqr_team2: f64,
    pub iqr_delta: f64,
    pub iqr_tolerance: f64,
}

impl LineFairness {
    pub fn median_within_tolerance(&self) -> bool {
        excess(self.median_delta, self.median_tolerance) == 0.0
    }

    pub fn iqr_within_tolerance(&self) -> bool {
        excess(self.iqr_delta, self.iqr_tolerance) == 0.0
    }

    pub fn is_compliant(&self) -> bool {
        self.median_within_tolerance() && self.iqr_within_tolerance()
    }

    /// Sum of the median and IQR excesses for this line
    pub fn violation(&self) -> f64 {
        excess(self.median_delta, self.median_tolerance)
            + excess(self.iqr_delta, self.iqr_tolerance)
    }
}

/// Result of a fairness evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    /// One entry per line (DF, MF, ST); empty when not evaluated
    pub lines: Vec<LineFairness>,
    /// Sum of tolerance excesses; 0.0 when fully compliant
    pub violation_score: f64,
    pub accepted: bool,
    /// False when the team count was not two and no statistics were compared
    pub evaluated: bool,
}

impl FairnessReport {
    /// Trivially accepted report for allocations that are not line-checked
    pub fn unchecked() -> Self {
        Self { lines: Vec::new(), violation_score: 0.0, accepted: true, evaluated: false }
    }

    pub fn line(&self, line: Line) -> Option<&LineFairness> {
        self.lines.iter().find(|l| l.line == line)
    }
}

/// Compares two teams line by line.
#[derive(Debug, Clone)]
pub struct FairnessEvaluator {
    median_tolerance: LineTolerances,
    iqr_tolerance: LineTolerances,
}

impl FairnessEvaluator {
    pub fn new(median_tolerance: LineTolerances, iqr_tolerance: LineTolerances) -> Self {
        Self { median_tolerance, iqr_tolerance }
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::new(config.median_tolerance, config.iqr_tolerance)
    }

    /// Evaluate a candidate allocation.
    ///
    /// Only two-team allocations are checked; any other count yields
    /// [`FairnessReport::unchecked`].
    pub fn evaluate(&self, teams: &[Team]) -> FairnessReport {
        let [team1, team2] = teams else {
            return FairnessReport::unchecked();
        };

        let lines: Vec<LineFairness> =
            Line::ALL.iter().map(|&line| self.compare_line(line, team1, team2)).collect();

        let violation_score = lines.iter().map(LineFairness::violation).sum();
        let accepted = lines.iter().all(LineFairness::is_compliant);

        FairnessReport { lines, violation_score, accepted, evaluated: true }
    }

    fn compare_line(&self, line: Line, team1: &Team, team2: &Team) -> LineFairness {
        let tiers1 = team1.line_tiers(line);
        let tiers2 = team2.line_tiers(line);

        let median_team1 = median(&tiers1);
        let median_team2 = median(&tiers2);
        let iqr_team1 = interquartile_spread(&tiers1);
        let iqr_team2 = interquartile_spread(&tiers2);

        LineFairness {
            line,
            median_team1,
            median_team2,
            median_delta: (median_team1 - median_team2).abs(),
            median_tolerance: self.median_tolerance.get(line),
            iqr_team1,
            iqr_team2,
            iqr_delta: (iqr_team1 - iqr_team2).abs(),
            iqr_tolerance: self.iqr_tolerance.get(line),
        }
    }
}
