//! Allocation configuration
//!
//! Every allocation call receives an explicit [`AllocationConfig`]; nothing
//! is read from process-wide state while a call is running.
//!
//! ## Usage
//!
//! ```rust
//! use squad_core::config::AllocationConfig;
//!
//! // Defaults (2 teams of 7, 3 attempts)
//! let config = AllocationConfig::default();
//!
//! // Tighter fairness tolerances
//! let strict = AllocationConfig::strict();
//!
//! // From environment variable
//! let from_env = AllocationConfig::from_env_or_default();
//! # assert!(config.validate().is_ok() && strict.validate().is_ok());
//! # assert!(from_env.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `SQUAD_FAIRNESS_PROFILE`: Select preset (strict, relaxed, default)

use crate::error::{Result, SquadError};
use crate::models::{Line, Strength};
use crate::player::classify_strength;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;

pub const PROFILE_ENV: &str = "SQUAD_FAIRNESS_PROFILE";

/// Tier boundaries for the weak / strong bands. `low < high` always holds
/// for values built through [`StrengthThresholds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrengthThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self { low: 2.8, high: 3.5 }
    }
}

impl StrengthThresholds {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low >= self.high {
            return Err(SquadError::InvertedThresholds { low: self.low, high: self.high });
        }
        Ok(())
    }

    pub fn classify(&self, tier: f64) -> Strength {
        classify_strength(tier, self.low, self.high)
    }
}

/// Per-line tolerance values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineTolerances {
    #[serde(rename = "DF")]
    pub df: f64,
    #[serde(rename = "MF")]
    pub mf: f64,
    #[serde(rename = "ST")]
    pub st: f64,
}

impl LineTolerances {
    pub const fn uniform(value: f64) -> Self {
        Self { df: value, mf: value, st: value }
    }

    pub fn get(&self, line: Line) -> f64 {
        match line {
            Line::DF => self.df,
            Line::MF => self.mf,
            Line::ST => self.st,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        for line in Line::ALL {
            let value = self.get(line);
            if !value.is_finite() || value < 0.0 {
                return Err(SquadError::InvalidConfig(format!(
                    "{} tolerance for {} must be a non-negative number, got {}",
                    name, line, value
                )));
            }
        }
        Ok(())
    }
}

/// Settings for one allocation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AllocationConfig {
    /// Number of teams to split into
    pub team_count: usize,
    /// Roster size check for callers; the balancer does not enforce it
    pub players_per_team: usize,
    /// Whether each team must field a goalkeeper
    pub require_gk_per_team: bool,
    /// Strength band boundaries
    pub thresholds: StrengthThresholds,
    /// Allowed median difference per line (two-team runs)
    pub median_tolerance: LineTolerances,
    /// Allowed interquartile spread difference per line (two-team runs)
    pub iqr_tolerance: LineTolerances,
    /// Balancing attempts before falling back
    pub max_retries: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            team_count: 2,
            players_per_team: 7,
            require_gk_per_team: true,
            thresholds: StrengthThresholds::default(),
            median_tolerance: LineTolerances::uniform(0.2),
            iqr_tolerance: LineTolerances { df: 0.25, mf: 0.25, st: 0.30 },
            max_retries: 3,
        }
    }
}

impl AllocationConfig {
    /// Tight tolerances, more attempts
    pub fn strict() -> Self {
        Self {
            median_tolerance: LineTolerances::uniform(0.1),
            iqr_tolerance: LineTolerances::uniform(0.15),
            max_retries: 10,
            ..Self::default()
        }
    }

    /// Loose tolerances for small or uneven rosters
    pub fn relaxed() -> Self {
        Self {
            median_tolerance: LineTolerances::uniform(0.4),
            iqr_tolerance: LineTolerances::uniform(0.5),
            max_retries: 3,
            ..Self::default()
        }
    }

    /// Create from `SQUAD_FAIRNESS_PROFILE` or default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var(PROFILE_ENV).unwrap_or_default())
    }

    pub fn from_profile(profile: &str) -> Self {
        match profile.trim().to_lowercase().as_str() {
            "strict" => Self::strict(),
            "relaxed" => Self::relaxed(),
            _ => Self::default(),
        }
    }

    /// Parse a YAML document; missing fields keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.team_count = team_count;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the strength thresholds, rejecting an inverted pair.
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Result<Self> {
        self.thresholds = StrengthThresholds::new(low, high)?;
        Ok(self)
    }

    /// Fail fast on settings that would produce a misleading result.
    pub fn validate(&self) -> Result<()> {
        if self.team_count < 2 {
            return Err(SquadError::InvalidTeamCount(self.team_count));
        }
        if self.players_per_team == 0 {
            return Err(SquadError::InvalidPlayersPerTeam(self.players_per_team));
        }
        if self.max_retries == 0 {
            return Err(SquadError::InvalidRetryLimit(self.max_retries));
        }
        self.thresholds.validate()?;
        self.median_tolerance.validate("median")?;
        self.iqr_tolerance.validate("IQR")?;
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AllocationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.team_count, 2);
        assert_eq!(cfg.players_per_team, 7);
        assert_eq!(cfg.max_retries, 3);
        assert!((cfg.thresholds.low - 2.8).abs() < 1e-9);
        assert!((cfg.median_tolerance.get(Line::MF) - 0.2).abs() < 1e-9);
        assert!((cfg.iqr_tolerance.get(Line::ST) - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_presets() {
        let default = AllocationConfig::default();
        let strict = AllocationConfig::strict();
        let relaxed = AllocationConfig::relaxed();

        assert!(strict.median_tolerance.df < default.median_tolerance.df);
        assert!(strict.max_retries > default.max_retries);
        assert!(relaxed.iqr_tolerance.mf > default.iqr_tolerance.mf);
        assert!(strict.validate().is_ok());
        assert!(relaxed.validate().is_ok());
    }

    #[test]
    fn test_from_profile() {
        assert_eq!(AllocationConfig::from_profile("STRICT"), AllocationConfig::strict());
        assert_eq!(AllocationConfig::from_profile("relaxed"), AllocationConfig::relaxed());
        assert_eq!(AllocationConfig::from_profile("whatever"), AllocationConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = AllocationConfig::default().with_team_count(1);
        assert_eq!(cfg.validate(), Err(SquadError::InvalidTeamCount(1)));

        let cfg = AllocationConfig::default().with_max_retries(0);
        assert_eq!(cfg.validate(), Err(SquadError::InvalidRetryLimit(0)));

        let cfg = AllocationConfig { players_per_team: 0, ..AllocationConfig::default() };
        assert_eq!(cfg.validate(), Err(SquadError::InvalidPlayersPerTeam(0)));

        let cfg = AllocationConfig {
            median_tolerance: LineTolerances { df: -0.1, mf: 0.2, st: 0.2 },
            ..AllocationConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SquadError::InvalidConfig(_))));
    }

    #[test]
    fn test_thresholds_must_not_invert() {
        assert!(AllocationConfig::default().with_thresholds(2.5, 3.8).is_ok());
        assert_eq!(
            AllocationConfig::default().with_thresholds(3.5, 3.5).unwrap_err(),
            SquadError::InvertedThresholds { low: 3.5, high: 3.5 }
        );
        assert!(StrengthThresholds::new(4.0, 3.0).is_err());
        assert!(StrengthThresholds::new(f64::NAN, 3.0).is_err());
    }

    #[test]
    fn test_thresholds_classify() {
        let thresholds = StrengthThresholds::default();
        assert_eq!(thresholds.classify(2.0), Strength::Weak);
        assert_eq!(thresholds.classify(3.0), Strength::Balanced);
        assert_eq!(thresholds.classify(3.9), Strength::Strong);
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = "team_count: 3\n\
                    max_retries: 5\n\
                    thresholds:\n  low: 2.5\n  high: 3.9\n\
                    median_tolerance:\n  DF: 0.3\n  MF: 0.3\n  ST: 0.1\n";
        let cfg = AllocationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.team_count, 3);
        assert_eq!(cfg.max_retries, 5);
        assert!((cfg.thresholds.high - 3.9).abs() < 1e-9);
        assert!((cfg.median_tolerance.get(Line::ST) - 0.1).abs() < 1e-9);
        // untouched fields keep defaults
        assert_eq!(cfg.players_per_team, 7);
        assert_eq!(cfg.iqr_tolerance, AllocationConfig::default().iqr_tolerance);
    }

    #[test]
    fn test_from_yaml_rejects_inverted() {
        let yaml = "thresholds:\n  low: 4.0\n  high: 3.0\n";
        assert!(matches!(
            AllocationConfig::from_yaml_str(yaml),
            Err(SquadError::InvertedThresholds { .. })
        ));
        assert!(matches!(
            AllocationConfig::from_yaml_str("team_count: [1"),
            Err(SquadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = AllocationConfig::strict();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"DF\""));
        let parsed: AllocationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
