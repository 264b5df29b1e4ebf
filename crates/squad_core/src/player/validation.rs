//! Roster validation
//!
//! Checks that run before an allocation starts. The balancer itself only
//! rejects what it cannot place (bad positions, missing goalkeepers).

use crate::error::{Result, SquadError};
use crate::models::PlayerRecord;
use std::collections::HashSet;

pub const MAX_NAME_LEN: usize = 50;

/// Roster validation utility
pub struct PlayerValidator;

impl PlayerValidator {
    /// Non-empty, at most 50 characters
    pub fn validate_name(name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SquadError::InvalidName("name cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(SquadError::InvalidName(format!(
                "'{}' exceeds {} characters",
                trimmed, MAX_NAME_LEN
            )));
        }
        Ok(())
    }

    pub fn validate_tier(name: &str, tier: f64) -> Result<()> {
        if !tier.is_finite() {
            return Err(SquadError::InvalidTier { player: name.to_string(), tier });
        }
        Ok(())
    }

    /// Unique names and finite tiers across the roster
    pub fn validate_roster(players: &[PlayerRecord]) -> Result<()> {
        let mut seen = HashSet::with_capacity(players.len());
        for player in players {
            Self::validate_name(&player.name)?;
            Self::validate_tier(&player.name, player.tier)?;
            if !seen.insert(player.name.as_str()) {
                return Err(SquadError::DuplicatePlayer(player.name.clone()));
            }
        }
        Ok(())
    }

    /// Caller-side size check: every team must be able to field `players_per_team`.
    pub fn validate_roster_size(
        count: usize,
        team_count: usize,
        players_per_team: usize,
    ) -> Result<()> {
        let required = team_count * players_per_team;
        if count < required {
            return Err(SquadError::RosterTooSmall { required, found: count });
        }
        Ok(())
    }
}
