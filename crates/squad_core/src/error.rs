use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SquadError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid tier thresholds: low ({low}) must be lower than high ({high})")]
    InvertedThresholds { low: f64, high: f64 },

    #[error("Invalid team count: {0}")]
    InvalidTeamCount(usize),

    #[error("Invalid players per team: {0} (must be positive)")]
    InvalidPlayersPerTeam(usize),

    #[error("Invalid retry limit: {0} (need at least 1)")]
    InvalidRetryLimit(usize),

    // Structural infeasibility
    #[error("Invalid position for {player}: '{position}' (expected GK, DF, MF or ST)")]
    InvalidPosition { player: String, position: String },

    #[error("Not enough goalkeepers: need {required}, found {found}")]
    NotEnoughGoalkeepers { required: usize, found: usize },

    #[error("Duplicate player name: {0}")]
    DuplicatePlayer(String),

    #[error("Invalid tier for {player}: {tier}")]
    InvalidTier { player: String, tier: f64 },

    #[error("Invalid player name: {0}")]
    InvalidName(String),

    #[error("Roster too small: need at least {required} players, found {found}")]
    RosterTooSmall { required: usize, found: usize },

    // Rating calculator
    #[error("Invalid rating input: {0}")]
    InvalidRatingInput(String),

    // JSON API
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SquadError {
    /// Errors that come from the roster itself. Retrying the same call
    /// cannot succeed; the roster or the constraints must change.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SquadError::InvalidPosition { .. }
                | SquadError::NotEnoughGoalkeepers { .. }
                | SquadError::DuplicatePlayer(_)
                | SquadError::InvalidTier { .. }
                | SquadError::InvalidName(_)
                | SquadError::RosterTooSmall { .. }
        )
    }

    /// Errors raised while validating settings, before any allocation runs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SquadError::InvalidConfig(_)
                | SquadError::InvertedThresholds { .. }
                | SquadError::InvalidTeamCount(_)
                | SquadError::InvalidPlayersPerTeam(_)
                | SquadError::InvalidRetryLimit(_)
        )
    }
}

impl From<serde_json::Error> for SquadError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SquadError::Deserialization(err.to_string())
        } else {
            SquadError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for SquadError {
    fn from(err: serde_yaml::Error) -> Self {
        SquadError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SquadError>;
