use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical squad position.
///
/// Roster files carry free-form text; it only becomes a `Position` after
/// [`crate::player::normalize_position`] and [`Position::from_label`].
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    DF,
    MF,
    ST,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DF, Position::MF, Position::ST];

    /// Parse an already-normalized label. Anything else is rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "GK" => Some(Position::GK),
            "DF" => Some(Position::DF),
            "MF" => Some(Position::MF),
            "ST" => Some(Position::ST),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::ST => "ST",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    /// Outfield line this position belongs to (`None` for goalkeepers)
    pub fn line(&self) -> Option<Line> {
        match self {
            Position::GK => None,
            Position::DF => Some(Line::DF),
            Position::MF => Some(Line::MF),
            Position::ST => Some(Line::ST),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = crate::player::normalize_position(s);
        Position::from_label(&normalized).ok_or(normalized)
    }
}

/// The three outfield groups compared between teams.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Line {
    DF,
    MF,
    ST,
}

impl Line {
    /// Fixed evaluation and assignment order
    pub const ALL: [Line; 3] = [Line::DF, Line::MF, Line::ST];

    pub fn position(&self) -> Position {
        match self {
            Line::DF => Position::DF,
            Line::MF => Position::MF,
            Line::ST => Position::ST,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.position().label())
    }
}

/// Qualitative band derived from tier and the two configured thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Balanced,
    Strong,
    #[default]
    Unknown,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Balanced => "balanced",
            Strength::Strong => "strong",
            Strength::Unknown => "unknown",
        }
    }

    /// Lenient parse for stored strength columns; unrecognized text is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "weak" => Strength::Weak,
            "balanced" => Strength::Balanced,
            "strong" => Strength::Strong,
            _ => Strength::Unknown,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Player as supplied by the roster store.
///
/// `position` is raw text and may still hold a stored list artifact such as
/// `"['ST', 'MF']"`. `strength` is whatever was previously stored and is
/// never trusted by the balancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PlayerRecord {
    pub name: String,
    pub tier: f64,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, tier: f64, position: impl Into<String>) -> Self {
        Self { name: name.into(), tier, position: position.into(), strength: None }
    }
}

/// Player with a canonical position and a freshly computed strength band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Player {
    pub name: String,
    pub tier: f64,
    pub position: Position,
    pub strength: Strength,
}

impl Player {
    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }
}
