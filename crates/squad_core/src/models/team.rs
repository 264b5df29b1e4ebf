use super::player::{Line, Player, Strength};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One team of an allocation run, in assignment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Team {
    pub players: Vec<Player>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Total tier of the team
    pub fn score(&self) -> f64 {
        self.players.iter().map(|p| p.tier).sum()
    }

    pub fn goalkeeper_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_goalkeeper()).count()
    }

    /// Tier samples of the players occupying `line`
    pub fn line_tiers(&self, line: Line) -> Vec<f64> {
        self.players
            .iter()
            .filter(|p| p.position.line() == Some(line))
            .map(|p| p.tier)
            .collect()
    }

    /// (weak, balanced, strong, unknown)
    pub fn strength_counts(&self) -> (usize, usize, usize, usize) {
        self.players.iter().fold((0, 0, 0, 0), |(w, b, s, u), p| match p.strength {
            Strength::Weak => (w + 1, b, s, u),
            Strength::Balanced => (w, b + 1, s, u),
            Strength::Strong => (w, b, s + 1, u),
            Strength::Unknown => (w, b, s, u + 1),
        })
    }
}
