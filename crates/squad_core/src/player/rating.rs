//! Tier rating calculator
//!
//! Combines a skill rating and a stamina rating into one tier score.
//!
//! tier = MIN_POINT + (w * skill + (1 - w) * stamina) * POINT_RANGE

use crate::error::{Result, SquadError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_POINT: f64 = 1.0;
pub const POINT_RANGE: f64 = 4.0;
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.5;

/// Skill rating in "stars": 1 sao ... 10 sao, then siêu sao (superstar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const SUPERSTAR: SkillLevel = SkillLevel(11);
    pub const DEFAULT: SkillLevel = SkillLevel(2);

    /// `stars` in 1..=10, or 11 for superstar
    pub fn new(stars: u8) -> Result<Self> {
        if (1..=11).contains(&stars) {
            Ok(SkillLevel(stars))
        } else {
            Err(SquadError::InvalidRatingInput(format!("skill level out of range: {}", stars)))
        }
    }

    /// 0.0 for one star up to 1.0 for superstar
    pub fn score(&self) -> f64 {
        f64::from(self.0 - 1) / 10.0
    }

    pub fn label(&self) -> String {
        if *self == Self::SUPERSTAR {
            "siêu sao".to_string()
        } else {
            format!("{} sao", self.0)
        }
    }

    pub fn all() -> impl Iterator<Item = SkillLevel> {
        (1..=11).map(SkillLevel)
    }
}

impl FromStr for SkillLevel {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_lowercase();
        if text == "siêu sao" || text == "superstar" {
            return Ok(Self::SUPERSTAR);
        }
        let stars = text.trim_end_matches("sao").trim();
        match stars.parse::<u8>() {
            Ok(n) if (1..=10).contains(&n) => Ok(SkillLevel(n)),
            _ => Err(SquadError::InvalidRatingInput(format!("unknown skill level: '{}'", s))),
        }
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = SquadError;

    fn try_from(stars: u8) -> Result<Self> {
        SkillLevel::new(stars)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Stamina in steps of 10, from 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StaminaLevel(u8);

impl StaminaLevel {
    pub const DEFAULT: StaminaLevel = StaminaLevel(10);

    pub fn new(value: u8) -> Result<Self> {
        if value <= 100 && value % 10 == 0 {
            Ok(StaminaLevel(value))
        } else {
            Err(SquadError::InvalidRatingInput(format!(
                "stamina must be 0..=100 in steps of 10, got {}",
                value
            )))
        }
    }

    pub fn score(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl FromStr for StaminaLevel {
    type Err = SquadError;

    /// Accepts "30" as well as the "30.0" that spreadsheet round trips produce.
    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| {
                SquadError::InvalidRatingInput(format!("unknown stamina level: '{}'", s))
            })?;
        if value.fract() != 0.0 || !(0.0..=100.0).contains(&value) {
            return Err(SquadError::InvalidRatingInput(format!("unknown stamina level: '{}'", s)));
        }
        StaminaLevel::new(value as u8)
    }
}

impl TryFrom<u8> for StaminaLevel {
    type Error = SquadError;

    fn try_from(value: u8) -> Result<Self> {
        StaminaLevel::new(value)
    }
}

impl From<StaminaLevel> for u8 {
    fn from(level: StaminaLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for StaminaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Combine skill and stamina into a tier, rounded to one decimal.
pub fn calculate_tier(skill: SkillLevel, stamina: StaminaLevel, skill_weight: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&skill_weight) {
        return Err(SquadError::InvalidRatingInput(format!(
            "skill weight must be within 0.0..=1.0, got {}",
            skill_weight
        )));
    }
    let stamina_weight = 1.0 - skill_weight;
    let normalized = skill_weight * skill.score() + stamina_weight * stamina.score();
    let tier = MIN_POINT + normalized * POINT_RANGE;
    Ok((tier * 10.0).round() / 10.0)
}
