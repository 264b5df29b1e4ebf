//! CSV roster store
//!
//! One row per player: `name,tier,position,strength,skill,stamina`.
//! `skill` and `stamina` are only filled for players rated through
//! [`rate_player`]. Position cells are kept as stored text; the core
//! normalizes them at allocation time.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use squad_core::config::StrengthThresholds;
use squad_core::models::{PlayerRecord, Position, Strength};
use squad_core::player::{
    calculate_tier, normalize_position, PlayerValidator, SkillLevel, StaminaLevel,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One stored roster row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,
    /// NaN when the stored cell could not be parsed
    #[serde(deserialize_with = "lenient_tier")]
    pub tier: f64,
    pub position: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub stamina: Option<String>,
}

impl RosterRow {
    pub fn new(name: impl Into<String>, tier: f64, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier,
            position: position.into(),
            strength: Strength::Unknown.label().to_string(),
            skill: None,
            stamina: None,
        }
    }

    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            name: self.name.clone(),
            tier: self.tier,
            position: self.position.clone(),
            strength: Some(Strength::from_label(&self.strength)),
        }
    }
}

fn lenient_tier<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse::<f64>().unwrap_or(f64::NAN))
}

/// Load every row of a roster file.
pub fn read_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open roster file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<RosterRow>().enumerate() {
        let row = record
            .with_context(|| format!("Invalid roster row {} in {}", line + 2, path.display()))?;
        if row.tier.is_nan() {
            warn!(player = %row.name, "tier could not be parsed, strength will be unknown");
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), path = %path.display(), "roster loaded");
    Ok(rows)
}

/// Write the roster, recomputing every strength cell from `thresholds`.
pub fn write_roster(
    path: &Path,
    rows: &mut [RosterRow],
    thresholds: &StrengthThresholds,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create roster directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create roster file: {}", path.display()))?;

    for row in rows.iter_mut() {
        row.strength = thresholds.classify(row.tier).label().to_string();
        writer
            .serialize(&*row)
            .with_context(|| format!("Failed to write row for {}", row.name))?;
    }
    writer.flush().context("Failed to flush roster file")?;
    Ok(())
}

fn load_or_empty(path: &Path) -> Result<Vec<RosterRow>> {
    if path.exists() {
        read_roster(path)
    } else {
        Ok(Vec::new())
    }
}

/// Append a player, creating the file when it does not exist yet.
pub fn add_player(
    path: &Path,
    name: &str,
    tier: f64,
    position: &str,
    thresholds: &StrengthThresholds,
) -> Result<RosterRow> {
    let name = name.trim();
    PlayerValidator::validate_name(name)?;
    PlayerValidator::validate_tier(name, tier)?;

    let canonical = normalize_position(position);
    if Position::from_label(&canonical).is_none() {
        bail!("Invalid position '{}' for {} (expected GK, DF, MF or ST)", position, name);
    }

    let mut rows = load_or_empty(path)?;
    if rows.iter().any(|row| row.name == name) {
        bail!("Player '{}' already exists in {}", name, path.display());
    }

    rows.push(RosterRow::new(name, tier, canonical));
    write_roster(path, &mut rows, thresholds)?;

    info!(player = name, tier, "player added");
    // write_roster filled in the strength cell
    let added = rows.pop().context("roster unexpectedly empty after write")?;
    Ok(added)
}

/// Players attending today, in the order their names were given.
pub fn select_players(rows: &[RosterRow], names: &[String]) -> Result<Vec<PlayerRecord>> {
    names
        .iter()
        .map(|name| {
            let name = name.trim();
            rows.iter()
                .find(|row| row.name == name)
                .map(RosterRow::to_record)
                .with_context(|| format!("Unknown player: '{}'", name))
        })
        .collect()
}

/// Recompute a stored player's tier from skill and stamina labels.
pub fn rate_player(
    path: &Path,
    name: &str,
    skill: SkillLevel,
    stamina: StaminaLevel,
    skill_weight: f64,
    thresholds: &StrengthThresholds,
) -> Result<RosterRow> {
    let tier = calculate_tier(skill, stamina, skill_weight)?;

    let mut rows = read_roster(path)?;
    let idx = rows
        .iter()
        .position(|row| row.name == name.trim())
        .with_context(|| format!("Unknown player: '{}'", name.trim()))?;

    {
        let row = &mut rows[idx];
        row.tier = tier;
        row.skill = Some(skill.label());
        row.stamina = Some(stamina.to_string());
    }
    write_roster(path, &mut rows, thresholds)?;

    info!(player = %rows[idx].name, tier, "player rated");
    Ok(rows[idx].clone())
}
