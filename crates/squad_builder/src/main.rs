//! Squad Builder CLI
//!
//! CSV roster → balanced teams
//! Player management: add, rate, list

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use squad_core::{
    allocate_random, allocate_with_seed, AllocationConfig, AllocationResponse, PlayerValidator,
    SkillLevel, StaminaLevel,
};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "squad_builder")]
#[command(about = "Split a football roster into balanced teams", long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Split players into teams
    Split {
        /// Roster CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Number of teams
        #[arg(long)]
        teams: Option<usize>,

        /// Players needed per team
        #[arg(long)]
        per_team: Option<usize>,

        /// Comma-separated names of attending players (default: everyone)
        #[arg(long, value_delimiter = ',')]
        names: Vec<String>,

        /// YAML settings file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Weak band upper bound
        #[arg(long)]
        low: Option<f64>,

        /// Strong band lower bound
        #[arg(long)]
        high: Option<f64>,

        /// Balancing attempts before falling back
        #[arg(long)]
        retries: Option<usize>,

        /// Seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,

        /// Print the JSON response instead of the text report
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Add a player to the roster
    Add {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        tier: f64,

        /// GK, DF, MF or ST
        #[arg(long)]
        position: String,
    },

    /// Rate a player from skill and stamina
    Rate {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        name: String,

        /// "1 sao" .. "10 sao" or "siêu sao"
        #[arg(long)]
        skill: String,

        /// 0 .. 100 in steps of 10
        #[arg(long)]
        stamina: String,

        #[arg(long, default_value_t = squad_core::player::rating::DEFAULT_SKILL_WEIGHT)]
        skill_weight: f64,
    },

    /// Show the roster
    List {
        #[arg(long)]
        csv: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Split {
            csv,
            teams,
            per_team,
            names,
            config,
            low,
            high,
            retries,
            seed,
            json,
        } => {
            let mut settings = load_config(config.as_deref())?;
            if let Some(teams) = teams {
                settings = settings.with_team_count(teams);
            }
            if let Some(per_team) = per_team {
                settings.players_per_team = per_team;
            }
            if let Some(retries) = retries {
                settings = settings.with_max_retries(retries);
            }
            if low.is_some() || high.is_some() {
                let low = low.unwrap_or(settings.thresholds.low);
                let high = high.unwrap_or(settings.thresholds.high);
                settings = settings.with_thresholds(low, high)?;
            }

            let rows = squad_builder::read_roster(&csv)?;
            let players = if names.is_empty() {
                rows.iter().map(squad_builder::RosterRow::to_record).collect()
            } else {
                squad_builder::select_players(&rows, &names)?
            };

            PlayerValidator::validate_roster_size(
                players.len(),
                settings.team_count,
                settings.players_per_team,
            )?;

            let result = match seed {
                Some(seed) => allocate_with_seed(&players, &settings, seed)?,
                None => allocate_random(&players, &settings)?,
            };

            if json {
                let response = AllocationResponse::from(&result);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!(
                    "⚽ Splitting {} players into {} teams",
                    players.len(),
                    settings.team_count
                );
                print!("{}", squad_builder::render_report(&result));
            }
        }

        Commands::Add { csv, name, tier, position } => {
            let thresholds = AllocationConfig::from_env_or_default().thresholds;
            let row = squad_builder::add_player(&csv, &name, tier, &position, &thresholds)?;
            println!(
                "✅ Added {} ({}, Tier: {:.1}, {})",
                row.name, row.position, row.tier, row.strength
            );
        }

        Commands::Rate { csv, name, skill, stamina, skill_weight } => {
            let skill: SkillLevel = skill.parse()?;
            let stamina: StaminaLevel = stamina.parse()?;
            let thresholds = AllocationConfig::from_env_or_default().thresholds;
            let row =
                squad_builder::rate_player(&csv, &name, skill, stamina, skill_weight, &thresholds)?;
            println!("✅ {} (Tier: {:.1}) [{}]", row.name, row.tier, row.strength);
        }

        Commands::List { csv } => {
            let rows = squad_builder::read_roster(&csv)?;
            println!("📋 {} players in {}", rows.len(), csv.display());
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "{}. {} (Tier: {:.1}) {} [{}]",
                    i + 1,
                    row.name,
                    row.tier,
                    row.position,
                    row.strength
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&Path>) -> Result<AllocationConfig> {
    match path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Ok(AllocationConfig::from_yaml_str(&yaml)?)
        }
        None => Ok(AllocationConfig::from_env_or_default()),
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn,squad_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("squad_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
