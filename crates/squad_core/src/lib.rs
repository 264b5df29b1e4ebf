//! # squad_core - Position-Aware Team Balancing
//!
//! Splits a roster of rated players into teams and checks each outfield line
//! for fairness before accepting the split.
//!
//! ## Features
//! - Goalkeepers spread one per team, outfield lines dealt round-robin
//! - Per-line median / IQR comparison for two-team splits
//! - Bounded retries with a least-violating fallback
//! - Reproducible runs from a seed (ChaCha8)
//! - JSON API for front ends

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally in tests
#![allow(clippy::field_reassign_with_default)]

pub mod allocation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod player;
pub mod stats;

// Re-export main API functions
pub use allocation::{
    allocate, allocate_random, allocate_with_seed, AllocationResult, Attempt, FairnessEvaluator,
    FairnessReport, LineFairness, RetryOrchestrator, Selection, TeamBalancer,
};
pub use api::{allocate_json, allocation_request_schema, AllocationRequest, AllocationResponse};
pub use config::{AllocationConfig, LineTolerances, StrengthThresholds};
pub use error::{Result, SquadError};

// Re-export model and player helper types
pub use models::{Line, Player, PlayerRecord, Position, Strength, Team};
pub use player::{
    calculate_tier, classify_strength, normalize_position, PlayerValidator, SkillLevel,
    StaminaLevel,
};
pub use stats::{interquartile_spread, median};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
