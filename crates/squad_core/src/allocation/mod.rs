//! Team allocation
//!
//! - [`balancer`]: position-bucketed round-robin partition
//! - [`fairness`]: per-line median / IQR comparison for two teams
//! - [`orchestrator`]: bounded retries with least-violating fallback
//!
//! ## Usage
//!
//! ```rust
//! use squad_core::allocation::allocate_with_seed;
//! use squad_core::config::AllocationConfig;
//! use squad_core::models::PlayerRecord;
//!
//! let players = vec![
//!     PlayerRecord::new("An", 3.0, "GK"),
//!     PlayerRecord::new("Binh", 2.8, "GK"),
//!     PlayerRecord::new("Cuong", 3.4, "DF"),
//!     PlayerRecord::new("Dung", 3.1, "DF"),
//! ];
//! let config = AllocationConfig { players_per_team: 2, ..AllocationConfig::default() };
//! let result = allocate_with_seed(&players, &config, 42).unwrap();
//! assert_eq!(result.teams().len(), 2);
//! ```

pub mod balancer;
pub mod fairness;
pub mod orchestrator;

pub use balancer::TeamBalancer;
pub use fairness::{FairnessEvaluator, FairnessReport, LineFairness, FAIRNESS_EPSILON};
pub use orchestrator::{AllocationResult, Attempt, RetryOrchestrator, Selection};

use crate::config::AllocationConfig;
use crate::error::Result;
use crate::models::PlayerRecord;
use crate::player::PlayerValidator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Validate settings and roster, then run the retry loop.
///
/// `players_per_team` is not enforced here; see
/// [`PlayerValidator::validate_roster_size`].
pub fn allocate<R: Rng + ?Sized>(
    players: &[PlayerRecord],
    config: &AllocationConfig,
    rng: &mut R,
) -> Result<AllocationResult> {
    config.validate()?;
    PlayerValidator::validate_roster(players)?;

    RetryOrchestrator::from_config(config).generate(
        players,
        config.team_count,
        config.max_retries,
        rng,
    )
}

/// Reproducible allocation from a seed
pub fn allocate_with_seed(
    players: &[PlayerRecord],
    config: &AllocationConfig,
    seed: u64,
) -> Result<AllocationResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    allocate(players, config, &mut rng)
}

/// Allocation drawing from the thread-local generator
pub fn allocate_random(
    players: &[PlayerRecord],
    config: &AllocationConfig,
) -> Result<AllocationResult> {
    allocate(players, config, &mut rand::thread_rng())
}
