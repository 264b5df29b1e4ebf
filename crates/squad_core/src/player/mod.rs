//! Player helpers
//!
//! Pure functions usable on their own for validation or display:
//! - Position text normalization
//! - Strength band classification
//! - Tier rating from skill / stamina
//! - Roster validation

pub mod normalize;
pub mod rating;
pub mod strength;
pub mod validation;

pub use normalize::normalize_position;
pub use rating::{calculate_tier, SkillLevel, StaminaLevel};
pub use strength::classify_strength;
pub use validation::PlayerValidator;
