use crate::models::Strength;

/// Map a tier to its strength band.
///
/// Non-finite tiers are `Unknown`. `tier <= low` is weak, `tier >= high` is
/// strong, anything between is balanced. `low < high` is enforced by
/// [`crate::config::StrengthThresholds`], not here.
pub fn classify_strength(tier: f64, low: f64, high: f64) -> Strength {
    if !tier.is_finite() {
        return Strength::Unknown;
    }
    if tier <= low {
        Strength::Weak
    } else if tier >= high {
        Strength::Strong
    } else {
        Strength::Balanced
    }
}
