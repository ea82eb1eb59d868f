//! Damage calculation.
//!
//! All arithmetic is integer. Percentages round half up, and every hit that
//! lands deals at least 1.
//!
//! ```text
//! r      = clamp(resistance, -100, 100)
//! damage = round(base × (100 - r) / 100)            // × crit_pct / 100 on a crit
//! damage = round(damage × (100 - defend_pct) / 100) // when defending
//! damage = max(damage, 1)
//! ```
//!
//! Without crit or defend this keeps `1 <= damage <= 2 × base`.

use crate::config::BattleConfig;
use crate::stats::ResistanceProfile;

/// `round(numerator / denominator)`, halves rounding up.
fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

fn to_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn resistance_factor(resistance: i32) -> u64 {
    let r = resistance.clamp(ResistanceProfile::MIN, ResistanceProfile::MAX);
    // 0..=200
    u64::from((100 - r).unsigned_abs())
}

/// Applies a resistance percentage to `base`. Out-of-band values are clamped.
pub fn apply_resistance(base: u32, resistance: i32) -> u32 {
    let scaled = div_round(u64::from(base) * resistance_factor(resistance), 100);
    to_u32(scaled).max(1)
}

/// Final damage after resistance, critical multiplier, and defend reduction.
///
/// The crit multiplier is applied in the same rounding step as resistance;
/// defend reduces the already-resisted value.
pub fn calculate_damage(
    base: u32,
    resistance: i32,
    critical: bool,
    defending: bool,
    config: &BattleConfig,
) -> u32 {
    let factor = resistance_factor(resistance);
    let mut damage = if critical {
        div_round(
            u64::from(base) * factor * u64::from(config.crit_multiplier()),
            100 * 100,
        )
    } else {
        div_round(u64::from(base) * factor, 100)
    };

    if defending {
        let kept = u64::from(100 - config.defend_reduction());
        damage = div_round(damage * kept, 100);
    }

    to_u32(damage).max(1)
}

/// Basic attack base damage: `attack - defense`, at least 1.
pub fn attack_base(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

/// Skill base damage: `power + scaling - defense`, at least 1.
pub fn skill_base(power: u32, scaling: u32, defense: u32) -> u32 {
    power.saturating_add(scaling).saturating_sub(defense).max(1)
}
