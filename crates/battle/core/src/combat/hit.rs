//! Hit chance and critical checks.

use crate::config::BattleConfig;

/// Chance to hit as a percentage.
///
/// ```text
/// hit_chance = accuracy - evasion
/// clamped to [min_hit_chance, 100]
/// ```
pub fn hit_chance(accuracy: u32, evasion: u32, config: &BattleConfig) -> u32 {
    let floor = config.min_hit_chance.min(100);
    accuracy.saturating_sub(evasion).clamp(floor, 100)
}

/// `roll` is a d100 (1-100). Hits when the roll is at or below the chance.
pub fn check_hit(accuracy: u32, evasion: u32, roll: u32, config: &BattleConfig) -> bool {
    roll <= hit_chance(accuracy, evasion, config)
}

/// `roll` is a d100 (1-100). A zero crit chance never crits.
pub fn is_critical(crit_chance: u32, roll: u32) -> bool {
    roll <= crit_chance.min(100)
}
