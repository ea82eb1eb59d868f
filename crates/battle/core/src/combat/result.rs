//! Attack outcomes.

use super::damage::calculate_damage;
use super::hit::{check_hit, is_critical};
use crate::config::BattleConfig;
use crate::stats::DerivedStats;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// `None` on a miss.
    pub damage: Option<u32>,
}

impl AttackResult {
    pub fn is_critical(&self) -> bool {
        self.outcome == AttackOutcome::Critical
    }
}

/// Resolves one rolled attack: hit check, crit check, then damage.
///
/// `base` is the pre-resistance damage already reduced by defense;
/// `resistance` is the defender's value for the attack's element.
#[allow(clippy::too_many_arguments)]
pub fn resolve_attack(
    attacker: &DerivedStats,
    defender: &DerivedStats,
    base: u32,
    resistance: i32,
    defending: bool,
    hit_roll: u32,
    crit_roll: u32,
    config: &BattleConfig,
) -> AttackResult {
    if !check_hit(attacker.accuracy, defender.evasion, hit_roll, config) {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            damage: None,
        };
    }

    let critical = is_critical(attacker.crit_chance, crit_roll);
    let damage = calculate_damage(base, resistance, critical, defending, config);

    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        damage: Some(damage),
    }
}
