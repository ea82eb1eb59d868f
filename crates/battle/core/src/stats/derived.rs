//! Derived combat values.
//!
//! Formulas (all integer, floored):
//! - max_hp      = max_hp + vitality × hp_per_vitality
//! - defense     = vitality × defense_per_vitality_pct / 100
//! - attack      = strength
//! - accuracy    = base_accuracy + focus / 2
//! - evasion     = agility / 2
//! - crit_chance = base_crit_chance + focus / 4 + luck / 10
//! - speed       = speed + agility / 4
//!
//! Buffs are applied to the underlying stat before deriving. Max HP is
//! computed from the unbuffed block so the HP cap never moves mid-battle.

use super::block::{StatBlock, StatKind};
use super::buff::BuffSet;
use crate::config::BattleConfig;

/// Values computed from a [`StatBlock`] and active buffs.
///
/// It is NEVER stored - always recomputed when needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub accuracy: u32,
    pub evasion: u32,
    pub crit_chance: u32,
    pub speed: u32,
    /// Buffed primaries kept for skill scaling.
    pub vitality: u32,
    pub agility: u32,
    pub focus: u32,
    pub luck: u32,
}

impl DerivedStats {
    pub fn compute(block: &StatBlock, buffs: &BuffSet, config: &BattleConfig) -> Self {
        let strength = buffs.apply(StatKind::Strength, block.strength);
        let vitality = buffs.apply(StatKind::Vitality, block.vitality);
        let agility = buffs.apply(StatKind::Agility, block.agility);
        let focus = buffs.apply(StatKind::Focus, block.focus);
        let luck = buffs.apply(StatKind::Luck, block.luck);
        let speed = buffs.apply(StatKind::Speed, block.speed);

        Self {
            max_hp: Self::max_hp(block, config),
            attack: strength,
            defense: vitality.saturating_mul(config.defense_per_vitality_pct) / 100,
            accuracy: config.base_accuracy.saturating_add(focus / 2),
            evasion: agility / 2,
            crit_chance: config
                .base_crit_chance
                .saturating_add(focus / 4)
                .saturating_add(luck / 10)
                .min(100),
            speed: speed.saturating_add(agility / 4),
            vitality,
            agility,
            focus,
            luck,
        }
    }

    /// Compute with no buffs (baseline only).
    pub fn from_base(block: &StatBlock, config: &BattleConfig) -> Self {
        Self::compute(block, &BuffSet::new(), config)
    }

    /// HP cap of a stat block; unaffected by buffs.
    pub fn max_hp(block: &StatBlock, config: &BattleConfig) -> u32 {
        block
            .max_hp
            .saturating_add(block.vitality.saturating_mul(config.hp_per_vitality))
    }

    /// The offensive value a skill scales from. Speed scales from the
    /// derived value, every other stat from its buffed primary.
    pub fn scaling(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Strength => self.attack,
            StatKind::Vitality => self.vitality,
            StatKind::Agility => self.agility,
            StatKind::Focus => self.focus,
            StatKind::Luck => self.luck,
            StatKind::Speed => self.speed,
        }
    }
}
