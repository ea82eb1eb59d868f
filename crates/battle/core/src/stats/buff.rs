//! Timed buffs and debuffs.
//!
//! A buff is a signed delta on one stat with a round-based duration. Buffs
//! never stack into a single entry: each application is its own
//! [`ActiveBuff`], and the effective delta for a stat is the sum.

use arrayvec::ArrayVec;

use super::block::StatKind;
use crate::config::BattleConfig;

/// A single active buff (positive `value`) or debuff (negative `value`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBuff {
    pub stat: StatKind,
    pub value: i32,
    /// Rounds left; decremented at end-of-round upkeep, removed at zero.
    pub remaining_turns: u32,
}

impl ActiveBuff {
    pub fn new(stat: StatKind, value: i32, remaining_turns: u32) -> Self {
        Self {
            stat,
            value,
            remaining_turns,
        }
    }
}

/// Active buffs on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffSet {
    buffs: ArrayVec<ActiveBuff, { BattleConfig::MAX_BUFFS }>,
}

impl BuffSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a buff. Returns false when the set is full or the buff is inert
    /// (zero value or zero duration).
    pub fn add(&mut self, buff: ActiveBuff) -> bool {
        if buff.value == 0 || buff.remaining_turns == 0 || self.buffs.is_full() {
            return false;
        }
        self.buffs.push(buff);
        true
    }

    /// Sum of every active delta on `stat`.
    pub fn delta(&self, stat: StatKind) -> i32 {
        self.buffs
            .iter()
            .filter(|buff| buff.stat == stat)
            .map(|buff| buff.value)
            .sum()
    }

    /// Applies the summed delta to a baseline value, flooring at zero.
    pub fn apply(&self, stat: StatKind, base: u32) -> u32 {
        let value = i64::from(base) + i64::from(self.delta(stat));
        u32::try_from(value.max(0)).unwrap_or(u32::MAX)
    }

    /// Counts every buff down by one round and returns those that expired.
    pub fn tick(&mut self) -> Vec<ActiveBuff> {
        let mut expired = Vec::new();
        for buff in self.buffs.iter_mut() {
            buff.remaining_turns = buff.remaining_turns.saturating_sub(1);
            if buff.remaining_turns == 0 {
                expired.push(*buff);
            }
        }
        self.buffs.retain(|buff| buff.remaining_turns > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveBuff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}
