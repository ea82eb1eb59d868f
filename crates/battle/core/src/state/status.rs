//! Active status instances on a combatant.
//!
//! # Round-based duration
//!
//! An instance stores `remaining_turns`. Upkeep ticks every instance first and
//! counts durations down afterwards, so a status applied with duration N
//! produces exactly N ticks before it expires.
//!
//! Statuses that skip turns count turns instead: upkeep leaves them alone and
//! each skipped turn spends one. Duration N always costs the carrier N turns,
//! whether it was applied before or after the carrier acted that round.

use arrayvec::ArrayVec;

use super::CombatantId;
use crate::config::BattleConfig;
use crate::env::{StackingRule, StatusEffectDefinition, StatusId, StatusOracle};

/// A status currently affecting a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub id: StatusId,
    pub remaining_turns: u32,
    pub stacks: u32,
    /// Who applied the status, if anyone.
    pub source: Option<CombatantId>,
}

/// Bounded set of active statuses, at most one instance per [`StatusId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusInstance, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &StatusId) -> Option<&StatusInstance> {
        self.effects.iter().find(|effect| &effect.id == id)
    }

    /// Applies `definition` following its stacking rule.
    ///
    /// - New status: one stack, full duration
    /// - [`StackingRule::Accumulate`]: +1 stack up to `max_stacks`, duration reset
    /// - [`StackingRule::Refresh`]: duration reset, stacks unchanged
    ///
    /// The latest source replaces the previous one. Returns the resulting
    /// instance, or `None` when the status is new and the set is full.
    pub fn apply(
        &mut self,
        definition: &StatusEffectDefinition,
        source: Option<CombatantId>,
    ) -> Option<&StatusInstance> {
        let duration = definition.duration.max(1);
        let max_stacks = definition.max_stacks.max(1);

        if let Some(index) = self
            .effects
            .iter()
            .position(|effect| effect.id == definition.id)
        {
            let existing = &mut self.effects[index];
            if definition.stacking == StackingRule::Accumulate {
                existing.stacks = existing.stacks.saturating_add(1).min(max_stacks);
            }
            existing.remaining_turns = duration;
            existing.source = source.or(existing.source);
            return self.effects.get(index);
        }

        self.effects
            .try_push(StatusInstance {
                id: definition.id.clone(),
                remaining_turns: duration,
                stacks: 1,
                source,
            })
            .ok()?;
        self.effects.last()
    }

    /// Removes every instance matching `predicate` and returns them in order.
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&StatusInstance) -> bool,
    ) -> Vec<StatusInstance> {
        let mut removed = Vec::new();
        let mut kept = ArrayVec::new();
        for effect in self.effects.drain(..) {
            if predicate(&effect) {
                removed.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        removed
    }

    /// Counts every round-based instance down by one and returns those that
    /// expired. Skip-turn statuses are left for [`Self::consume_skip`].
    pub fn tick(&mut self, oracle: &dyn StatusOracle) -> Vec<StatusInstance> {
        for effect in self.effects.iter_mut() {
            if !skips_turn(oracle, effect) {
                effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            }
        }
        self.remove_where(|effect| effect.remaining_turns == 0)
    }

    /// Spends one turn of the first status that skips the carrier's turn.
    ///
    /// Returns the instance as it stands afterwards; at zero remaining turns
    /// it has already been removed. `None` means the carrier may act.
    pub fn consume_skip(&mut self, oracle: &dyn StatusOracle) -> Option<StatusInstance> {
        let index = self
            .effects
            .iter()
            .position(|effect| skips_turn(oracle, effect))?;

        let effect = &mut self.effects[index];
        effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
        if effect.remaining_turns == 0 {
            Some(self.effects.remove(index))
        } else {
            Some(effect.clone())
        }
    }

    /// Sum of `speed_penalty` over every active status.
    pub fn speed_penalty(&self, oracle: &dyn StatusOracle) -> u32 {
        self.effects
            .iter()
            .filter_map(|effect| oracle.status(&effect.id))
            .fold(0u32, |total, def| total.saturating_add(def.speed_penalty))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

fn skips_turn(oracle: &dyn StatusOracle, effect: &StatusInstance) -> bool {
    oracle
        .status(&effect.id)
        .is_some_and(|definition| definition.skips_turn())
}
