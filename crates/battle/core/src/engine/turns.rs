//! Round-based turn order.
//!
//! The order for a round is fixed when the round starts. Combatants defeated
//! mid-round keep their slot and are skipped when the cursor reaches them.

use std::cmp::Reverse;

use crate::config::BattleConfig;
use crate::env::StatusOracle;
use crate::state::{CombatantId, CombatantState};

/// Computes the acting order for a new round.
///
/// Living combatants sort by descending effective speed; ties go to the
/// earlier side (Player, Ally, Enemy) and then to registration order.
pub fn compute_order(
    combatants: &[CombatantState],
    statuses: &dyn StatusOracle,
    config: &BattleConfig,
) -> Vec<CombatantId> {
    let mut ranked: Vec<_> = combatants
        .iter()
        .enumerate()
        .filter(|(_, state)| state.is_alive())
        .map(|(index, state)| {
            let speed = state.effective_speed(statuses, config);
            ((Reverse(speed), state.side(), index), state.id())
        })
        .collect();
    ranked.sort_by_key(|(key, _)| *key);
    ranked.into_iter().map(|(_, id)| id).collect()
}

/// Order and cursor for the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    round: u32,
    slots: Vec<CombatantId>,
    cursor: usize,
}

impl TurnOrder {
    pub fn new(round: u32, slots: Vec<CombatantId>) -> Self {
        Self {
            round,
            slots,
            cursor: 0,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn slots(&self) -> &[CombatantId] {
        &self.slots
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Combatant at the cursor, `None` once every slot has been visited.
    pub fn current(&self) -> Option<CombatantId> {
        self.slots.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.slots.len() {
            self.cursor += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.slots.len()
    }

    /// Slots after the current one.
    pub fn upcoming(&self) -> &[CombatantId] {
        self.slots.get(self.cursor + 1..).unwrap_or_default()
    }
}
