//! Append-only record of everything observable in an encounter.
//!
//! Hosts drive presentation (damage numbers, animations, battle text) by
//! reading new entries after each submission. The engine never reads the log
//! back, so consumers cannot influence resolution.

use crate::action::{CombatAction, ResolutionError};
use crate::engine::CombatOutcome;
use crate::env::{ItemId, SkillId, StatusId};
use crate::state::{CombatantId, Side};
use crate::stats::StatKind;

/// What caused a [`CombatLogEntry::Damage`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    Attack,
    Skill(SkillId),
    Item(ItemId),
    StatusTick(StatusId),
}

/// What caused a [`CombatLogEntry::Heal`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealSource {
    Skill(SkillId),
    Item(ItemId),
    StatusTick(StatusId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatLogEntry {
    RoundStarted {
        round: u32,
        order: Vec<CombatantId>,
    },
    /// An action passed validation and is about to resolve.
    ActionQueued {
        round: u32,
        action: CombatAction,
    },
    Damage {
        /// `None` for ticks of statuses with no recorded applier.
        attacker: Option<CombatantId>,
        target: CombatantId,
        amount: u32,
        source: DamageSource,
        critical: bool,
        hp_left: u32,
    },
    Heal {
        healer: Option<CombatantId>,
        target: CombatantId,
        amount: u32,
        source: HealSource,
        hp_left: u32,
    },
    Missed {
        attacker: CombatantId,
        target: CombatantId,
    },
    Defended {
        combatant: CombatantId,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusId,
        stacks: u32,
        remaining_turns: u32,
        source: Option<CombatantId>,
    },
    /// Application blocked by resistance or a failed chance roll.
    StatusResisted {
        target: CombatantId,
        status: StatusId,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusId,
    },
    StatusCleansed {
        target: CombatantId,
        status: StatusId,
    },
    BuffApplied {
        target: CombatantId,
        stat: StatKind,
        value: i32,
        turns: u32,
    },
    BuffExpired {
        target: CombatantId,
        stat: StatKind,
        value: i32,
    },
    TurnSkipped {
        combatant: CombatantId,
        reason: StatusId,
    },
    Defeated {
        combatant: CombatantId,
    },
    RetreatFailed {
        combatant: CombatantId,
        side: Side,
    },
    /// Rejected before any mutation; the turn was not consumed.
    ActionDiscarded {
        action: CombatAction,
        reason: ResolutionError,
    },
    /// Submitted after the encounter finished.
    ActionIgnored {
        action: CombatAction,
    },
    RoundEnded {
        round: u32,
    },
    Outcome(CombatOutcome),
}

impl CombatLogEntry {
    /// HP lost by `target` in this entry, if it is damage to that combatant.
    pub fn damage_to(&self, id: CombatantId) -> Option<u32> {
        match self {
            Self::Damage { target, amount, .. } if *target == id => Some(*amount),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: CombatLogEntry) {
        tracing::trace!(?entry, "combat log");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    /// Entries appended at or after `mark` (a previous [`CombatLog::len`]).
    pub fn since(&self, mark: usize) -> &[CombatLogEntry] {
        self.entries.get(mark..).unwrap_or_default()
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
