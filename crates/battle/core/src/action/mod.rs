//! Combat actions and their resolution.
//!
//! Resolution runs in two phases:
//! 1. **Pre-validation** checks every reference (combatants, skills, items,
//!    statuses) against the state before mutation and produces a plan
//! 2. **Apply** executes the plan, rolling dice and appending log entries
//!
//! A failed pre-validation mutates nothing and does not consume the turn.

mod effect;
mod error;
mod resolve;

pub use error::ResolutionError;
pub(crate) use effect::inflict;
pub(crate) use resolve::{ResolveContext, Resolved, apply, pre_validate};

use strum::AsRefStr;

use crate::env::{ItemId, SkillId};
use crate::state::CombatantId;

/// One combatant's choice for its turn.
#[derive(Clone, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    BasicAttack {
        source: CombatantId,
        target: CombatantId,
    },
    SkillUse {
        source: CombatantId,
        skill: SkillId,
        targets: Vec<CombatantId>,
    },
    ItemUse {
        source: CombatantId,
        item: ItemId,
        target: CombatantId,
    },
    Defend {
        source: CombatantId,
    },
    Retreat {
        source: CombatantId,
    },
}

impl CombatAction {
    /// The combatant taking the action.
    pub fn source(&self) -> CombatantId {
        match self {
            Self::BasicAttack { source, .. }
            | Self::SkillUse { source, .. }
            | Self::ItemUse { source, .. }
            | Self::Defend { source }
            | Self::Retreat { source } => *source,
        }
    }

    /// Every combatant the action names as a target.
    pub fn targets(&self) -> Vec<CombatantId> {
        match self {
            Self::BasicAttack { target, .. } | Self::ItemUse { target, .. } => vec![*target],
            Self::SkillUse { targets, .. } => targets.clone(),
            Self::Defend { .. } | Self::Retreat { .. } => Vec::new(),
        }
    }
}
