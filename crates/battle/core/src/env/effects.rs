//! Effect tables shared by skills and items.

use super::StatusId;
use crate::stats::{Element, StatKind};

/// One step of a skill or item, applied to each target in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Deal damage. For skills, base damage is `power + scaling stat - defense`;
    /// for items it is `power` alone. Skill damage rolls hit and crit.
    Damage {
        power: u32,
        element: Option<Element>,
        scaling: Option<StatKind>,
    },
    /// Restore HP, capped at max HP.
    Heal { amount: u32 },
    /// Attempt to apply a status; `chance` is a percentage (100 = always).
    ApplyStatus { status: StatusId, chance: u32 },
    /// Grant a timed stat delta.
    Buff { stat: StatKind, value: i32, turns: u32 },
    /// Remove every status flagged as a debuff.
    Cleanse,
}

impl Effect {
    pub fn damage(power: u32) -> Self {
        Self::Damage {
            power,
            element: None,
            scaling: None,
        }
    }

    pub fn elemental(power: u32, element: impl Into<Element>) -> Self {
        Self::Damage {
            power,
            element: Some(element.into()),
            scaling: None,
        }
    }

    pub fn apply_status(status: impl Into<StatusId>, chance: u32) -> Self {
        Self::ApplyStatus {
            status: status.into(),
            chance,
        }
    }

    /// Attaches a scaling stat to a damage effect; other effects are unchanged.
    pub fn scaling_with(self, stat: StatKind) -> Self {
        match self {
            Self::Damage { power, element, .. } => Self::Damage {
                power,
                element,
                scaling: Some(stat),
            },
            other => other,
        }
    }

    /// The status this effect references, if any.
    pub fn status(&self) -> Option<&StatusId> {
        match self {
            Self::ApplyStatus { status, .. } => Some(status),
            _ => None,
        }
    }
}
