//! Action resolution errors.

use crate::env::{ItemId, SkillId, StatusId};
use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

/// Why a submitted action could not be resolved.
///
/// Every variant is detected before mutation; the action is logged as
/// discarded and the same combatant is still up.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionError {
    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    #[error("source {0} is defeated")]
    SourceDefeated(CombatantId),

    #[error("target {0} is defeated")]
    TargetDefeated(CombatantId),

    #[error("unknown skill `{0}`")]
    UnknownSkill(SkillId),

    #[error("unknown item `{0}`")]
    UnknownItem(ItemId),

    #[error("unknown status `{0}`")]
    UnknownStatus(StatusId),

    #[error("skill `{0}` was used without targets")]
    NoTargets(SkillId),

    #[error("target {0} is listed more than once")]
    DuplicateTarget(CombatantId),
}

impl BattleError for ResolutionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSkill(_) | Self::UnknownItem(_) | Self::UnknownStatus(_) => {
                ErrorSeverity::Internal
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCombatant(_) => "RESOLUTION_UNKNOWN_COMBATANT",
            Self::SourceDefeated(_) => "RESOLUTION_SOURCE_DEFEATED",
            Self::TargetDefeated(_) => "RESOLUTION_TARGET_DEFEATED",
            Self::UnknownSkill(_) => "RESOLUTION_UNKNOWN_SKILL",
            Self::UnknownItem(_) => "RESOLUTION_UNKNOWN_ITEM",
            Self::UnknownStatus(_) => "RESOLUTION_UNKNOWN_STATUS",
            Self::NoTargets(_) => "RESOLUTION_NO_TARGETS",
            Self::DuplicateTarget(_) => "RESOLUTION_DUPLICATE_TARGET",
        }
    }
}
