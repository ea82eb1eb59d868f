//! Errors surfaced by the encounter state machine.

use crate::action::ResolutionError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{CombatantId, Side};

/// Malformed encounter input. The encounter is never created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("the {0} roster is empty")]
    EmptySide(&'static str),

    #[error("combatant id {0} is used more than once")]
    DuplicateId(CombatantId),

    #[error("combatant {id} is on side `{side}` but listed in the {roster} roster")]
    SideMismatch {
        id: CombatantId,
        side: Side,
        roster: &'static str,
    },

    #[error("combatant {0} has zero max HP")]
    ZeroMaxHp(CombatantId),
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySide(_) => "SETUP_EMPTY_SIDE",
            Self::DuplicateId(_) => "SETUP_DUPLICATE_ID",
            Self::SideMismatch { .. } => "SETUP_SIDE_MISMATCH",
            Self::ZeroMaxHp(_) => "SETUP_ZERO_MAX_HP",
        }
    }
}

/// Why a submission was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("the encounter has not started")]
    NotStarted,

    #[error("it is {expected}'s turn, not {got}'s")]
    OutOfTurn {
        expected: CombatantId,
        got: CombatantId,
    },

    #[error("action discarded: {0}")]
    Discarded(#[from] ResolutionError),

    /// `advance` was called while a party member is up.
    #[error("waiting for an action from {0}")]
    AwaitingPlayer(CombatantId),
}

impl BattleError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotStarted => ErrorSeverity::Validation,
            Self::OutOfTurn { .. } | Self::AwaitingPlayer(_) => ErrorSeverity::Recoverable,
            Self::Discarded(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "SUBMIT_NOT_STARTED",
            Self::OutOfTurn { .. } => "SUBMIT_OUT_OF_TURN",
            Self::Discarded(inner) => inner.error_code(),
            Self::AwaitingPlayer(_) => "SUBMIT_AWAITING_PLAYER",
        }
    }
}
