//! Error classification shared by every battle-core error.
//!
//! The concrete enums live next to the code that raises them:
//! [`SetupError`](crate::SetupError) in the engine,
//! [`ResolutionError`](crate::ResolutionError) in the action resolver and
//! [`SubmitError`](crate::SubmitError) at the submission boundary.
//!
//! Only a malformed setup stops an encounter. Everything else is absorbed:
//! the engine logs it, leaves state untouched and keeps the same actor up.

use strum::{AsRefStr, Display};

/// How a host should react to a battle error.
///
/// - **Recoverable**: resubmit, usually for a different actor or target
/// - **Validation**: the action itself is wrong and will keep failing
/// - **Internal**: content and state disagree; worth a bug report
/// - **Fatal**: the encounter was never created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Out-of-turn submissions, waiting on the player.
    Recoverable,
    /// Defeated sources or targets, empty target lists.
    Validation,
    /// A skill, item or status id the catalog does not know.
    Internal,
    /// Empty rosters, duplicate ids, zero max HP.
    Fatal,
}

impl ErrorSeverity {
    /// Whether retrying with another action can succeed.
    pub const fn allows_retry(self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Whether the error points at bad content or a bad setup rather than
    /// a bad choice by the player.
    pub const fn is_content_fault(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in the crate.
///
/// Derive `thiserror::Error` for the message and classify by what the caller
/// can do about it.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier, e.g. `SUBMIT_OUT_OF_TURN`, for UI feedback and tests.
    fn error_code(&self) -> &'static str;
}
