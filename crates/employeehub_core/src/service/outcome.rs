//! Declined-operation errors and the `{success, message}` result envelope.
//!
//! # Invariants
//! - A declined operation leaves all prior state unchanged.
//! - Only `KudosError::Repo` escapes as an error from outcome conversion;
//!   every other variant becomes `ActionOutcome { success: false, .. }`.

use crate::model::employee::EmployeeId;
use crate::model::reward::RewardId;
use crate::model::Kudos;
use crate::repo::kv_repo::{RepoError, RepoResult};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from kudos transfer and reward redemption.
#[derive(Debug)]
pub enum KudosError {
    RecipientNotFound(EmployeeId),
    SelfTransferRejected,
    SenderNotFound(EmployeeId),
    InsufficientBalance { balance: Kudos, requested: Kudos },
    RewardNotFound(RewardId),
    RequesterNotFound(EmployeeId),
    InsufficientPoints { available: Kudos, cost: Kudos },
    /// Persistence failed; not a decline.
    Repo(RepoError),
}

impl KudosError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RecipientNotFound(_) => "recipient_not_found",
            Self::SelfTransferRejected => "self_transfer_rejected",
            Self::SenderNotFound(_) => "sender_not_found",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::RewardNotFound(_) => "reward_not_found",
            Self::RequesterNotFound(_) => "requester_not_found",
            Self::InsufficientPoints { .. } => "insufficient_points",
            Self::Repo(_) => "repo_error",
        }
    }

    pub fn is_decline(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

impl Display for KudosError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecipientNotFound(_) => write!(f, "Recipient not found."),
            Self::SelfTransferRejected => write!(f, "You cannot send kudos to yourself."),
            Self::SenderNotFound(_) => write!(f, "Sender not found."),
            Self::InsufficientBalance { .. } => write!(f, "Not enough kudos balance."),
            Self::RewardNotFound(_) => write!(f, "Reward not found."),
            Self::RequesterNotFound(_) => write!(f, "Employee not found."),
            Self::InsufficientPoints { .. } => {
                write!(f, "Not enough kudos points to redeem this reward.")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KudosError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for KudosError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result envelope surfaced verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Folds an engine result into an outcome, passing storage errors through.
    pub fn from_result<T>(
        result: Result<T, KudosError>,
        success_message: impl FnOnce(&T) -> String,
    ) -> RepoResult<Self> {
        match result {
            Ok(value) => Ok(Self::success(success_message(&value))),
            Err(KudosError::Repo(err)) => Err(err),
            Err(decline) => Ok(Self::failure(decline.to_string())),
        }
    }
}
