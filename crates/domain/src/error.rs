// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AppealId, IdeaId};
use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No idea exists with the given identifier.
    IdeaNotFound(IdeaId),
    /// No appeal exists with the given identifier.
    AppealNotFound(AppealId),
    /// The requested status transition is not permitted by the lifecycle
    /// table.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// The operation is not permitted while the idea is in its current
    /// status.
    OperationNotAllowedInStatus {
        /// The operation that was attempted.
        operation: String,
        /// The idea's current status.
        status: String,
    },
    /// A required text field was empty.
    EmptyField(&'static str),
    /// Check-in progress must be between 0 and 100.
    InvalidProgress {
        /// The rejected progress value.
        progress: u8,
    },
    /// The email address is not plausibly formed.
    InvalidEmail(String),
    /// The idea carries no decision, so there is nothing to appeal.
    NoDecisionToAppeal(IdeaId),
    /// The decision's appeal window has closed.
    AppealWindowClosed {
        /// The contested idea.
        idea_id: IdeaId,
        /// When the window closed.
        deadline: OffsetDateTime,
    },
    /// A pending appeal already exists for the idea.
    PendingAppealExists {
        /// The contested idea.
        idea_id: IdeaId,
    },
    /// The appeal has already been resolved.
    AppealAlreadyResolved {
        /// The appeal.
        appeal_id: AppealId,
        /// Its resolved status.
        status: String,
    },
    /// Not enough votes have been cast to resolve the appeal.
    QuorumNotReached {
        /// The appeal.
        appeal_id: AppealId,
        /// Votes cast so far.
        votes: usize,
        /// Votes required.
        required: usize,
    },
    /// The string is not a valid idea status.
    InvalidIdeaStatus(String),
    /// The string is not a valid appeal status.
    InvalidAppealStatus(String),
    /// The string is not a valid decision kind.
    InvalidDecisionKind(String),
    /// The string is not a valid vote choice.
    InvalidVoteChoice(String),
    /// The string is not a valid role.
    InvalidRole(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdeaNotFound(id) => write!(f, "Idea {id} not found"),
            Self::AppealNotFound(id) => write!(f, "Appeal {id} not found"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move idea from '{from}' to '{to}': {reason}")
            }
            Self::OperationNotAllowedInStatus { operation, status } => {
                write!(
                    f,
                    "Operation '{operation}' is not allowed while the idea is '{status}'"
                )
            }
            Self::EmptyField(field) => write!(f, "Required field '{field}' must not be empty"),
            Self::InvalidProgress { progress } => {
                write!(
                    f,
                    "Invalid progress value: {progress}. Must be between 0 and 100"
                )
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::NoDecisionToAppeal(id) => {
                write!(f, "Idea {id} has no decision to appeal")
            }
            Self::AppealWindowClosed { idea_id, deadline } => {
                write!(
                    f,
                    "The appeal window for idea {idea_id} closed at {deadline}"
                )
            }
            Self::PendingAppealExists { idea_id } => {
                write!(f, "A pending appeal already exists for idea {idea_id}")
            }
            Self::AppealAlreadyResolved { appeal_id, status } => {
                write!(f, "Appeal {appeal_id} was already resolved as '{status}'")
            }
            Self::QuorumNotReached {
                appeal_id,
                votes,
                required,
            } => {
                write!(
                    f,
                    "Appeal {appeal_id} has {votes} votes but needs {required} before it can be resolved"
                )
            }
            Self::InvalidIdeaStatus(s) => write!(f, "Invalid idea status: '{s}'"),
            Self::InvalidAppealStatus(s) => write!(f, "Invalid appeal status: '{s}'"),
            Self::InvalidDecisionKind(s) => write!(f, "Invalid decision kind: '{s}'"),
            Self::InvalidVoteChoice(s) => write!(f, "Invalid vote choice: '{s}'"),
            Self::InvalidRole(s) => write!(f, "Invalid role: '{s}'"),
        }
    }
}

impl std::error::Error for DomainError {}
