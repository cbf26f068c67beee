// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service boundary.

use crate::password_policy::PasswordPolicyError;
use idea_hub::CoreError;
use idea_hub_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Service-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: not-found, unauthorized, invalid-input, and rule violations are
/// all distinguished results, never silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed; the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A workflow rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Workflow rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::IdeaNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Idea"),
            message: format!("Idea {id} does not exist"),
        },
        DomainError::AppealNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Appeal"),
            message: format!("Appeal {id} does not exist"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("idea_lifecycle"),
                message: format!("Cannot move idea from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::OperationNotAllowedInStatus { operation, status } => {
            ApiError::DomainRuleViolation {
                rule: String::from("idea_lifecycle"),
                message: format!(
                    "Operation '{operation}' is not allowed while the idea is '{status}'"
                ),
            }
        }
        DomainError::EmptyField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Required field '{field}' must not be empty"),
        },
        DomainError::InvalidProgress { progress } => ApiError::InvalidInput {
            field: String::from("progress"),
            message: format!("Invalid progress value: {progress}. Must be between 0 and 100"),
        },
        DomainError::InvalidEmail(email) => ApiError::InvalidInput {
            field: String::from("email"),
            message: format!("Invalid email address: '{email}'"),
        },
        DomainError::NoDecisionToAppeal(id) => ApiError::DomainRuleViolation {
            rule: String::from("appealable_decision"),
            message: format!("Idea {id} has no decision to appeal"),
        },
        DomainError::AppealWindowClosed { idea_id, deadline } => ApiError::DomainRuleViolation {
            rule: String::from("appeal_window"),
            message: format!("The appeal window for idea {idea_id} closed at {deadline}"),
        },
        DomainError::PendingAppealExists { idea_id } => ApiError::DomainRuleViolation {
            rule: String::from("single_pending_appeal"),
            message: format!("A pending appeal already exists for idea {idea_id}"),
        },
        DomainError::AppealAlreadyResolved { appeal_id, status } => {
            ApiError::DomainRuleViolation {
                rule: String::from("appeal_resolution"),
                message: format!("Appeal {appeal_id} was already resolved as '{status}'"),
            }
        }
        DomainError::QuorumNotReached {
            appeal_id,
            votes,
            required,
        } => ApiError::DomainRuleViolation {
            rule: String::from("resolution_quorum"),
            message: format!(
                "Appeal {appeal_id} has {votes} votes but needs {required} before it can be resolved"
            ),
        },
        DomainError::InvalidIdeaStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid idea status: '{s}'"),
        },
        DomainError::InvalidAppealStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid appeal status: '{s}'"),
        },
        DomainError::InvalidDecisionKind(s) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid decision kind: '{s}'"),
        },
        DomainError::InvalidVoteChoice(s) => ApiError::InvalidInput {
            field: String::from("choice"),
            message: format!("Invalid vote choice: '{s}'"),
        },
        DomainError::InvalidRole(s) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: '{s}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
