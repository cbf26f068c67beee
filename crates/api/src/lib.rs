// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary layer for Idea Hub.
//!
//! Everything a presentation layer needs: session handling, the workflow
//! operations with role-based permission preconditions, read-only queries,
//! and explicit error translation. The presentation layer is advisory only;
//! enforcement lives here and in the engine below.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod queries;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::IdeaService;
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AppealSummary, AssignOwnerRequest, DashboardStats, DecideIdeaRequest, DecideIdeaResponse,
    FileAppealRequest, FileAppealResponse, IdeaSummary, IdeaUpdateResponse, LoginRequest,
    MemberInfo, RegisterRequest, ResolveAppealResponse, SecondIdeaResponse, StageCount,
    SubmitIdeaRequest, SubmitIdeaResponse, VoteOnAppealRequest, VoteOnAppealResponse,
};
