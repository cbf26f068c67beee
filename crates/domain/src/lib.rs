// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod appeal;
mod error;
mod idea;
mod types;
mod validation;

pub use appeal::{
    Appeal, AppealStatus, AppealVote, RESOLUTION_QUORUM, VoteChoice, VoteTally,
};
pub use error::DomainError;
pub use idea::{
    CheckIn, Comment, Decision, DecisionKind, Idea, IdeaDraft, IdeaStatus, SECONDS_TO_ADVANCE,
    Second,
};
pub use types::{AppealId, IdeaId, MemberId, MemberRecord, MemberRef, Role};
pub use validation::{
    validate_email, validate_idea_draft, validate_progress, validate_required_text,
};
