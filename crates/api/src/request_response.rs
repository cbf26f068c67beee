// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the service boundary.
//!
//! Requests carry enum-valued fields (role, decision kind, vote choice) as
//! strings and the handlers parse them, so a bad value surfaces as an
//! `InvalidInput` error instead of a deserialization failure. Responses
//! never expose credential hashes.

use idea_hub_domain::{
    Appeal, AppealId, Idea, IdeaDraft, IdeaId, MemberId, MemberRecord,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A member as exposed through the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// The member's canonical identifier.
    pub id: MemberId,
    /// The member's display name.
    pub name: String,
    /// The member's email.
    pub email: String,
    /// The member's role as its wire string.
    pub role: String,
}

impl MemberInfo {
    /// Builds the exposed view of a directory record.
    #[must_use]
    pub fn from_record(record: &MemberRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.as_str().to_string(),
        }
    }
}

/// Request to register a new member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The member's display name.
    pub name: String,
    /// The member's email.
    pub email: String,
    /// The chosen password.
    pub password: String,
    /// The password confirmation.
    pub confirmation: String,
    /// The member's role ("ed", "core_team", or "team_member").
    pub role: String,
}

/// Request to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The member's email.
    pub email: String,
    /// The member's password.
    pub password: String,
}

/// Request to submit a new idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitIdeaRequest {
    /// Brief, descriptive title.
    pub title: String,
    /// Detailed explanation of the idea.
    pub description: String,
    /// How the idea helps the organization's mission.
    pub why_it_matters: String,
    /// People needed to implement it.
    pub who_needed: Option<String>,
    /// Resources required (budget, tools).
    pub resources: Option<String>,
    /// Expected timeline.
    pub timeline: Option<String>,
    /// Known risks or concerns.
    pub risks: Option<String>,
    /// How the idea aligns with the core mission.
    pub mission_alignment: Option<String>,
}

impl SubmitIdeaRequest {
    /// Converts the request into a domain draft.
    #[must_use]
    pub fn into_draft(self) -> IdeaDraft {
        IdeaDraft {
            title: self.title,
            description: self.description,
            why_it_matters: self.why_it_matters,
            who_needed: self.who_needed,
            resources: self.resources,
            timeline: self.timeline,
            risks: self.risks,
            mission_alignment: self.mission_alignment,
        }
    }
}

/// Response to a successful idea submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitIdeaResponse {
    /// The new idea's identifier.
    pub idea_id: IdeaId,
    /// The new idea's status ("submitted").
    pub status: String,
    /// Until when the team is asked for feedback.
    #[serde(with = "time::serde::rfc3339")]
    pub feedback_deadline: OffsetDateTime,
}

/// Response to a seconding request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondIdeaResponse {
    /// The seconded idea.
    pub idea_id: IdeaId,
    /// Endorsements recorded so far.
    pub seconds: usize,
    /// The idea's status after the endorsement.
    pub status: String,
}

/// Request to record a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideIdeaRequest {
    /// The idea being decided.
    pub idea_id: IdeaId,
    /// The decision kind as its wire string.
    pub kind: String,
    /// The rationale for the decision.
    pub rationale: String,
}

/// Response to a recorded decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideIdeaResponse {
    /// The decided idea.
    pub idea_id: IdeaId,
    /// The idea's status after the decision.
    pub status: String,
    /// Until when the decision may be appealed.
    #[serde(with = "time::serde::rfc3339")]
    pub appeal_deadline: OffsetDateTime,
}

/// Request to assign an implementation owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignOwnerRequest {
    /// The idea being implemented.
    pub idea_id: IdeaId,
    /// The member taking ownership.
    pub owner_id: MemberId,
}

/// Response to a generic idea mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaUpdateResponse {
    /// The mutated idea.
    pub idea_id: IdeaId,
    /// The idea's status after the mutation.
    pub status: String,
}

/// Request to file an appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAppealRequest {
    /// The idea whose decision is contested.
    pub idea_id: IdeaId,
    /// Why the submitter disagrees with the decision.
    pub reason: String,
    /// The outcome the submitter would like to see.
    pub preferred_outcome: String,
}

/// Response to a filed appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAppealResponse {
    /// The new appeal's identifier.
    pub appeal_id: AppealId,
    /// Until when the appeal should be reviewed.
    #[serde(with = "time::serde::rfc3339")]
    pub review_deadline: OffsetDateTime,
}

/// Request to cast or change a vote on an appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOnAppealRequest {
    /// The appeal being voted on.
    pub appeal_id: AppealId,
    /// The vote choice as its wire string ("uphold" or "deny").
    pub choice: String,
}

/// Response to a cast vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOnAppealResponse {
    /// The appeal voted on.
    pub appeal_id: AppealId,
    /// Votes to uphold recorded so far.
    pub uphold_votes: usize,
    /// Votes to deny recorded so far.
    pub deny_votes: usize,
}

/// Response to a resolved appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveAppealResponse {
    /// The resolved appeal.
    pub appeal_id: AppealId,
    /// The resolution outcome ("upheld" or "denied").
    pub outcome: String,
    /// Votes to uphold at resolution time.
    pub uphold_votes: usize,
    /// Votes to deny at resolution time.
    pub deny_votes: usize,
    /// The contested idea's status after resolution.
    pub idea_status: String,
}

/// A compact idea view for list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaSummary {
    /// The idea's identifier.
    pub id: IdeaId,
    /// The idea's title.
    pub title: String,
    /// The idea's status as its wire string.
    pub status: String,
    /// The submitter's display name.
    pub submitter_name: String,
    /// Endorsements recorded so far.
    pub seconds: usize,
    /// Comments posted so far.
    pub comments: usize,
    /// When the idea was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl IdeaSummary {
    /// Builds the compact view of an idea.
    #[must_use]
    pub fn from_idea(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            title: idea.title.clone(),
            status: idea.status.as_str().to_string(),
            submitter_name: idea.submitter.name.clone(),
            seconds: idea.seconds.len(),
            comments: idea.comments.len(),
            created_at: idea.created_at,
        }
    }
}

/// A compact appeal view for the appeals screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealSummary {
    /// The appeal's identifier.
    pub id: AppealId,
    /// The contested idea.
    pub idea_id: IdeaId,
    /// The appellant's display name.
    pub submitter_name: String,
    /// The appeal's status as its wire string.
    pub status: String,
    /// Votes to uphold recorded so far.
    pub uphold_votes: usize,
    /// Votes to deny recorded so far.
    pub deny_votes: usize,
    /// Until when the appeal should be reviewed.
    #[serde(with = "time::serde::rfc3339")]
    pub review_deadline: OffsetDateTime,
}

impl AppealSummary {
    /// Builds the compact view of an appeal.
    #[must_use]
    pub fn from_appeal(appeal: &Appeal) -> Self {
        let tally = appeal.tally();
        Self {
            id: appeal.id,
            idea_id: appeal.idea_id,
            submitter_name: appeal.submitter.name.clone(),
            status: appeal.status.as_str().to_string(),
            uphold_votes: tally.uphold,
            deny_votes: tally.deny,
            review_deadline: appeal.review_deadline,
        }
    }
}

/// Idea totals for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All ideas ever submitted.
    pub total: usize,
    /// Ideas awaiting feedback.
    pub awaiting_feedback: usize,
    /// Ideas seconded and ready for review.
    pub seconded: usize,
    /// Ideas under implementation.
    pub in_progress: usize,
    /// Ideas completed.
    pub completed: usize,
}

/// A per-stage idea count for the pipeline view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCount {
    /// The stage as its wire string.
    pub status: String,
    /// How many ideas currently sit in the stage.
    pub count: usize,
}
