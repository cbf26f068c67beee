// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Idea records and lifecycle transition rules.
//!
//! This module defines the idea status states and the closed table of valid
//! transitions. All transitions are member-initiated; the system never
//! advances status based on time alone. Deadlines (feedback, appeal) gate
//! operations but do not move records by themselves.

use crate::error::DomainError;
use crate::types::{IdeaId, MemberId, MemberRef};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Number of seconds required to advance a submitted idea to `Seconded`.
pub const SECONDS_TO_ADVANCE: usize = 2;

/// Lifecycle states of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Newly submitted, awaiting team feedback.
    Submitted,
    /// In its feedback window.
    Feedback,
    /// Endorsed by enough members; ready for a review meeting.
    Seconded,
    /// Being discussed at a review meeting.
    InReview,
    /// Approved and being implemented.
    InProgress,
    /// Implementation finished.
    Completed,
    /// Not moving forward.
    Declined,
    /// No longer active.
    Archived,
}

impl IdeaStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Feedback => "feedback",
            Self::Seconded => "seconded",
            Self::InReview => "in_review",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Declined => "declined",
            Self::Archived => "archived",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "feedback" => Ok(Self::Feedback),
            "seconded" => Ok(Self::Seconded),
            "in_review" => Ok(Self::InReview),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "declined" => Ok(Self::Declined),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidIdeaStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no outgoing transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns true for statuses grouped into the archive view: the idea is
    /// no longer moving through the workflow.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Declined | Self::Archived)
    }

    /// Returns true if the idea may still collect seconds.
    ///
    /// Seconding is open only before the idea advances; once it reaches
    /// `Seconded` the endorsement list is frozen.
    #[must_use]
    pub const fn accepts_seconds(&self) -> bool {
        matches!(self, Self::Submitted | Self::Feedback)
    }

    /// Returns true if a decision may be recorded in this status.
    #[must_use]
    pub const fn accepts_decision(&self) -> bool {
        matches!(self, Self::Seconded | Self::InReview)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "archived ideas cannot change state".to_string(),
            });
        }

        // Closed transition table; anything not listed is rejected.
        let valid = match self {
            Self::Submitted => matches!(new_status, Self::Feedback | Self::Seconded),
            Self::Feedback => matches!(new_status, Self::Seconded),
            Self::Seconded => {
                matches!(new_status, Self::InReview | Self::InProgress | Self::Declined)
            }
            Self::InReview => matches!(new_status, Self::InProgress | Self::Declined),
            // Seconded is reachable again through appeal reversal.
            Self::InProgress => matches!(new_status, Self::Completed | Self::Seconded),
            Self::Declined => matches!(new_status, Self::Seconded | Self::Archived),
            Self::Completed => matches!(new_status, Self::Archived),
            Self::Archived => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by the idea lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for IdeaStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of decision recorded against an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// The idea moves to implementation.
    Approved,
    /// The idea does not move forward.
    Declined,
    /// The idea needs rework before another review.
    NeedsRevision,
    /// The decision is postponed.
    Deferred,
}

impl DecisionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::NeedsRevision => "needs_revision",
            Self::Deferred => "deferred",
        }
    }

    /// Parses a decision kind from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            "needs_revision" => Ok(Self::NeedsRevision),
            "deferred" => Ok(Self::Deferred),
            _ => Err(DomainError::InvalidDecisionKind(s.to_string())),
        }
    }

    /// The status an idea lands in when this decision is recorded.
    ///
    /// Only approval advances the idea; every other kind declines it.
    #[must_use]
    pub const fn outcome_status(&self) -> IdeaStatus {
        match self {
            Self::Approved => IdeaStatus::InProgress,
            Self::Declined | Self::NeedsRevision | Self::Deferred => IdeaStatus::Declined,
        }
    }
}

impl FromStr for DecisionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decision recorded against an idea by an authorized role.
///
/// At most one decision exists at a time; an upheld appeal clears it and the
/// appeal record keeps the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The decision kind.
    pub kind: DecisionKind,
    /// The rationale given for the decision.
    pub rationale: String,
    /// Who decided.
    pub decided_by: MemberRef,
    /// When the decision was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub decided_at: OffsetDateTime,
    /// Until when the decision may be appealed.
    #[serde(with = "time::serde::rfc3339")]
    pub appeal_deadline: OffsetDateTime,
}

/// A member's endorsement of a submitted idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Second {
    /// The endorsing member.
    pub voter: MemberRef,
    /// When the endorsement was given.
    #[serde(with = "time::serde::rfc3339")]
    pub seconded_at: OffsetDateTime,
}

/// A comment on an idea. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The comment author.
    pub author: MemberRef,
    /// The comment text.
    pub text: String,
    /// When the comment was posted.
    #[serde(with = "time::serde::rfc3339")]
    pub posted_at: OffsetDateTime,
}

/// A progress check-in logged against an idea under implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Who logged the check-in.
    pub author: MemberRef,
    /// The update note.
    pub note: String,
    /// Progress towards completion, 0 to 100.
    pub progress: u8,
    /// When the check-in was logged.
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// The content a member supplies when submitting an idea.
///
/// Title, description, and the why-it-matters rationale are required; the
/// remaining fields are optional context for reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDraft {
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

/// An idea moving through the review workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Canonical identifier, assigned at creation.
    pub id: IdeaId,
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
    /// Who submitted the idea.
    pub submitter: MemberRef,
    /// Current lifecycle status.
    pub status: IdeaStatus,
    /// Until when the team is asked for feedback.
    #[serde(with = "time::serde::rfc3339")]
    pub feedback_deadline: OffsetDateTime,
    /// Endorsements; each voter appears at most once.
    pub seconds: Vec<Second>,
    /// Append-only comment thread.
    pub comments: Vec<Comment>,
    /// The recorded decision, if any.
    pub decision: Option<Decision>,
    /// The member responsible for implementation.
    pub owner: Option<MemberRef>,
    /// Free-text implementation plan.
    pub action_plan: Option<String>,
    /// Progress check-ins.
    pub check_ins: Vec<CheckIn>,
    /// When the idea was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the idea was last mutated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// When the idea was completed. Set once.
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl Idea {
    /// Creates a new idea from a draft with status `Submitted`.
    ///
    /// The feedback deadline is fixed at creation time plus the feedback
    /// window; all collections start empty.
    #[must_use]
    pub fn from_draft(
        id: IdeaId,
        draft: IdeaDraft,
        submitter: MemberRef,
        now: OffsetDateTime,
        feedback_deadline: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            why_it_matters: draft.why_it_matters,
            who_needed: draft.who_needed,
            resources: draft.resources,
            timeline: draft.timeline,
            risks: draft.risks,
            mission_alignment: draft.mission_alignment,
            submitter,
            status: IdeaStatus::Submitted,
            feedback_deadline,
            seconds: Vec::new(),
            comments: Vec::new(),
            decision: None,
            owner: None,
            action_plan: None,
            check_ins: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Returns true if the given member has already seconded this idea.
    #[must_use]
    pub fn has_seconded(&self, member: MemberId) -> bool {
        self.seconds.iter().any(|s| s.voter.id == member)
    }

    /// Returns true if the given member owns this idea's implementation.
    #[must_use]
    pub fn is_owned_by(&self, member: MemberId) -> bool {
        self.owner.as_ref().is_some_and(|o| o.id == member)
    }

    /// Returns true if the idea carries a decision whose appeal window is
    /// still open at `now`.
    #[must_use]
    pub fn appeal_window_open(&self, now: OffsetDateTime) -> bool {
        self.decision
            .as_ref()
            .is_some_and(|d| now < d.appeal_deadline)
    }
}
