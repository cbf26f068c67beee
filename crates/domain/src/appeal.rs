// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appeal records and majority-vote tallying.

use crate::error::DomainError;
use crate::types::{AppealId, IdeaId, MemberId, MemberRef};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Number of votes required before an appeal may be resolved.
pub const RESOLUTION_QUORUM: usize = 2;

/// Lifecycle states of an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealStatus {
    /// Filed and awaiting votes.
    Pending,
    /// Actively being reviewed.
    UnderReview,
    /// The appeal succeeded; the contested decision was reversed.
    Upheld,
    /// The appeal failed; the contested decision stands.
    Denied,
}

impl AppealStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Upheld => "upheld",
            Self::Denied => "denied",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "upheld" => Ok(Self::Upheld),
            "denied" => Ok(Self::Denied),
            _ => Err(DomainError::InvalidAppealStatus(s.to_string())),
        }
    }

    /// Returns true once the appeal has been resolved either way.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Upheld | Self::Denied)
    }
}

impl FromStr for AppealStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reviewer's position on an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    /// Reverse the contested decision.
    Uphold,
    /// Let the contested decision stand.
    Deny,
}

impl VoteChoice {
    /// Returns the string representation of the choice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uphold => "uphold",
            Self::Deny => "deny",
        }
    }

    /// Parses a vote choice from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "uphold" => Ok(Self::Uphold),
            "deny" => Ok(Self::Deny),
            _ => Err(DomainError::InvalidVoteChoice(s.to_string())),
        }
    }
}

impl FromStr for VoteChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single vote on an appeal.
///
/// A voter appears at most once in an appeal's vote list; casting again
/// replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealVote {
    /// The voting member.
    pub voter: MemberRef,
    /// The vote cast.
    pub choice: VoteChoice,
    /// When the vote was cast (or last changed).
    #[serde(with = "time::serde::rfc3339")]
    pub cast_at: OffsetDateTime,
}

/// The counted votes on an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    /// Votes to uphold the appeal.
    pub uphold: usize,
    /// Votes to deny the appeal.
    pub deny: usize,
}

impl VoteTally {
    /// Computes the resolution outcome by simple majority.
    ///
    /// The comparison is strict: ties resolve to `Denied`. This tie-break is
    /// deliberate and load-bearing; changing it changes who wins split
    /// votes.
    #[must_use]
    pub const fn outcome(&self) -> AppealStatus {
        if self.uphold > self.deny {
            AppealStatus::Upheld
        } else {
            AppealStatus::Denied
        }
    }
}

/// A request to reverse a decision on an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
    /// Canonical identifier, assigned at creation.
    pub id: AppealId,
    /// The idea whose decision is contested. Non-owning reference; resolving
    /// an upheld appeal reaches across to mutate that idea.
    pub idea_id: IdeaId,
    /// Who filed the appeal.
    pub submitter: MemberRef,
    /// Why the submitter disagrees with the decision.
    pub reason: String,
    /// The outcome the submitter would like to see.
    pub preferred_outcome: String,
    /// Current status.
    pub status: AppealStatus,
    /// Votes cast so far; each voter appears at most once.
    pub votes: Vec<AppealVote>,
    /// Until when the appeal should be reviewed.
    #[serde(with = "time::serde::rfc3339")]
    pub review_deadline: OffsetDateTime,
    /// When the appeal was filed.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Appeal {
    /// Returns the vote the given member has cast, if any.
    #[must_use]
    pub fn vote_of(&self, member: MemberId) -> Option<&AppealVote> {
        self.votes.iter().find(|v| v.voter.id == member)
    }

    /// Counts the votes cast so far.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        let uphold = self
            .votes
            .iter()
            .filter(|v| v.choice == VoteChoice::Uphold)
            .count();
        let deny = self
            .votes
            .iter()
            .filter(|v| v.choice == VoteChoice::Deny)
            .count();
        VoteTally { uphold, deny }
    }
}
