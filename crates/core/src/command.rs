// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use idea_hub_domain::{AppealId, DecisionKind, IdeaDraft, IdeaId, MemberRef, VoteChoice};

/// A command represents member or system intent as data only.
///
/// Commands are the only way to request state changes. Role-based
/// authorization happens before a command is built; the engine enforces the
/// lifecycle rules themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new idea.
    SubmitIdea {
        /// The submitted content.
        draft: IdeaDraft,
        /// Who is submitting.
        submitter: MemberRef,
    },
    /// Endorse a submitted idea.
    SecondIdea {
        /// The idea to endorse.
        idea_id: IdeaId,
        /// The endorsing member.
        voter: MemberRef,
    },
    /// Add a comment to an idea.
    AddComment {
        /// The idea to comment on.
        idea_id: IdeaId,
        /// The comment author.
        author: MemberRef,
        /// The comment text.
        text: String,
    },
    /// Take a seconded idea into its review meeting.
    BeginReview {
        /// The idea under review.
        idea_id: IdeaId,
    },
    /// Record a decision on a review-ready idea.
    DecideIdea {
        /// The idea being decided.
        idea_id: IdeaId,
        /// The decision kind.
        kind: DecisionKind,
        /// The rationale for the decision.
        rationale: String,
        /// Who is deciding.
        decider: MemberRef,
    },
    /// Assign an implementation owner to an approved idea.
    AssignOwner {
        /// The idea being implemented.
        idea_id: IdeaId,
        /// The member taking ownership.
        owner: MemberRef,
    },
    /// Replace the implementation plan of an approved idea.
    UpdateActionPlan {
        /// The idea being implemented.
        idea_id: IdeaId,
        /// The new plan text.
        action_plan: String,
    },
    /// Log a progress check-in against an approved idea.
    AddCheckIn {
        /// The idea being implemented.
        idea_id: IdeaId,
        /// Who is checking in.
        author: MemberRef,
        /// The update note.
        note: String,
        /// Progress towards completion, 0 to 100.
        progress: u8,
    },
    /// Mark an approved idea as completed.
    CompleteIdea {
        /// The idea to complete.
        idea_id: IdeaId,
    },
    /// Archive a completed or declined idea.
    ArchiveIdea {
        /// The idea to archive.
        idea_id: IdeaId,
    },
    /// File an appeal against an idea's decision.
    FileAppeal {
        /// The idea whose decision is contested.
        idea_id: IdeaId,
        /// Who is filing the appeal.
        submitter: MemberRef,
        /// Why the submitter disagrees.
        reason: String,
        /// The outcome the submitter would like to see.
        preferred_outcome: String,
    },
    /// Cast or change a vote on a pending appeal.
    VoteOnAppeal {
        /// The appeal being voted on.
        appeal_id: AppealId,
        /// The voting member.
        voter: MemberRef,
        /// The vote.
        choice: VoteChoice,
    },
    /// Resolve a pending appeal by majority vote.
    ResolveAppeal {
        /// The appeal to resolve.
        appeal_id: AppealId,
    },
}
