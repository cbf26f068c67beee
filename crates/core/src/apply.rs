// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use idea_hub_audit::{Action, Actor, AuditEvent, AuditScope, Cause, StateSnapshot};
use idea_hub_domain::{
    Appeal, AppealId, AppealStatus, AppealVote, CheckIn, Comment, Decision, DomainError, Idea,
    IdeaId, IdeaStatus, RESOLUTION_QUORUM, SECONDS_TO_ADVANCE, Second, VoteTally,
    validate_idea_draft, validate_progress, validate_required_text,
};
use time::OffsetDateTime;

/// How long the team is asked for feedback on a new idea.
pub const FEEDBACK_WINDOW: time::Duration = time::Duration::days(5);

/// How long a decision remains open to appeal.
pub const APPEAL_WINDOW: time::Duration = time::Duration::days(5);

/// How long reviewers have to resolve a filed appeal.
pub const REVIEW_WINDOW: time::Duration = time::Duration::days(7);

/// Locates an idea in the state by identifier.
fn find_idea(state: &State, idea_id: IdeaId) -> Result<usize, DomainError> {
    state
        .ideas
        .iter()
        .position(|i| i.id == idea_id)
        .ok_or(DomainError::IdeaNotFound(idea_id))
}

/// Locates an appeal in the state by identifier.
fn find_appeal(state: &State, appeal_id: AppealId) -> Result<usize, DomainError> {
    state
        .appeals
        .iter()
        .position(|a| a.id == appeal_id)
        .ok_or(DomainError::AppealNotFound(appeal_id))
}

/// Summarizes an idea for an audit snapshot.
fn idea_snapshot(idea: &Idea) -> StateSnapshot {
    StateSnapshot::new(format!(
        "idea:{} status={} seconds={} comments={} check_ins={}",
        idea.id,
        idea.status,
        idea.seconds.len(),
        idea.comments.len(),
        idea.check_ins.len()
    ))
}

/// Summarizes an appeal for an audit snapshot.
fn appeal_snapshot(appeal: &Appeal) -> StateSnapshot {
    StateSnapshot::new(format!(
        "appeal:{} status={} votes={}",
        appeal.id,
        appeal.status,
        appeal.votes.len()
    ))
}

/// Applies a command to the current state, producing a new state and audit
/// event.
///
/// The function is pure: the input state is never mutated, deadline
/// arithmetic uses the supplied `now`, and a failed command leaves no trace.
/// Every successful application produces exactly one audit event.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The current time, used for timestamps and deadline checks
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The targeted idea or appeal does not exist
/// - The command violates a lifecycle or validation rule
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitIdea { draft, submitter } => {
            validate_idea_draft(&draft)?;

            let idea_id: IdeaId = state.next_idea_id();
            let title: String = draft.title.clone();
            let idea: Idea = Idea::from_draft(
                idea_id,
                draft,
                submitter,
                now,
                now + FEEDBACK_WINDOW,
            );

            let before: StateSnapshot = state.to_snapshot();
            let mut new_state: State = state.clone();
            new_state.ideas.push(idea);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("SubmitIdea"),
                Some(format!("Submitted idea '{title}'")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: Some(idea_id),
                created_appeal: None,
            })
        }
        Command::SecondIdea { idea_id, voter } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            if !idea.status.accepts_seconds() {
                return Err(CoreError::DomainViolation(
                    DomainError::OperationNotAllowedInStatus {
                        operation: String::from("second"),
                        status: idea.status.as_str().to_string(),
                    },
                ));
            }

            let before: StateSnapshot = idea_snapshot(idea);

            // A repeated endorsement by the same member is deliberately a
            // no-op: the seconds list stays unchanged and only the audit
            // trail records the attempt.
            if idea.has_seconded(voter.id) {
                let action: Action = Action::new(
                    String::from("SecondIdea"),
                    Some(format!(
                        "Duplicate endorsement by member {} ignored",
                        voter.id
                    )),
                );
                let audit_event: AuditEvent = AuditEvent::new(
                    actor,
                    cause,
                    action,
                    before.clone(),
                    before,
                    AuditScope::Idea(idea_id),
                );
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    audit_event,
                    created_idea: None,
                    created_appeal: None,
                });
            }

            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.seconds.push(Second {
                    voter,
                    seconded_at: now,
                });
                // Two endorsements advance a submitted idea; the check is
                // one-directional and never revisited afterwards.
                if idea.seconds.len() >= SECONDS_TO_ADVANCE
                    && idea.status == IdeaStatus::Submitted
                {
                    idea.status.validate_transition(IdeaStatus::Seconded)?;
                    idea.status = IdeaStatus::Seconded;
                }
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(
                String::from("SecondIdea"),
                Some(format!(
                    "Endorsement {} of {} recorded",
                    new_state.ideas[idx].seconds.len(),
                    SECONDS_TO_ADVANCE
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::AddComment {
            idea_id,
            author,
            text,
        } => {
            let idx: usize = find_idea(state, idea_id)?;
            validate_required_text("comment", &text)?;

            let before: StateSnapshot = idea_snapshot(&state.ideas[idx]);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.comments.push(Comment {
                    author,
                    text,
                    posted_at: now,
                });
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(String::from("AddComment"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::BeginReview { idea_id } => {
            let idx: usize = find_idea(state, idea_id)?;
            state.ideas[idx]
                .status
                .validate_transition(IdeaStatus::InReview)?;

            let before: StateSnapshot = idea_snapshot(&state.ideas[idx]);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.status = IdeaStatus::InReview;
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(String::from("BeginReview"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::DecideIdea {
            idea_id,
            kind,
            rationale,
            decider,
        } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            if !idea.status.accepts_decision() {
                return Err(CoreError::DomainViolation(
                    DomainError::OperationNotAllowedInStatus {
                        operation: String::from("decide"),
                        status: idea.status.as_str().to_string(),
                    },
                ));
            }
            validate_required_text("rationale", &rationale)?;

            let outcome: IdeaStatus = kind.outcome_status();
            idea.status.validate_transition(outcome)?;

            let before: StateSnapshot = idea_snapshot(idea);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.decision = Some(Decision {
                    kind,
                    rationale,
                    decided_by: decider,
                    decided_at: now,
                    appeal_deadline: now + APPEAL_WINDOW,
                });
                idea.status = outcome;
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(
                String::from("DecideIdea"),
                Some(format!("Decision '{kind}' recorded")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::AssignOwner { idea_id, owner } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            // Ownership only means something once implementation has begun.
            if idea.status != IdeaStatus::InProgress {
                return Err(CoreError::DomainViolation(
                    DomainError::OperationNotAllowedInStatus {
                        operation: String::from("assign_owner"),
                        status: idea.status.as_str().to_string(),
                    },
                ));
            }

            let owner_name: String = owner.name.clone();
            let before: StateSnapshot = idea_snapshot(idea);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.owner = Some(owner);
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(
                String::from("AssignOwner"),
                Some(format!("Assigned to {owner_name}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::UpdateActionPlan {
            idea_id,
            action_plan,
        } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            if idea.status != IdeaStatus::InProgress {
                return Err(CoreError::DomainViolation(
                    DomainError::OperationNotAllowedInStatus {
                        operation: String::from("update_action_plan"),
                        status: idea.status.as_str().to_string(),
                    },
                ));
            }
            validate_required_text("action_plan", &action_plan)?;

            let before: StateSnapshot = idea_snapshot(idea);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.action_plan = Some(action_plan);
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(String::from("UpdateActionPlan"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::AddCheckIn {
            idea_id,
            author,
            note,
            progress,
        } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            if idea.status != IdeaStatus::InProgress {
                return Err(CoreError::DomainViolation(
                    DomainError::OperationNotAllowedInStatus {
                        operation: String::from("add_check_in"),
                        status: idea.status.as_str().to_string(),
                    },
                ));
            }
            validate_required_text("note", &note)?;
            validate_progress(progress)?;

            let before: StateSnapshot = idea_snapshot(idea);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.check_ins.push(CheckIn {
                    author,
                    note,
                    progress,
                    logged_at: now,
                });
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(
                String::from("AddCheckIn"),
                Some(format!("Progress {progress}%")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::CompleteIdea { idea_id } => {
            let idx: usize = find_idea(state, idea_id)?;
            state.ideas[idx]
                .status
                .validate_transition(IdeaStatus::Completed)?;

            let before: StateSnapshot = idea_snapshot(&state.ideas[idx]);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.status = IdeaStatus::Completed;
                idea.completed_at = Some(now);
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(String::from("CompleteIdea"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::ArchiveIdea { idea_id } => {
            let idx: usize = find_idea(state, idea_id)?;
            state.ideas[idx]
                .status
                .validate_transition(IdeaStatus::Archived)?;

            let before: StateSnapshot = idea_snapshot(&state.ideas[idx]);
            let mut new_state: State = state.clone();
            {
                let idea: &mut Idea = &mut new_state.ideas[idx];
                idea.status = IdeaStatus::Archived;
                idea.updated_at = now;
            }
            let after: StateSnapshot = idea_snapshot(&new_state.ideas[idx]);

            let action: Action = Action::new(String::from("ArchiveIdea"), None);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Idea(idea_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::FileAppeal {
            idea_id,
            submitter,
            reason,
            preferred_outcome,
        } => {
            let idx: usize = find_idea(state, idea_id)?;
            let idea: &Idea = &state.ideas[idx];

            let Some(decision) = idea.decision.as_ref() else {
                return Err(CoreError::DomainViolation(DomainError::NoDecisionToAppeal(
                    idea_id,
                )));
            };
            if now >= decision.appeal_deadline {
                return Err(CoreError::DomainViolation(
                    DomainError::AppealWindowClosed {
                        idea_id,
                        deadline: decision.appeal_deadline,
                    },
                ));
            }
            if state
                .appeals
                .iter()
                .any(|a| a.idea_id == idea_id && !a.status.is_resolved())
            {
                return Err(CoreError::DomainViolation(
                    DomainError::PendingAppealExists { idea_id },
                ));
            }
            validate_required_text("reason", &reason)?;
            validate_required_text("preferred_outcome", &preferred_outcome)?;

            let appeal_id: AppealId = state.next_appeal_id();
            let appeal: Appeal = Appeal {
                id: appeal_id,
                idea_id,
                submitter,
                reason,
                preferred_outcome,
                status: AppealStatus::Pending,
                votes: Vec::new(),
                review_deadline: now + REVIEW_WINDOW,
                created_at: now,
            };

            let before: StateSnapshot = state.to_snapshot();
            let mut new_state: State = state.clone();
            new_state.appeals.push(appeal);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("FileAppeal"),
                Some(format!("Appeal filed against idea {idea_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Appeal(appeal_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: Some(appeal_id),
            })
        }
        Command::VoteOnAppeal {
            appeal_id,
            voter,
            choice,
        } => {
            let idx: usize = find_appeal(state, appeal_id)?;
            let appeal: &Appeal = &state.appeals[idx];

            if appeal.status.is_resolved() {
                return Err(CoreError::DomainViolation(
                    DomainError::AppealAlreadyResolved {
                        appeal_id,
                        status: appeal.status.as_str().to_string(),
                    },
                ));
            }

            let before: StateSnapshot = appeal_snapshot(appeal);
            let mut new_state: State = state.clone();
            {
                let appeal: &mut Appeal = &mut new_state.appeals[idx];
                let vote: AppealVote = AppealVote {
                    voter,
                    choice,
                    cast_at: now,
                };
                // Upsert: a member's later vote replaces their earlier one.
                match appeal
                    .votes
                    .iter()
                    .position(|v| v.voter.id == vote.voter.id)
                {
                    Some(existing) => appeal.votes[existing] = vote,
                    None => appeal.votes.push(vote),
                }
            }
            let after: StateSnapshot = appeal_snapshot(&new_state.appeals[idx]);

            let action: Action = Action::new(
                String::from("VoteOnAppeal"),
                Some(format!("Vote '{choice}' cast")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Appeal(appeal_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
        Command::ResolveAppeal { appeal_id } => {
            let idx: usize = find_appeal(state, appeal_id)?;
            let appeal: &Appeal = &state.appeals[idx];

            if appeal.status.is_resolved() {
                return Err(CoreError::DomainViolation(
                    DomainError::AppealAlreadyResolved {
                        appeal_id,
                        status: appeal.status.as_str().to_string(),
                    },
                ));
            }
            if appeal.votes.len() < RESOLUTION_QUORUM {
                return Err(CoreError::DomainViolation(DomainError::QuorumNotReached {
                    appeal_id,
                    votes: appeal.votes.len(),
                    required: RESOLUTION_QUORUM,
                }));
            }

            let tally: VoteTally = appeal.tally();
            let outcome: AppealStatus = tally.outcome();
            let contested: IdeaId = appeal.idea_id;

            let before: StateSnapshot = appeal_snapshot(appeal);
            let mut new_state: State = state.clone();
            new_state.appeals[idx].status = outcome;

            // An upheld appeal reverses the contested decision: the idea
            // returns to seconded and the decision record is cleared. The
            // appeal itself keeps the history.
            if outcome == AppealStatus::Upheld {
                let idea_idx: usize = find_idea(state, contested)?;
                new_state.ideas[idea_idx]
                    .status
                    .validate_transition(IdeaStatus::Seconded)?;
                let idea: &mut Idea = &mut new_state.ideas[idea_idx];
                idea.status = IdeaStatus::Seconded;
                idea.decision = None;
                idea.updated_at = now;
            }

            let after: StateSnapshot = appeal_snapshot(&new_state.appeals[idx]);

            let action: Action = Action::new(
                String::from("ResolveAppeal"),
                Some(format!(
                    "Resolved '{outcome}' ({} uphold, {} deny)",
                    tally.uphold, tally.deny
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                AuditScope::Appeal(appeal_id),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
                created_idea: None,
                created_appeal: None,
            })
        }
    }
}
