// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for individual command application.

use crate::{Command, CoreError, FEEDBACK_WINDOW, State, apply};
use idea_hub_domain::{DecisionKind, DomainError, IdeaId, IdeaStatus, MemberId};
use time::Duration;

use super::helpers::{
    NOW, apply_ok, create_test_actor, create_test_cause, draft, member, seconded_idea, submit_idea,
};

#[test]
fn test_submit_creates_idea_with_fresh_collections() {
    let (state, id) = submit_idea(&State::new(), "Add recycling bins", member(1));

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.status, IdeaStatus::Submitted);
    assert_eq!(idea.feedback_deadline, NOW + FEEDBACK_WINDOW);
    assert!(idea.seconds.is_empty());
    assert!(idea.comments.is_empty());
    assert!(idea.check_ins.is_empty());
    assert!(idea.decision.is_none());
    assert!(idea.owner.is_none());
    assert!(idea.completed_at.is_none());
    assert_eq!(idea.created_at, NOW);
    assert_eq!(idea.updated_at, NOW);
}

#[test]
fn test_submit_rejects_blank_title() {
    let mut d = draft("x");
    d.title = String::from("  ");

    let result = apply(
        &State::new(),
        Command::SubmitIdea {
            draft: d,
            submitter: member(1),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::EmptyField("title"))
    );
}

#[test]
fn test_submit_assigns_sequential_identifiers() {
    let (state, first) = submit_idea(&State::new(), "First", member(1));
    let (state, second) = submit_idea(&state, "Second", member(1));

    assert_ne!(first, second);
    assert_eq!(state.ideas.len(), 2);
}

#[test]
fn test_single_second_does_not_advance() {
    let (state, id) = submit_idea(&State::new(), "One endorsement", member(1));

    let state = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    )
    .new_state;

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.status, IdeaStatus::Submitted);
    assert_eq!(idea.seconds.len(), 1);
}

#[test]
fn test_two_distinct_seconds_advance_to_seconded() {
    let (state, id) = seconded_idea("Two endorsements");

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.status, IdeaStatus::Seconded);
    assert_eq!(idea.seconds.len(), 2);
}

#[test]
fn test_duplicate_second_is_idempotent() {
    let (state, id) = submit_idea(&State::new(), "Repeat endorsement", member(1));

    let state = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    )
    .new_state;
    let state = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    )
    .new_state;

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.seconds.len(), 1);
    assert_eq!(idea.status, IdeaStatus::Submitted);
}

#[test]
fn test_second_rejected_once_idea_advanced() {
    let (state, id) = seconded_idea("Frozen endorsements");

    let result = apply(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(4),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::OperationNotAllowedInStatus { .. })
    ));
}

#[test]
fn test_second_unknown_idea_is_distinguished_not_found() {
    let missing = IdeaId::new(99);

    let result = apply(
        &State::new(),
        Command::SecondIdea {
            idea_id: missing,
            voter: member(2),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::IdeaNotFound(missing))
    );
}

#[test]
fn test_comment_appends_and_refreshes_updated_at() {
    let (state, id) = submit_idea(&State::new(), "Commented", member(1));
    let later = NOW + Duration::hours(1);

    let state = apply_ok(
        &state,
        Command::AddComment {
            idea_id: id,
            author: member(2),
            text: String::from("Love this"),
        },
        later,
    )
    .new_state;

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.comments.len(), 1);
    assert_eq!(idea.comments[0].text, "Love this");
    assert_eq!(idea.updated_at, later);
}

#[test]
fn test_empty_comment_rejected() {
    let (state, id) = submit_idea(&State::new(), "Commented", member(1));

    let result = apply(
        &state,
        Command::AddComment {
            idea_id: id,
            author: member(2),
            text: String::from("   "),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::EmptyField("comment"))
    );
}

#[test]
fn test_approval_moves_idea_to_in_progress() {
    let (state, id) = seconded_idea("Approved idea");
    let decided_at = NOW + Duration::days(1);

    let state = apply_ok(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::from("Aligns with sustainability goals"),
            decider: member(4),
        },
        decided_at,
    )
    .new_state;

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.status, IdeaStatus::InProgress);
    let decision = idea.decision.as_ref().unwrap();
    assert_eq!(decision.kind, DecisionKind::Approved);
    assert_eq!(decision.decided_at, decided_at);
    // The appeal window is exactly five 24-hour days.
    assert_eq!(decision.appeal_deadline, decided_at + Duration::hours(5 * 24));
}

#[test]
fn test_every_non_approval_kind_declines() {
    for kind in [
        DecisionKind::Declined,
        DecisionKind::NeedsRevision,
        DecisionKind::Deferred,
    ] {
        let (state, id) = seconded_idea("Not approved");
        let state = apply_ok(
            &state,
            Command::DecideIdea {
                idea_id: id,
                kind,
                rationale: String::from("Budget constraints"),
                decider: member(4),
            },
            NOW,
        )
        .new_state;

        let idea = state.idea(id).unwrap();
        assert_eq!(idea.status, IdeaStatus::Declined);
        assert_eq!(idea.decision.as_ref().unwrap().kind, kind);
    }
}

#[test]
fn test_decide_requires_review_ready_status() {
    let (state, id) = submit_idea(&State::new(), "Too early", member(1));

    let result = apply(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::from("Jumping the queue"),
            decider: member(4),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::OperationNotAllowedInStatus { .. })
    ));
}

#[test]
fn test_decide_requires_rationale() {
    let (state, id) = seconded_idea("No rationale");

    let result = apply(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::new(),
            decider: member(4),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::EmptyField("rationale"))
    );
}

#[test]
fn test_decide_allowed_from_in_review() {
    let (state, id) = seconded_idea("Reviewed first");
    let state = apply_ok(&state, Command::BeginReview { idea_id: id }, NOW).new_state;
    assert_eq!(state.idea(id).unwrap().status, IdeaStatus::InReview);

    let state = apply_ok(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::from("Discussed at the meeting"),
            decider: member(4),
        },
        NOW,
    )
    .new_state;

    assert_eq!(state.idea(id).unwrap().status, IdeaStatus::InProgress);
}

#[test]
fn test_assign_owner_requires_in_progress() {
    let (state, id) = seconded_idea("Unapproved ownership");

    let result = apply(
        &state,
        Command::AssignOwner {
            idea_id: id,
            owner: member(2),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::OperationNotAllowedInStatus { .. })
    ));
}

#[test]
fn test_check_in_progress_out_of_range_rejected() {
    let (state, id) = seconded_idea("Progress bounds");
    let state = apply_ok(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::from("Go"),
            decider: member(4),
        },
        NOW,
    )
    .new_state;

    let result = apply(
        &state,
        Command::AddCheckIn {
            idea_id: id,
            author: member(2),
            note: String::from("Overachieving"),
            progress: 101,
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidProgress { progress: 101 })
    );
}

#[test]
fn test_complete_sets_completion_timestamp() {
    let (state, id) = seconded_idea("Finished");
    let state = apply_ok(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Approved,
            rationale: String::from("Go"),
            decider: member(4),
        },
        NOW,
    )
    .new_state;
    let completed_at = NOW + Duration::days(10);

    let state = apply_ok(&state, Command::CompleteIdea { idea_id: id }, completed_at).new_state;

    let idea = state.idea(id).unwrap();
    assert_eq!(idea.status, IdeaStatus::Completed);
    assert_eq!(idea.completed_at, Some(completed_at));
}

#[test]
fn test_complete_requires_in_progress() {
    let (state, id) = seconded_idea("Not started");

    let result = apply(
        &state,
        Command::CompleteIdea { idea_id: id },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_archive_only_from_closed_outcomes() {
    let (state, id) = seconded_idea("Archival");
    let state = apply_ok(
        &state,
        Command::DecideIdea {
            idea_id: id,
            kind: DecisionKind::Declined,
            rationale: String::from("Budget constraints"),
            decider: member(4),
        },
        NOW,
    )
    .new_state;

    let state = apply_ok(&state, Command::ArchiveIdea { idea_id: id }, NOW).new_state;
    assert_eq!(state.idea(id).unwrap().status, IdeaStatus::Archived);

    // Archived is terminal.
    let result = apply(
        &state,
        Command::ArchiveIdea { idea_id: id },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );
    assert!(result.is_err());
}

#[test]
fn test_every_mutation_produces_an_audit_event() {
    let (state, id) = submit_idea(&State::new(), "Audited", member(1));

    let result = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    );

    assert_eq!(result.audit_event.action.name, "SecondIdea");
    assert!(result.audit_event.before != result.audit_event.after);
}

#[test]
fn test_duplicate_second_audit_event_records_no_change() {
    let (state, id) = submit_idea(&State::new(), "Audited duplicate", member(1));
    let state = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    )
    .new_state;

    let result = apply_ok(
        &state,
        Command::SecondIdea {
            idea_id: id,
            voter: member(2),
        },
        NOW,
    );

    assert_eq!(result.audit_event.before, result.audit_event.after);
    assert_eq!(result.new_state, state);
    assert_eq!(state.idea(id).unwrap().seconds[0].voter.id, MemberId::new(2));
}
