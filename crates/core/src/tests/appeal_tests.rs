// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the appeals sub-workflow: filing, voting, and resolution.

use crate::{APPEAL_WINDOW, Command, CoreError, REVIEW_WINDOW, State, apply};
use idea_hub_domain::{
    AppealId, AppealStatus, DecisionKind, DomainError, IdeaId, IdeaStatus, MemberId, VoteChoice,
};
use time::{Duration, OffsetDateTime};

use super::helpers::{NOW, apply_ok, create_test_actor, create_test_cause, member, seconded_idea};

/// Builds a state holding one declined idea, decided at `NOW`.
fn declined_idea() -> (State, IdeaId) {
    let (state, id) = seconded_idea("Contested");
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
    (state, id)
}

/// Files an appeal against the given idea one day after the decision.
fn filed_appeal(state: &State, idea_id: IdeaId) -> (State, AppealId) {
    let result = apply_ok(
        state,
        Command::FileAppeal {
            idea_id,
            submitter: member(1),
            reason: String::from("The rationale ignored the grant we secured"),
            preferred_outcome: String::from("Approve the idea"),
        },
        NOW + Duration::days(1),
    );
    let id = result.created_appeal.expect("filing must assign an id");
    (result.new_state, id)
}

fn vote(state: &State, appeal_id: AppealId, voter: i64, choice: VoteChoice) -> State {
    apply_ok(
        state,
        Command::VoteOnAppeal {
            appeal_id,
            voter: member(voter),
            choice,
        },
        NOW + Duration::days(2),
    )
    .new_state
}

fn resolve(state: &State, appeal_id: AppealId, now: OffsetDateTime) -> State {
    apply_ok(state, Command::ResolveAppeal { appeal_id }, now).new_state
}

#[test]
fn test_file_appeal_sets_pending_with_review_deadline() {
    let (state, idea_id) = declined_idea();
    let filed_at = NOW + Duration::days(1);

    let (state, appeal_id) = filed_appeal(&state, idea_id);

    let appeal = state.appeal(appeal_id).unwrap();
    assert_eq!(appeal.status, AppealStatus::Pending);
    assert_eq!(appeal.idea_id, idea_id);
    assert!(appeal.votes.is_empty());
    assert_eq!(appeal.review_deadline, filed_at + REVIEW_WINDOW);
}

#[test]
fn test_appeal_requires_a_decision() {
    let (state, id) = seconded_idea("Undecided");

    let result = apply(
        &state,
        Command::FileAppeal {
            idea_id: id,
            submitter: member(1),
            reason: String::from("Premature"),
            preferred_outcome: String::from("n/a"),
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NoDecisionToAppeal(id))
    );
}

#[test]
fn test_appeal_window_boundary() {
    let (state, id) = declined_idea();

    // One second before the deadline the window is still open.
    let just_inside = NOW + APPEAL_WINDOW - Duration::seconds(1);
    let result = apply(
        &state,
        Command::FileAppeal {
            idea_id: id,
            submitter: member(1),
            reason: String::from("Still in time"),
            preferred_outcome: String::from("Approve"),
        },
        create_test_actor(),
        create_test_cause(),
        just_inside,
    );
    assert!(result.is_ok());

    // At exactly decision time plus five days the window has closed.
    let at_deadline = NOW + APPEAL_WINDOW;
    let result = apply(
        &state,
        Command::FileAppeal {
            idea_id: id,
            submitter: member(1),
            reason: String::from("Too late"),
            preferred_outcome: String::from("Approve"),
        },
        create_test_actor(),
        create_test_cause(),
        at_deadline,
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::AppealWindowClosed { .. })
    ));
}

#[test]
fn test_second_pending_appeal_rejected() {
    let (state, idea_id) = declined_idea();
    let (state, _) = filed_appeal(&state, idea_id);

    let result = apply(
        &state,
        Command::FileAppeal {
            idea_id,
            submitter: member(2),
            reason: String::from("Me too"),
            preferred_outcome: String::from("Approve"),
        },
        create_test_actor(),
        create_test_cause(),
        NOW + Duration::days(1),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::PendingAppealExists { idea_id })
    );
}

#[test]
fn test_vote_upsert_replaces_earlier_vote() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);

    let state = vote(&state, appeal_id, 5, VoteChoice::Uphold);
    let state = vote(&state, appeal_id, 5, VoteChoice::Deny);

    let appeal = state.appeal(appeal_id).unwrap();
    assert_eq!(appeal.votes.len(), 1);
    assert_eq!(appeal.votes[0].voter.id, MemberId::new(5));
    assert_eq!(appeal.votes[0].choice, VoteChoice::Deny);
}

#[test]
fn test_resolve_requires_quorum() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Uphold);

    let result = apply(
        &state,
        Command::ResolveAppeal { appeal_id },
        create_test_actor(),
        create_test_cause(),
        NOW + Duration::days(3),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::QuorumNotReached {
            appeal_id,
            votes: 1,
            required: 2,
        })
    );
}

#[test]
fn test_upheld_appeal_reverses_the_decision() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Uphold);
    let state = vote(&state, appeal_id, 6, VoteChoice::Uphold);

    let state = resolve(&state, appeal_id, NOW + Duration::days(3));

    assert_eq!(state.appeal(appeal_id).unwrap().status, AppealStatus::Upheld);
    let idea = state.idea(idea_id).unwrap();
    assert_eq!(idea.status, IdeaStatus::Seconded);
    assert!(idea.decision.is_none());
}

#[test]
fn test_denied_appeal_leaves_the_idea_untouched() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Deny);
    let state = vote(&state, appeal_id, 6, VoteChoice::Uphold);
    let before = state.idea(idea_id).unwrap().clone();

    let state = resolve(&state, appeal_id, NOW + Duration::days(3));

    assert_eq!(state.appeal(appeal_id).unwrap().status, AppealStatus::Denied);
    let idea = state.idea(idea_id).unwrap();
    assert_eq!(idea.status, before.status);
    assert_eq!(idea.decision, before.decision);
}

#[test]
fn test_tied_vote_resolves_to_denied() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Uphold);
    let state = vote(&state, appeal_id, 6, VoteChoice::Deny);

    let state = resolve(&state, appeal_id, NOW + Duration::days(3));

    assert_eq!(state.appeal(appeal_id).unwrap().status, AppealStatus::Denied);
    assert_eq!(state.idea(idea_id).unwrap().status, IdeaStatus::Declined);
}

#[test]
fn test_vote_on_resolved_appeal_rejected() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Deny);
    let state = vote(&state, appeal_id, 6, VoteChoice::Deny);
    let state = resolve(&state, appeal_id, NOW + Duration::days(3));

    let result = apply(
        &state,
        Command::VoteOnAppeal {
            appeal_id,
            voter: member(7),
            choice: VoteChoice::Uphold,
        },
        create_test_actor(),
        create_test_cause(),
        NOW + Duration::days(4),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::AppealAlreadyResolved { .. })
    ));
}

#[test]
fn test_resolve_twice_rejected() {
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Deny);
    let state = vote(&state, appeal_id, 6, VoteChoice::Deny);
    let state = resolve(&state, appeal_id, NOW + Duration::days(3));

    let result = apply(
        &state,
        Command::ResolveAppeal { appeal_id },
        create_test_actor(),
        create_test_cause(),
        NOW + Duration::days(4),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::AppealAlreadyResolved { .. })
    ));
}

#[test]
fn test_unknown_appeal_is_distinguished_not_found() {
    let missing = AppealId::new(42);

    let result = apply(
        &State::new(),
        Command::ResolveAppeal { appeal_id: missing },
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::AppealNotFound(missing))
    );
}

#[test]
fn test_new_appeal_allowed_after_resolution() {
    // After a denied appeal the pending check clears; a fresh appeal within
    // the window is accepted again.
    let (state, idea_id) = declined_idea();
    let (state, appeal_id) = filed_appeal(&state, idea_id);
    let state = vote(&state, appeal_id, 5, VoteChoice::Deny);
    let state = vote(&state, appeal_id, 6, VoteChoice::Deny);
    let state = resolve(&state, appeal_id, NOW + Duration::days(2));

    let result = apply(
        &state,
        Command::FileAppeal {
            idea_id,
            submitter: member(2),
            reason: String::from("New evidence"),
            preferred_outcome: String::from("Approve"),
        },
        create_test_actor(),
        create_test_cause(),
        NOW + Duration::days(3),
    );

    assert!(result.is_ok());
}
