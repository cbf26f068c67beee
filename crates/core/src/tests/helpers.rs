// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for the engine test suites.

use crate::{Command, State, TransitionResult, apply};
use idea_hub_audit::{Actor, Cause};
use idea_hub_domain::{IdeaDraft, IdeaId, MemberId, MemberRef};
use time::OffsetDateTime;
use time::macros::datetime;

/// A fixed reference instant for deterministic deadline arithmetic.
pub const NOW: OffsetDateTime = datetime!(2026-02-01 09:00 UTC);

/// Creates a test actor.
pub fn create_test_actor() -> Actor {
    Actor::new(String::from("member-1"), String::from("team_member"))
}

/// Creates a test cause.
pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// Creates a member reference with a derived display name.
pub fn member(id: i64) -> MemberRef {
    MemberRef::new(MemberId::new(id), format!("Member {id}"))
}

/// Creates a complete idea draft with the required fields filled.
pub fn draft(title: &str) -> IdeaDraft {
    IdeaDraft {
        title: title.to_string(),
        description: String::from("A detailed explanation"),
        why_it_matters: String::from("It advances the mission"),
        who_needed: None,
        resources: None,
        timeline: None,
        risks: None,
        mission_alignment: None,
    }
}

/// Applies a command at the given time, panicking on failure.
pub fn apply_ok(state: &State, command: Command, now: OffsetDateTime) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause(), now)
        .expect("command should apply cleanly")
}

/// Submits an idea and returns the new state together with its identifier.
pub fn submit_idea(state: &State, title: &str, submitter: MemberRef) -> (State, IdeaId) {
    let result = apply_ok(
        state,
        Command::SubmitIdea {
            draft: draft(title),
            submitter,
        },
        NOW,
    );
    let id = result.created_idea.expect("submission must assign an id");
    (result.new_state, id)
}

/// Submits an idea and advances it to seconded with two endorsements.
pub fn seconded_idea(title: &str) -> (State, IdeaId) {
    let (state, id) = submit_idea(&State::new(), title, member(1));
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
            voter: member(3),
        },
        NOW,
    )
    .new_state;
    (state, id)
}
