// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for the service test suites.
//!
//! Actors are constructed directly rather than through registration so the
//! suites stay fast; the registration path itself is covered in the
//! workflow tests.

use crate::auth::AuthenticatedActor;
use crate::handlers::IdeaService;
use crate::request_response::{DecideIdeaRequest, SubmitIdeaRequest};
use idea_hub_domain::{IdeaId, MemberId, Role};
use idea_hub_persistence::MemoryStore;

/// Creates a service over a fresh in-memory store.
pub fn service() -> IdeaService<MemoryStore> {
    IdeaService::new(MemoryStore::new())
}

/// An actor with the team member role.
pub fn team_member(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(MemberId::new(id), format!("Member {id}"), Role::TeamMember)
}

/// An actor with the core team role.
pub fn core_team(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(MemberId::new(id), format!("Core {id}"), Role::CoreTeam)
}

/// An actor with the executive director role.
pub fn ed(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(
        MemberId::new(id),
        format!("Director {id}"),
        Role::ExecutiveDirector,
    )
}

/// A complete submission request.
pub fn submit_request(title: &str) -> SubmitIdeaRequest {
    SubmitIdeaRequest {
        title: title.to_string(),
        description: String::from("A detailed explanation"),
        why_it_matters: String::from("It advances the mission"),
        who_needed: Some(String::from("2 volunteers")),
        resources: None,
        timeline: None,
        risks: None,
        mission_alignment: None,
    }
}

/// Submits an idea as member 1 and returns its identifier.
pub fn submitted_idea(svc: &mut IdeaService<MemoryStore>, title: &str) -> IdeaId {
    svc.submit_idea(&team_member(1), submit_request(title))
        .expect("submission should succeed")
        .idea_id
}

/// Submits an idea and endorses it twice, advancing it to seconded.
pub fn seconded_idea(svc: &mut IdeaService<MemoryStore>, title: &str) -> IdeaId {
    let id = submitted_idea(svc, title);
    svc.second_idea(&team_member(2), id).expect("second should succeed");
    svc.second_idea(&team_member(3), id).expect("second should succeed");
    id
}

/// Submits, seconds, and approves an idea, leaving it in progress.
pub fn approved_idea(svc: &mut IdeaService<MemoryStore>, title: &str) -> IdeaId {
    let id = seconded_idea(svc, title);
    svc.decide_idea(
        &core_team(4),
        DecideIdeaRequest {
            idea_id: id,
            kind: String::from("approved"),
            rationale: String::from("Worth doing"),
        },
    )
    .expect("decision should succeed");
    id
}

/// Submits, seconds, and declines an idea.
pub fn declined_idea(svc: &mut IdeaService<MemoryStore>, title: &str) -> IdeaId {
    let id = seconded_idea(svc, title);
    svc.decide_idea(
        &core_team(4),
        DecideIdeaRequest {
            idea_id: id,
            kind: String::from("declined"),
            rationale: String::from("Budget constraints"),
        },
    )
    .expect("decision should succeed");
    id
}
