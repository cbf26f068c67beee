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
    clippy::all
)]

use idea_hub_domain::{AppealId, IdeaId};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change. In
/// practice this is a registered member acting in one of the workflow roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role the actor held when acting (e.g., "ed", "core_team",
    /// "team_member").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The role the actor held when acting
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitIdea`", "`ResolveAppeal`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The workflow record an audit event is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditScope {
    /// The event concerns an idea.
    Idea(IdeaId),
    /// The event concerns an appeal (which may in turn mutate its idea).
    Appeal(AppealId),
}

impl std::fmt::Display for AuditScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idea(id) => write!(f, "idea:{id}"),
            Self::Appeal(id) => write!(f, "appeal:{id}"),
        }
    }
}

/// A snapshot of the relevant state at a point in time.
///
/// Snapshots are compact string summaries (record status plus collection
/// counts), not full serializations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - Which record the transition concerned (scope)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The record this event is scoped to.
    pub scope: AuditScope,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `scope` - The record the transition concerned
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        scope: AuditScope,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("member-3"), String::from("core_team"));

        assert_eq!(actor.id, "member-3");
        assert_eq!(actor.actor_type, "core_team");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Member request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Member request");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("SecondIdea"),
            Some(String::from("Endorsed idea 4")),
        );

        assert_eq!(action.name, "SecondIdea");
        assert_eq!(action.details, Some(String::from("Endorsed idea 4")));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(AuditScope::Idea(IdeaId::new(4)).to_string(), "idea:4");
        assert_eq!(AuditScope::Appeal(AppealId::new(2)).to_string(), "appeal:2");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("member-3"), String::from("ed"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Member request"));
        let action: Action = Action::new(String::from("DecideIdea"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("status=seconded"));
        let after: StateSnapshot = StateSnapshot::new(String::from("status=in_progress"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            AuditScope::Idea(IdeaId::new(1)),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.scope, AuditScope::Idea(IdeaId::new(1)));
    }

    #[test]
    fn test_audit_event_equality() {
        let make = || {
            AuditEvent::new(
                Actor::new(String::from("member-1"), String::from("team_member")),
                Cause::new(String::from("req-1"), String::from("Member request")),
                Action::new(String::from("SubmitIdea"), None),
                StateSnapshot::new(String::from("ideas=0")),
                StateSnapshot::new(String::from("ideas=1")),
                AuditScope::Idea(IdeaId::new(1)),
            )
        };

        assert_eq!(make(), make());
    }
}
