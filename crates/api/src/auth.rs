// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Every permission check lives here, evaluated before a command is built.
//! The presentation layer may hide buttons, but it is never the enforcement
//! point: a caller reaching the service with the wrong role gets a
//! distinguished `Unauthorized` error.

use idea_hub_audit::Actor;
use idea_hub_domain::{Appeal, Idea, MemberId, MemberRecord, MemberRef, Role};
use idea_hub_persistence::{KeyValueStore, PersistenceError, directory};
use time::OffsetDateTime;
use tracing::info;

use crate::error::AuthError;

/// An authenticated member with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The member's canonical identifier.
    pub id: MemberId,
    /// The member's display name.
    pub name: String,
    /// The role assigned to this member.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The member's canonical identifier
    /// * `name` - The member's display name
    /// * `role` - The role assigned to this member
    #[must_use]
    pub const fn new(id: MemberId, name: String, role: Role) -> Self {
        Self { id, name, role }
    }

    /// Builds an actor from a directory record.
    #[must_use]
    pub fn from_record(record: &MemberRecord) -> Self {
        Self::new(record.id, record.name.clone(), record.role)
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions to the
    /// member who performed them.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.to_string(), self.role.as_str().to_string())
    }

    /// Returns a member reference for embedding into workflow records.
    #[must_use]
    pub fn to_member_ref(&self) -> MemberRef {
        MemberRef::new(self.id, self.name.clone())
    }
}

/// Builds the standard unauthorized error for an action that needs the core
/// team.
fn requires_core_team(action: &str) -> AuthError {
    AuthError::Unauthorized {
        action: action.to_string(),
        required_role: String::from("core team"),
    }
}

/// Authorization service for enforcing role-based access control.
///
/// One function per operation, mirroring the workflow's permission table:
/// submitting, seconding, commenting, and appealing are open to every
/// member; deciding, reviewing, assigning, and appeal handling need the core
/// team; implementation updates are open to the idea's owner as well.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may submit an idea.
    ///
    /// Every member may submit.
    ///
    /// # Errors
    ///
    /// Never fails; present for uniformity with the other checks.
    pub const fn authorize_submit(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }

    /// Checks if an actor may second the given idea.
    ///
    /// Every member may second, except the idea's own submitter.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor submitted the idea.
    pub fn authorize_second(actor: &AuthenticatedActor, idea: &Idea) -> Result<(), AuthError> {
        if idea.submitter.id == actor.id {
            return Err(AuthError::Unauthorized {
                action: String::from("second_idea"),
                required_role: String::from("a member other than the submitter"),
            });
        }
        Ok(())
    }

    /// Checks if an actor may comment on an idea.
    ///
    /// Every member may comment.
    ///
    /// # Errors
    ///
    /// Never fails; present for uniformity with the other checks.
    pub const fn authorize_comment(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }

    /// Checks if an actor may take an idea into review.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team.
    pub fn authorize_begin_review(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_core_team() {
            Ok(())
        } else {
            Err(requires_core_team("begin_review"))
        }
    }

    /// Checks if an actor may record a decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team.
    pub fn authorize_decide(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_core_team() {
            Ok(())
        } else {
            Err(requires_core_team("decide_idea"))
        }
    }

    /// Checks if an actor may assign an implementation owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team.
    pub fn authorize_assign_owner(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_core_team() {
            Ok(())
        } else {
            Err(requires_core_team("assign_owner"))
        }
    }

    /// Checks if an actor may update the action plan of the given idea.
    ///
    /// The implementation owner and the core team may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core team.
    pub fn authorize_update_action_plan(
        actor: &AuthenticatedActor,
        idea: &Idea,
    ) -> Result<(), AuthError> {
        Self::authorize_implementation_update(actor, idea, "update_action_plan")
    }

    /// Checks if an actor may log a check-in against the given idea.
    ///
    /// The implementation owner and the core team may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core team.
    pub fn authorize_check_in(actor: &AuthenticatedActor, idea: &Idea) -> Result<(), AuthError> {
        Self::authorize_implementation_update(actor, idea, "add_check_in")
    }

    /// Checks if an actor may mark the given idea completed.
    ///
    /// The implementation owner and the core team may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core team.
    pub fn authorize_complete(actor: &AuthenticatedActor, idea: &Idea) -> Result<(), AuthError> {
        Self::authorize_implementation_update(actor, idea, "complete_idea")
    }

    /// Checks if an actor may archive an idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team.
    pub fn authorize_archive(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_core_team() {
            Ok(())
        } else {
            Err(requires_core_team("archive_idea"))
        }
    }

    /// Checks if an actor may file an appeal.
    ///
    /// Every member may appeal an appealable decision.
    ///
    /// # Errors
    ///
    /// Never fails; present for uniformity with the other checks.
    pub const fn authorize_file_appeal(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }

    /// Checks if an actor may vote on the given appeal.
    ///
    /// Voting needs the core team, and an appeal's own submitter never votes
    /// on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team or filed the appeal.
    pub fn authorize_vote_on_appeal(
        actor: &AuthenticatedActor,
        appeal: &Appeal,
    ) -> Result<(), AuthError> {
        if !actor.role.is_core_team() {
            return Err(requires_core_team("vote_on_appeal"));
        }
        if appeal.submitter.id == actor.id {
            return Err(AuthError::Unauthorized {
                action: String::from("vote_on_appeal"),
                required_role: String::from("a core team member other than the appellant"),
            });
        }
        Ok(())
    }

    /// Checks if an actor may resolve an appeal.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team.
    pub fn authorize_resolve_appeal(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.is_core_team() {
            Ok(())
        } else {
            Err(requires_core_team("resolve_appeal"))
        }
    }

    fn authorize_implementation_update(
        actor: &AuthenticatedActor,
        idea: &Idea,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role.is_core_team() || idea.is_owned_by(actor.id) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("the idea's owner or core team"),
            })
        }
    }
}

/// Authentication service over the member directory.
///
/// The session model is the single persisted `current_user` record; logging
/// in replaces it, logging out removes it.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers a new member and signs them in.
    ///
    /// Field validation (name, email shape, password policy) is the
    /// handler's responsibility; this service enforces directory uniqueness
    /// and owns the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered or the store
    /// fails.
    pub fn register<S: KeyValueStore>(
        store: &mut S,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        now: OffsetDateTime,
    ) -> Result<MemberRecord, AuthError> {
        let member: MemberRecord =
            directory::register_member(store, name, email, password, role, now)
                .map_err(Self::map_persistence_error)?;

        directory::set_current_user(store, &member).map_err(Self::map_persistence_error)?;
        info!(member = %member.id, "Member registered and signed in");

        Ok(member)
    }

    /// Authenticates a member and starts a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials do not match a member.
    pub fn login<S: KeyValueStore>(
        store: &mut S,
        email: &str,
        password: &str,
    ) -> Result<MemberRecord, AuthError> {
        let member: MemberRecord = directory::verify_credentials(store, email, password)
            .map_err(Self::map_persistence_error)?;

        directory::set_current_user(store, &member).map_err(Self::map_persistence_error)?;
        info!(member = %member.id, "Member signed in");

        Ok(member)
    }

    /// Ends the active session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<(), AuthError> {
        directory::clear_current_user(store).map_err(Self::map_persistence_error)
    }

    /// Returns the active session's member, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn current_user<S: KeyValueStore>(
        store: &S,
    ) -> Result<Option<MemberRecord>, AuthError> {
        directory::current_user(store).map_err(Self::map_persistence_error)
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::EmailAlreadyRegistered(email) => AuthError::AuthenticationFailed {
                reason: format!("Email '{email}' is already registered"),
            },
            PersistenceError::InvalidCredentials => AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Directory error: {err}"),
            },
        }
    }
}
