// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The workflow service: every state-changing operation.
//!
//! Each handler follows the same shape: load the state from the store,
//! check the actor's permission, build a command, run it through the
//! engine, persist the result, and answer with a response type. Role
//! checks happen here so the service is safe to expose to any caller; the
//! engine enforces the lifecycle rules themselves.

use std::str::FromStr;

use idea_hub::{Command, State, TransitionResult, apply};
use idea_hub_audit::Cause;
use idea_hub_domain::{
    Appeal, AppealId, DecisionKind, DomainError, Idea, IdeaId, MemberRecord, Role, VoteChoice,
    validate_email, validate_required_text,
};
use idea_hub_persistence::{
    KeyValueStore, PersistenceError, directory,
    repository::{load_state, persist_transition},
};
use time::OffsetDateTime;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AssignOwnerRequest, DecideIdeaRequest, DecideIdeaResponse, FileAppealRequest,
    FileAppealResponse, IdeaUpdateResponse, LoginRequest, MemberInfo, RegisterRequest,
    ResolveAppealResponse, SecondIdeaResponse, SubmitIdeaRequest, SubmitIdeaResponse,
    VoteOnAppealRequest, VoteOnAppealResponse,
};

/// The workflow service.
///
/// Owns the key-value store for the whole session; constructed once at
/// process start and passed by reference to the presentation layer. All
/// mutation flows through it, which is what makes the permission checks
/// unbypassable.
pub struct IdeaService<S: KeyValueStore> {
    store: S,
    request_seq: u64,
}

impl<S: KeyValueStore> IdeaService<S> {
    /// Creates a service over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            request_seq: 0,
        }
    }

    /// Read access to the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Registers a new member and signs them in.
    ///
    /// # Errors
    ///
    /// Returns an error if a field fails validation, the email is taken, or
    /// the password fails policy.
    pub fn register(&mut self, request: RegisterRequest) -> Result<MemberInfo, ApiError> {
        let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;
        validate_required_text("name", &request.name).map_err(translate_domain_error)?;
        validate_email(&request.email).map_err(translate_domain_error)?;
        PasswordPolicy::default().validate(
            &request.password,
            &request.confirmation,
            &request.email,
            &request.name,
        )?;

        let member: MemberRecord = AuthenticationService::register(
            &mut self.store,
            &request.name,
            &request.email,
            &request.password,
            role,
            OffsetDateTime::now_utc(),
        )?;
        Ok(MemberInfo::from_record(&member))
    }

    /// Authenticates a member and starts a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials do not match a member.
    pub fn login(&mut self, request: LoginRequest) -> Result<MemberInfo, ApiError> {
        let member: MemberRecord =
            AuthenticationService::login(&mut self.store, &request.email, &request.password)?;
        Ok(MemberInfo::from_record(&member))
    }

    /// Ends the active session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn logout(&mut self) -> Result<(), ApiError> {
        AuthenticationService::logout(&mut self.store)?;
        Ok(())
    }

    /// Returns the active session's actor, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn current_actor(&self) -> Result<Option<AuthenticatedActor>, ApiError> {
        let member: Option<MemberRecord> = AuthenticationService::current_user(&self.store)?;
        Ok(member.as_ref().map(AuthenticatedActor::from_record))
    }

    /// Lists every registered member (for owner selection).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be loaded.
    pub fn list_members(&self) -> Result<Vec<MemberInfo>, ApiError> {
        let members: Vec<MemberRecord> =
            directory::load_members(&self.store).map_err(Self::internal)?;
        Ok(members.iter().map(MemberInfo::from_record).collect())
    }

    // ------------------------------------------------------------------
    // Idea operations
    // ------------------------------------------------------------------

    /// Submits a new idea.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is blank.
    pub fn submit_idea(
        &mut self,
        actor: &AuthenticatedActor,
        request: SubmitIdeaRequest,
    ) -> Result<SubmitIdeaResponse, ApiError> {
        let state: State = self.load()?;
        AuthorizationService::authorize_submit(actor)?;

        let command: Command = Command::SubmitIdea {
            draft: request.into_draft(),
            submitter: actor.to_member_ref(),
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Submit an idea")?;

        let idea_id: IdeaId = result.created_idea.ok_or_else(|| ApiError::Internal {
            message: String::from("Submission did not produce an idea identifier"),
        })?;
        let idea: &Idea = Self::idea_in(&result.new_state, idea_id)?;

        Ok(SubmitIdeaResponse {
            idea_id,
            status: idea.status.as_str().to_string(),
            feedback_deadline: idea.feedback_deadline,
        })
    }

    /// Seconds an idea on behalf of the actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor submitted the idea, the idea is past
    /// its endorsement stage, or it does not exist.
    pub fn second_idea(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
    ) -> Result<SecondIdeaResponse, ApiError> {
        let state: State = self.load()?;
        let idea: &Idea = Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_second(actor, idea)?;

        let command: Command = Command::SecondIdea {
            idea_id,
            voter: actor.to_member_ref(),
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Second an idea")?;

        let idea: &Idea = Self::idea_in(&result.new_state, idea_id)?;
        Ok(SecondIdeaResponse {
            idea_id,
            seconds: idea.seconds.len(),
            status: idea.status.as_str().to_string(),
        })
    }

    /// Adds a comment to an idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank or the idea does not exist.
    pub fn add_comment(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
        text: String,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_comment(actor)?;

        let command: Command = Command::AddComment {
            idea_id,
            author: actor.to_member_ref(),
            text,
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Comment on an idea")?;

        Self::update_response(&result.new_state, idea_id)
    }

    /// Takes a seconded idea into its review meeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team or the idea is not
    /// seconded.
    pub fn begin_review(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_begin_review(actor)?;

        let command: Command = Command::BeginReview { idea_id };
        let result: TransitionResult =
            self.execute(&state, command, actor, "Take an idea into review")?;

        Self::update_response(&result.new_state, idea_id)
    }

    /// Records a decision on a review-ready idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team, the kind string is
    /// invalid, the rationale is blank, or the idea is not review-ready.
    pub fn decide_idea(
        &mut self,
        actor: &AuthenticatedActor,
        request: DecideIdeaRequest,
    ) -> Result<DecideIdeaResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, request.idea_id)?;
        AuthorizationService::authorize_decide(actor)?;

        let kind: DecisionKind =
            DecisionKind::from_str(&request.kind).map_err(translate_domain_error)?;
        let command: Command = Command::DecideIdea {
            idea_id: request.idea_id,
            kind,
            rationale: request.rationale,
            decider: actor.to_member_ref(),
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Decide an idea")?;

        let idea: &Idea = Self::idea_in(&result.new_state, request.idea_id)?;
        let decision = idea.decision.as_ref().ok_or_else(|| ApiError::Internal {
            message: String::from("Decision was not recorded"),
        })?;

        Ok(DecideIdeaResponse {
            idea_id: request.idea_id,
            status: idea.status.as_str().to_string(),
            appeal_deadline: decision.appeal_deadline,
        })
    }

    /// Assigns an implementation owner to an approved idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team, the member does not
    /// exist, or the idea is not in progress.
    pub fn assign_owner(
        &mut self,
        actor: &AuthenticatedActor,
        request: AssignOwnerRequest,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, request.idea_id)?;
        AuthorizationService::authorize_assign_owner(actor)?;

        let owner: MemberRecord = directory::member_by_id(&self.store, request.owner_id)
            .map_err(Self::internal)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Member"),
                message: format!("Member {} does not exist", request.owner_id),
            })?;

        let command: Command = Command::AssignOwner {
            idea_id: request.idea_id,
            owner: owner.to_ref(),
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Assign an owner")?;

        Self::update_response(&result.new_state, request.idea_id)
    }

    /// Replaces the implementation plan of an approved idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core
    /// team, the text is blank, or the idea is not in progress.
    pub fn update_action_plan(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
        action_plan: String,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        let idea: &Idea = Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_update_action_plan(actor, idea)?;

        let command: Command = Command::UpdateActionPlan {
            idea_id,
            action_plan,
        };
        let result: TransitionResult =
            self.execute(&state, command, actor, "Update the action plan")?;

        Self::update_response(&result.new_state, idea_id)
    }

    /// Logs a progress check-in against an approved idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core
    /// team, the note is blank, the progress is out of range, or the idea
    /// is not in progress.
    pub fn add_check_in(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
        note: String,
        progress: u8,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        let idea: &Idea = Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_check_in(actor, idea)?;

        let command: Command = Command::AddCheckIn {
            idea_id,
            author: actor.to_member_ref(),
            note,
            progress,
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Log a check-in")?;

        Self::update_response(&result.new_state, idea_id)
    }

    /// Marks an approved idea as completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the idea nor is core
    /// team, or the idea is not in progress.
    pub fn complete_idea(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        let idea: &Idea = Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_complete(actor, idea)?;

        let command: Command = Command::CompleteIdea { idea_id };
        let result: TransitionResult = self.execute(&state, command, actor, "Complete an idea")?;

        Self::update_response(&result.new_state, idea_id)
    }

    /// Archives a completed or declined idea.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team or the idea is still
    /// active.
    pub fn archive_idea(
        &mut self,
        actor: &AuthenticatedActor,
        idea_id: IdeaId,
    ) -> Result<IdeaUpdateResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, idea_id)?;
        AuthorizationService::authorize_archive(actor)?;

        let command: Command = Command::ArchiveIdea { idea_id };
        let result: TransitionResult = self.execute(&state, command, actor, "Archive an idea")?;

        Self::update_response(&result.new_state, idea_id)
    }

    // ------------------------------------------------------------------
    // Appeal operations
    // ------------------------------------------------------------------

    /// Files an appeal against an idea's decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the idea has no appealable decision, the window
    /// has closed, an unresolved appeal already exists, or a text field is
    /// blank.
    pub fn file_appeal(
        &mut self,
        actor: &AuthenticatedActor,
        request: FileAppealRequest,
    ) -> Result<FileAppealResponse, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, request.idea_id)?;
        AuthorizationService::authorize_file_appeal(actor)?;

        let command: Command = Command::FileAppeal {
            idea_id: request.idea_id,
            submitter: actor.to_member_ref(),
            reason: request.reason,
            preferred_outcome: request.preferred_outcome,
        };
        let result: TransitionResult = self.execute(&state, command, actor, "File an appeal")?;

        let appeal_id: AppealId = result.created_appeal.ok_or_else(|| ApiError::Internal {
            message: String::from("Filing did not produce an appeal identifier"),
        })?;
        let appeal: &Appeal = Self::appeal_in(&result.new_state, appeal_id)?;

        Ok(FileAppealResponse {
            appeal_id,
            review_deadline: appeal.review_deadline,
        })
    }

    /// Casts or changes the actor's vote on an appeal.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team, filed the appeal
    /// themselves, the choice string is invalid, or the appeal is already
    /// resolved.
    pub fn vote_on_appeal(
        &mut self,
        actor: &AuthenticatedActor,
        request: VoteOnAppealRequest,
    ) -> Result<VoteOnAppealResponse, ApiError> {
        let state: State = self.load()?;
        let appeal: &Appeal = Self::appeal_in(&state, request.appeal_id)?;
        AuthorizationService::authorize_vote_on_appeal(actor, appeal)?;

        let choice: VoteChoice =
            VoteChoice::from_str(&request.choice).map_err(translate_domain_error)?;
        let command: Command = Command::VoteOnAppeal {
            appeal_id: request.appeal_id,
            voter: actor.to_member_ref(),
            choice,
        };
        let result: TransitionResult = self.execute(&state, command, actor, "Vote on an appeal")?;

        let appeal: &Appeal = Self::appeal_in(&result.new_state, request.appeal_id)?;
        let tally = appeal.tally();
        Ok(VoteOnAppealResponse {
            appeal_id: request.appeal_id,
            uphold_votes: tally.uphold,
            deny_votes: tally.deny,
        })
    }

    /// Resolves a pending appeal by majority vote.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not core team, the quorum has not
    /// been reached, or the appeal is already resolved.
    pub fn resolve_appeal(
        &mut self,
        actor: &AuthenticatedActor,
        appeal_id: AppealId,
    ) -> Result<ResolveAppealResponse, ApiError> {
        let state: State = self.load()?;
        Self::appeal_in(&state, appeal_id)?;
        AuthorizationService::authorize_resolve_appeal(actor)?;

        let command: Command = Command::ResolveAppeal { appeal_id };
        let result: TransitionResult = self.execute(&state, command, actor, "Resolve an appeal")?;

        let appeal: &Appeal = Self::appeal_in(&result.new_state, appeal_id)?;
        let idea: &Idea = Self::idea_in(&result.new_state, appeal.idea_id)?;
        let tally = appeal.tally();

        Ok(ResolveAppealResponse {
            appeal_id,
            outcome: appeal.status.as_str().to_string(),
            uphold_votes: tally.uphold,
            deny_votes: tally.deny,
            idea_status: idea.status.as_str().to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Shared plumbing
    // ------------------------------------------------------------------

    pub(crate) fn load(&self) -> Result<State, ApiError> {
        load_state(&self.store).map_err(Self::internal)
    }

    pub(crate) fn idea_in(state: &State, idea_id: IdeaId) -> Result<&Idea, ApiError> {
        state
            .idea(idea_id)
            .ok_or_else(|| translate_domain_error(DomainError::IdeaNotFound(idea_id)))
    }

    pub(crate) fn appeal_in(state: &State, appeal_id: AppealId) -> Result<&Appeal, ApiError> {
        state
            .appeal(appeal_id)
            .ok_or_else(|| translate_domain_error(DomainError::AppealNotFound(appeal_id)))
    }

    pub(crate) fn internal(err: PersistenceError) -> ApiError {
        ApiError::Internal {
            message: err.to_string(),
        }
    }

    fn update_response(state: &State, idea_id: IdeaId) -> Result<IdeaUpdateResponse, ApiError> {
        let idea: &Idea = Self::idea_in(state, idea_id)?;
        Ok(IdeaUpdateResponse {
            idea_id,
            status: idea.status.as_str().to_string(),
        })
    }

    fn execute(
        &mut self,
        state: &State,
        command: Command,
        actor: &AuthenticatedActor,
        description: &str,
    ) -> Result<TransitionResult, ApiError> {
        self.request_seq += 1;
        let cause: Cause = Cause::new(
            format!("req-{}", self.request_seq),
            description.to_string(),
        );

        let result: TransitionResult = apply(
            state,
            command,
            actor.to_audit_actor(),
            cause,
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_core_error)?;

        persist_transition(&mut self.store, &result).map_err(Self::internal)?;

        Ok(result)
    }
}
