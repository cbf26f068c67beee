// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use idea_hub_audit::{AuditEvent, StateSnapshot};
use idea_hub_domain::{Appeal, AppealId, Idea, IdeaId};

/// The complete workflow state: every idea and every appeal.
///
/// Both collections are ordered by creation and append-only in the sense
/// that records are never deleted; they only change status. The state is one
/// value so that appeal resolution, which reaches across to its contested
/// idea, stays a single atomic transform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// All ideas, in submission order.
    pub ideas: Vec<Idea>,
    /// All appeals, in filing order.
    pub appeals: Vec<Appeal>,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ideas: Vec::new(),
            appeals: Vec::new(),
        }
    }

    /// Looks up an idea by identifier.
    #[must_use]
    pub fn idea(&self, id: IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    /// Looks up an appeal by identifier.
    #[must_use]
    pub fn appeal(&self, id: AppealId) -> Option<&Appeal> {
        self.appeals.iter().find(|a| a.id == id)
    }

    /// Returns the identifier the next submitted idea will receive.
    ///
    /// Records are never deleted, so the highest existing identifier plus
    /// one is always fresh.
    #[must_use]
    pub fn next_idea_id(&self) -> IdeaId {
        let max = self.ideas.iter().map(|i| i.id.value()).max().unwrap_or(0);
        IdeaId::new(max + 1)
    }

    /// Returns the identifier the next filed appeal will receive.
    #[must_use]
    pub fn next_appeal_id(&self) -> AppealId {
        let max = self.appeals.iter().map(|a| a.id.value()).max().unwrap_or(0);
        AppealId::new(max + 1)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "ideas_count={},appeals_count={}",
            self.ideas.len(),
            self.appeals.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// The identifier of the idea created by this transition, if any.
    pub created_idea: Option<IdeaId>,
    /// The identifier of the appeal created by this transition, if any.
    pub created_appeal: Option<AppealId>,
}
