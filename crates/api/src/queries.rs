// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries: dashboard statistics, queues, and record lookups.
//!
//! Queries take no actor; every member sees the same collections. They
//! never mutate the store.

use idea_hub::State;
use idea_hub_domain::{Appeal, AppealId, Idea, IdeaId, IdeaStatus};
use idea_hub_persistence::KeyValueStore;

use crate::error::ApiError;
use crate::handlers::IdeaService;
use crate::request_response::{AppealSummary, DashboardStats, IdeaSummary, StageCount};

/// The pipeline stages shown on the dashboard, in workflow order.
const PIPELINE_STAGES: [IdeaStatus; 8] = [
    IdeaStatus::Submitted,
    IdeaStatus::Feedback,
    IdeaStatus::Seconded,
    IdeaStatus::InReview,
    IdeaStatus::InProgress,
    IdeaStatus::Completed,
    IdeaStatus::Declined,
    IdeaStatus::Archived,
];

impl<S: KeyValueStore> IdeaService<S> {
    /// Returns the full record of a single idea.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the idea does not exist.
    pub fn get_idea(&self, idea_id: IdeaId) -> Result<Idea, ApiError> {
        let state: State = self.load()?;
        Self::idea_in(&state, idea_id).cloned()
    }

    /// Returns the full record of a single appeal.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the appeal does not exist.
    pub fn get_appeal(&self, appeal_id: AppealId) -> Result<Appeal, ApiError> {
        let state: State = self.load()?;
        Self::appeal_in(&state, appeal_id).cloned()
    }

    /// Returns idea totals for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let state: State = self.load()?;
        let count = |status: IdeaStatus| state.ideas.iter().filter(|i| i.status == status).count();

        Ok(DashboardStats {
            total: state.ideas.len(),
            awaiting_feedback: count(IdeaStatus::Submitted),
            seconded: count(IdeaStatus::Seconded),
            in_progress: count(IdeaStatus::InProgress),
            completed: count(IdeaStatus::Completed),
        })
    }

    /// Returns the per-stage idea counts for the pipeline view.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn stage_counts(&self) -> Result<Vec<StageCount>, ApiError> {
        let state: State = self.load()?;
        Ok(PIPELINE_STAGES
            .iter()
            .map(|status| StageCount {
                status: status.as_str().to_string(),
                count: state.ideas.iter().filter(|i| i.status == *status).count(),
            })
            .collect())
    }

    /// Returns the newest ideas first, bounded by `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn recent_ideas(&self, limit: usize) -> Result<Vec<IdeaSummary>, ApiError> {
        let state: State = self.load()?;
        let mut ideas: Vec<&Idea> = state.ideas.iter().collect();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas
            .into_iter()
            .take(limit)
            .map(IdeaSummary::from_idea)
            .collect())
    }

    /// Ideas awaiting team input (submitted or in their feedback window).
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn feedback_queue(&self) -> Result<Vec<IdeaSummary>, ApiError> {
        self.filtered(|i| {
            matches!(i.status, IdeaStatus::Submitted | IdeaStatus::Feedback)
        })
    }

    /// Ideas ready for discussion and decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn review_queue(&self) -> Result<Vec<IdeaSummary>, ApiError> {
        self.filtered(|i| {
            matches!(i.status, IdeaStatus::Seconded | IdeaStatus::InReview)
        })
    }

    /// Ideas currently being implemented.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn active_ideas(&self) -> Result<Vec<IdeaSummary>, ApiError> {
        self.filtered(|i| i.status == IdeaStatus::InProgress)
    }

    /// Completed, declined, and archived ideas.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn archived_ideas(&self) -> Result<Vec<IdeaSummary>, ApiError> {
        self.filtered(|i| i.status.is_closed())
    }

    /// Appeals still awaiting resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn pending_appeals(&self) -> Result<Vec<AppealSummary>, ApiError> {
        let state: State = self.load()?;
        Ok(state
            .appeals
            .iter()
            .filter(|a| !a.status.is_resolved())
            .map(AppealSummary::from_appeal)
            .collect())
    }

    /// Appeals resolved either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded.
    pub fn resolved_appeals(&self) -> Result<Vec<AppealSummary>, ApiError> {
        let state: State = self.load()?;
        Ok(state
            .appeals
            .iter()
            .filter(|a| a.status.is_resolved())
            .map(AppealSummary::from_appeal)
            .collect())
    }

    fn filtered(&self, keep: impl Fn(&Idea) -> bool) -> Result<Vec<IdeaSummary>, ApiError> {
        let state: State = self.load()?;
        Ok(state
            .ideas
            .iter()
            .filter(|i| keep(i))
            .map(IdeaSummary::from_idea)
            .collect())
    }
}
