// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Whole-collection mirroring of workflow state into the key-value store.
//!
//! Every mutation rewrites the affected collection as one serialized array;
//! there is no diffing and no partial write. A missing key reads as the
//! empty collection, so a fresh store needs no seeding.

use idea_hub::{State, TransitionResult};
use idea_hub_domain::{Appeal, Idea};
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::store::KeyValueStore;

/// Store key for the idea collection.
pub const IDEAS_KEY: &str = "ideas";

/// Store key for the appeal collection.
pub const APPEALS_KEY: &str = "appeals";

/// Loads all ideas from the store.
///
/// # Errors
///
/// Returns an error if the store fails or the stored value does not parse.
pub fn load_ideas<S: KeyValueStore>(store: &S) -> Result<Vec<Idea>, PersistenceError> {
    match store.get(IDEAS_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces the stored idea collection.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save_ideas<S: KeyValueStore>(store: &mut S, ideas: &[Idea]) -> Result<(), PersistenceError> {
    let raw: String = serde_json::to_string(ideas)?;
    store.set(IDEAS_KEY, &raw)?;
    debug!(count = ideas.len(), "Mirrored idea collection");
    Ok(())
}

/// Loads all appeals from the store.
///
/// # Errors
///
/// Returns an error if the store fails or the stored value does not parse.
pub fn load_appeals<S: KeyValueStore>(store: &S) -> Result<Vec<Appeal>, PersistenceError> {
    match store.get(APPEALS_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces the stored appeal collection.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save_appeals<S: KeyValueStore>(
    store: &mut S,
    appeals: &[Appeal],
) -> Result<(), PersistenceError> {
    let raw: String = serde_json::to_string(appeals)?;
    store.set(APPEALS_KEY, &raw)?;
    debug!(count = appeals.len(), "Mirrored appeal collection");
    Ok(())
}

/// Loads the complete workflow state.
///
/// # Errors
///
/// Returns an error if either collection fails to load.
pub fn load_state<S: KeyValueStore>(store: &S) -> Result<State, PersistenceError> {
    Ok(State {
        ideas: load_ideas(store)?,
        appeals: load_appeals(store)?,
    })
}

/// Persists a successful transition: both collections are mirrored and the
/// audit event is logged.
///
/// Appeal resolution can mutate an idea, so both collections are always
/// rewritten rather than tracking which one a command touched.
///
/// # Errors
///
/// Returns an error if either collection fails to persist.
pub fn persist_transition<S: KeyValueStore>(
    store: &mut S,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    save_ideas(store, &result.new_state.ideas)?;
    save_appeals(store, &result.new_state.appeals)?;

    info!(
        actor = %result.audit_event.actor.id,
        role = %result.audit_event.actor.actor_type,
        action = %result.audit_event.action.name,
        scope = %result.audit_event.scope,
        "Persisted transition"
    );

    Ok(())
}
