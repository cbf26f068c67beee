// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The member credential directory.
//!
//! A flat list of member records under the `users` key, plus the single
//! active-session record under `current_user`. Lookup is by email; passwords
//! are stored as bcrypt hashes and verified with constant-cost comparison.

use idea_hub_domain::{MemberId, MemberRecord, Role};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::store::KeyValueStore;

/// Store key for the member directory.
pub const USERS_KEY: &str = "users";

/// Store key for the active session's member record.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Loads every member record from the store.
///
/// # Errors
///
/// Returns an error if the store fails or the stored value does not parse.
pub fn load_members<S: KeyValueStore>(store: &S) -> Result<Vec<MemberRecord>, PersistenceError> {
    match store.get(USERS_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces the stored member directory.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save_members<S: KeyValueStore>(
    store: &mut S,
    members: &[MemberRecord],
) -> Result<(), PersistenceError> {
    let raw: String = serde_json::to_string(members)?;
    store.set(USERS_KEY, &raw)?;
    debug!(count = members.len(), "Mirrored member directory");
    Ok(())
}

/// Looks up a member by identifier.
///
/// # Errors
///
/// Returns an error if the directory cannot be loaded.
pub fn member_by_id<S: KeyValueStore>(
    store: &S,
    id: MemberId,
) -> Result<Option<MemberRecord>, PersistenceError> {
    Ok(load_members(store)?.into_iter().find(|m| m.id == id))
}

/// Registers a new member with a bcrypt-hashed password.
///
/// Emails are unique case-insensitively. The caller is responsible for
/// password-policy and email-shape validation; the directory only enforces
/// uniqueness and hashing.
///
/// # Errors
///
/// Returns `EmailAlreadyRegistered` for a duplicate email, or an error if
/// hashing or the store write fails.
pub fn register_member<S: KeyValueStore>(
    store: &mut S,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    now: OffsetDateTime,
) -> Result<MemberRecord, PersistenceError> {
    let mut members: Vec<MemberRecord> = load_members(store)?;

    if members.iter().any(|m| m.email.eq_ignore_ascii_case(email)) {
        return Err(PersistenceError::EmailAlreadyRegistered(email.to_string()));
    }

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let next_id: i64 = members.iter().map(|m| m.id.value()).max().unwrap_or(0) + 1;
    let member: MemberRecord = MemberRecord {
        id: MemberId::new(next_id),
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role,
        created_at: now,
    };

    members.push(member.clone());
    save_members(store, &members)?;
    info!(member = %member.id, role = %member.role, "Registered member");

    Ok(member)
}

/// Verifies an email/password pair against the directory.
///
/// # Errors
///
/// Returns `InvalidCredentials` if the email is unknown or the password does
/// not match; other errors indicate store or hashing failures.
pub fn verify_credentials<S: KeyValueStore>(
    store: &S,
    email: &str,
    password: &str,
) -> Result<MemberRecord, PersistenceError> {
    let members: Vec<MemberRecord> = load_members(store)?;

    let Some(member) = members
        .into_iter()
        .find(|m| m.email.eq_ignore_ascii_case(email))
    else {
        return Err(PersistenceError::InvalidCredentials);
    };

    if !bcrypt::verify(password, &member.password_hash)? {
        return Err(PersistenceError::InvalidCredentials);
    }

    Ok(member)
}

/// Persists the given member as the active session.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn set_current_user<S: KeyValueStore>(
    store: &mut S,
    member: &MemberRecord,
) -> Result<(), PersistenceError> {
    let raw: String = serde_json::to_string(member)?;
    store.set(CURRENT_USER_KEY, &raw)?;
    Ok(())
}

/// Reads the active session's member record, if a session exists.
///
/// # Errors
///
/// Returns an error if the store fails or the stored value does not parse.
pub fn current_user<S: KeyValueStore>(
    store: &S,
) -> Result<Option<MemberRecord>, PersistenceError> {
    match store.get(CURRENT_USER_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Ends the active session.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn clear_current_user<S: KeyValueStore>(store: &mut S) -> Result<(), PersistenceError> {
    store.remove(CURRENT_USER_KEY)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-02-01 09:00 UTC);

    #[test]
    fn test_register_assigns_sequential_ids_and_hashes() {
        let mut store = MemoryStore::new();

        let first =
            register_member(&mut store, "Dana", "dana@example.org", "hunter-22", Role::TeamMember, NOW)
                .unwrap();
        let second =
            register_member(&mut store, "Sam", "sam@example.org", "hunter-23", Role::CoreTeam, NOW)
                .unwrap();

        assert_eq!(first.id, MemberId::new(1));
        assert_eq!(second.id, MemberId::new(2));
        assert_ne!(first.password_hash, "hunter-22");
    }

    #[test]
    fn test_duplicate_email_rejected_case_insensitively() {
        let mut store = MemoryStore::new();
        register_member(&mut store, "Dana", "dana@example.org", "pw-123456", Role::TeamMember, NOW)
            .unwrap();

        let result = register_member(
            &mut store,
            "Other Dana",
            "Dana@Example.org",
            "pw-654321",
            Role::TeamMember,
            NOW,
        );

        assert!(matches!(
            result.unwrap_err(),
            PersistenceError::EmailAlreadyRegistered(_)
        ));
    }

    #[test]
    fn test_verify_accepts_correct_password_only() {
        let mut store = MemoryStore::new();
        register_member(&mut store, "Dana", "dana@example.org", "pw-123456", Role::TeamMember, NOW)
            .unwrap();

        let member = verify_credentials(&store, "dana@example.org", "pw-123456").unwrap();
        assert_eq!(member.name, "Dana");

        assert_eq!(
            verify_credentials(&store, "dana@example.org", "wrong").unwrap_err(),
            PersistenceError::InvalidCredentials
        );
        assert_eq!(
            verify_credentials(&store, "nobody@example.org", "pw-123456").unwrap_err(),
            PersistenceError::InvalidCredentials
        );
    }

    #[test]
    fn test_session_round_trip() {
        let mut store = MemoryStore::new();
        let member =
            register_member(&mut store, "Dana", "dana@example.org", "pw-123456", Role::TeamMember, NOW)
                .unwrap();

        assert!(current_user(&store).unwrap().is_none());

        set_current_user(&mut store, &member).unwrap();
        assert_eq!(current_user(&store).unwrap(), Some(member));

        clear_current_user(&mut store).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn test_member_lookup_by_id() {
        let mut store = MemoryStore::new();
        let member =
            register_member(&mut store, "Dana", "dana@example.org", "pw-123456", Role::TeamMember, NOW)
                .unwrap();

        assert_eq!(member_by_id(&store, member.id).unwrap(), Some(member));
        assert_eq!(member_by_id(&store, MemberId::new(99)).unwrap(), None);
    }
}
