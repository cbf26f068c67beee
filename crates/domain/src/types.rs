// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Canonical identifier for an idea.
///
/// Assigned at creation and stable for the record's lifetime; ideas are
/// never deleted, so identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(i64);

impl IdeaId {
    /// Creates an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier for an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppealId(i64);

impl AppealId {
    /// Creates an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AppealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier for a registered member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Creates an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-owning reference to a member, as embedded in workflow records.
///
/// Records carry the display name alongside the identifier so that stored
/// history remains readable even if the member record later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    /// The member's canonical identifier.
    pub id: MemberId,
    /// The member's display name at the time the reference was taken.
    pub name: String,
}

impl MemberRef {
    /// Creates a new member reference.
    #[must_use]
    pub const fn new(id: MemberId, name: String) -> Self {
        Self { id, name }
    }
}

/// Member roles.
///
/// Roles determine which workflow operations a member may perform. They are
/// fixed domain constants; there is no role hierarchy beyond the core-team
/// grouping below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Executive director: full decision and housekeeping authority.
    #[serde(rename = "ed")]
    ExecutiveDirector,
    /// Core team: may decide on ideas, vote on appeals, and manage
    /// implementation.
    #[serde(rename = "core_team")]
    CoreTeam,
    /// Team member: may submit, second, comment, and appeal.
    #[serde(rename = "team_member")]
    TeamMember,
}

impl Role {
    /// Returns the string representation of the role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExecutiveDirector => "ed",
            Self::CoreTeam => "core_team",
            Self::TeamMember => "team_member",
        }
    }

    /// Parses a role from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "ed" => Ok(Self::ExecutiveDirector),
            "core_team" => Ok(Self::CoreTeam),
            "team_member" => Ok(Self::TeamMember),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }

    /// Returns true for roles with decision authority (executive director
    /// and core team).
    #[must_use]
    pub const fn is_core_team(&self) -> bool {
        matches!(self, Self::ExecutiveDirector | Self::CoreTeam)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered member's credential record.
///
/// Stored under the `users` key as a flat list; lookup is by email. The
/// password is stored as a bcrypt hash, never in the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Canonical internal identifier.
    pub id: MemberId,
    /// Display name (informational, not unique).
    pub name: String,
    /// Email address (unique across the directory).
    pub email: String,
    /// bcrypt hash of the member's password.
    pub password_hash: String,
    /// The member's role.
    pub role: Role,
    /// When the member registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MemberRecord {
    /// Returns a non-owning reference to this member.
    #[must_use]
    pub fn to_ref(&self) -> MemberRef {
        MemberRef::new(self.id, self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_round_trip() {
        let roles = vec![Role::ExecutiveDirector, Role::CoreTeam, Role::TeamMember];

        for role in roles {
            let s = role.as_str();
            match Role::parse_str(s) {
                Ok(parsed) => assert_eq!(role, parsed),
                Err(e) => panic!("Failed to parse role string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_role_string() {
        let result = Role::parse_str("director");
        assert!(result.is_err());
    }

    #[test]
    fn test_core_team_grouping() {
        assert!(Role::ExecutiveDirector.is_core_team());
        assert!(Role::CoreTeam.is_core_team());
        assert!(!Role::TeamMember.is_core_team());
    }

    #[test]
    fn test_member_ref_preserves_identity() {
        let member = MemberRef::new(MemberId::new(7), String::from("Dana"));

        assert_eq!(member.id, MemberId::new(7));
        assert_eq!(member.name, "Dana");
    }
}
