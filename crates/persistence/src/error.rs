// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// The email address is already registered in the directory.
    EmailAlreadyRegistered(String),
    /// The email/password pair did not match a member.
    ///
    /// Deliberately does not distinguish an unknown email from a wrong
    /// password.
    InvalidCredentials,
    /// Password hashing failed.
    PasswordHashFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::EmailAlreadyRegistered(email) => {
                write!(f, "Email '{email}' is already registered")
            }
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::PasswordHashFailed(msg) => write!(f, "Password hashing failed: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for PersistenceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::PasswordHashFailed(err.to_string())
    }
}
