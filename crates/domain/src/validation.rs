// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::idea::IdeaDraft;

/// Maximum check-in progress value.
const MAX_PROGRESS: u8 = 100;

/// Validates that an idea draft carries its required fields.
///
/// Required fields are title, description, and why-it-matters; the
/// remaining draft fields are optional context and are not checked.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` naming the first missing field.
pub fn validate_idea_draft(draft: &IdeaDraft) -> Result<(), DomainError> {
    validate_required_text("title", &draft.title)?;
    validate_required_text("description", &draft.description)?;
    validate_required_text("why_it_matters", &draft.why_it_matters)?;
    Ok(())
}

/// Validates that a required text field is non-empty.
///
/// Whitespace-only values count as empty.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the value is blank.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(())
}

/// Validates a check-in progress value.
///
/// # Errors
///
/// Returns `DomainError::InvalidProgress` if the value exceeds 100.
pub fn validate_progress(progress: u8) -> Result<(), DomainError> {
    if progress > MAX_PROGRESS {
        return Err(DomainError::InvalidProgress { progress });
    }
    Ok(())
}

/// Validates that an email address is plausibly formed.
///
/// This is a shallow shape check (non-empty local part and domain around a
/// single separator), not RFC validation; the directory's uniqueness check
/// is what actually matters.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the value does not look like an
/// address.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed = email.trim();
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }
    Ok(())
}
