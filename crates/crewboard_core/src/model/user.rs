//! User identity record.
//!
//! # Responsibility
//! - Define the account record other entities reference by id.
//! - Enforce email/handle shape before a user can be persisted.
//!
//! # Invariants
//! - `email` and `handle` are unique across the store (enforced on create).
//! - Identity fields never change once the record exists; other records hold
//!   the `UserId` only, never an embedded copy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{epoch_millis, ModelValidationError, UserId};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("valid email regex")
});

/// Registered account referenced by projects, tasks and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Lowercased unique address used for lookup.
    pub email: String,
    /// Unique display handle, trimmed on construction.
    pub handle: String,
    /// Optional profile image location.
    pub avatar_url: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl User {
    /// Creates a user record with a generated stable id.
    ///
    /// Email is lowercased and handle trimmed here so that uniqueness checks
    /// always compare normalized values.
    pub fn new(email: impl Into<String>, handle: impl Into<String>) -> Self {
        let now = epoch_millis();
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_ascii_lowercase(),
            handle: handle.into().trim().to_string(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks email and handle shape.
    ///
    /// # Errors
    /// - `InvalidEmail` when the address does not match the accepted pattern.
    /// - `BlankHandle` when the handle is empty.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if !EMAIL_RE.is_match(&self.email) {
            return Err(ModelValidationError::InvalidEmail(self.email.clone()));
        }
        if self.handle.is_empty() {
            return Err(ModelValidationError::BlankHandle);
        }
        Ok(())
    }
}
