//! Domain model for collaborative project/task tracking.
//!
//! # Responsibility
//! - Define the canonical records shared by services, fan-out and clients.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - A project's member set always contains its owner.
//! - Comments are owned by their task and are append-only.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

pub mod project;
pub mod task;
pub mod user;

/// Stable identifier for a registered user.
pub type UserId = Uuid;
/// Stable identifier for a project.
pub type ProjectId = Uuid;
/// Stable identifier for a task.
pub type TaskId = Uuid;
/// Stable identifier for a comment inside a task.
pub type CommentId = Uuid;

/// Current wall-clock time as Unix epoch milliseconds.
///
/// All record timestamps (`created_at`, `updated_at`, `due_at`) use this
/// single representation.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Shape-level validation failure for any domain record.
///
/// Raised before persistence; the store layer re-checks it so no write path
/// can bypass these rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Email does not match the accepted address pattern.
    InvalidEmail(String),
    /// Handle is empty after trimming.
    BlankHandle,
    /// Project name is empty after trimming.
    BlankProjectName,
    /// Task title is empty after trimming.
    BlankTaskTitle,
    /// Comment text is empty after trimming.
    BlankCommentText,
    /// Project member list lost its owner entry.
    OwnerNotMember,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::BlankHandle => write!(f, "handle must not be blank"),
            Self::BlankProjectName => write!(f, "project name must not be blank"),
            Self::BlankTaskTitle => write!(f, "task title must not be blank"),
            Self::BlankCommentText => write!(f, "comment text must not be blank"),
            Self::OwnerNotMember => write!(f, "project owner is missing from the member list"),
        }
    }
}

impl Error for ModelValidationError {}

#[cfg(test)]
mod tests {
    use super::epoch_millis;

    #[test]
    fn epoch_millis_is_positive_and_ordered() {
        let first = epoch_millis();
        let second = epoch_millis();
        assert!(first > 0);
        assert!(second >= first);
    }
}
