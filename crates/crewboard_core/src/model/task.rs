//! Task record, workflow enums and embedded comments.
//!
//! # Responsibility
//! - Define the unit of work tracked inside a project.
//! - Carry the append-only comment thread owned by each task.
//!
//! # Invariants
//! - `project_id` and `created_by` are set at creation and never change.
//! - `status` moves freely between values; no transition order is enforced.
//! - `comments` only ever grows, in append order.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{epoch_millis, CommentId, ModelValidationError, ProjectId, TaskId, UserId};

/// Workflow state of a task.
///
/// Any value is reachable from any other through the authorized update path;
/// serialized names match the external wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Stable wire name, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

/// Scheduling weight of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Stable wire name, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Single entry in a task's append-only discussion thread.
///
/// Owned exclusively by its task; the author is referenced by id and joined
/// at read time when a display name is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub text: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    /// Creates a comment with a generated sub-identifier.
    pub fn new(author: UserId, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author,
            text: text.into(),
            created_at: epoch_millis(),
        }
    }
}

/// Unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owning project; fixed for the record's lifetime.
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Responsible user; not required to be a project member.
    pub assigned_to: UserId,
    /// Creating user; fixed for the record's lifetime.
    pub created_by: UserId,
    /// Due date as Unix epoch milliseconds.
    pub due_at: i64,
    /// Append-only discussion thread.
    pub comments: Vec<Comment>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; refreshed by every mutation.
    pub updated_at: i64,
}

impl Task {
    /// Creates a task with default `TODO` status and `MEDIUM` priority.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        assigned_to: UserId,
        created_by: UserId,
        due_at: i64,
    ) -> Self {
        let now = epoch_millis();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into().trim().to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assigned_to,
            created_by,
            due_at,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends one comment, preserving thread order.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Refreshes `updated_at`; called by every mutating write path.
    pub fn touch(&mut self) {
        self.updated_at = epoch_millis();
    }

    /// Checks record shape including every embedded comment.
    ///
    /// # Errors
    /// - `BlankTaskTitle` when the title is empty.
    /// - `BlankCommentText` when any comment has empty text.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::BlankTaskTitle);
        }
        if self
            .comments
            .iter()
            .any(|comment| comment.text.trim().is_empty())
        {
            return Err(ModelValidationError::BlankCommentText);
        }
        Ok(())
    }
}
