//! Project record and membership helpers.
//!
//! # Responsibility
//! - Define the shared container that scopes tasks and fan-out rooms.
//! - Keep the owner-is-always-a-member rule inside the record itself.
//!
//! # Invariants
//! - `owner_id` is set at creation and never reassigned.
//! - `members` contains `owner_id` from construction onward; member
//!   management only ever appends.
//! - `task_ids` mirrors the tasks whose `project_id` points here; the link
//!   is maintained by the task write paths, not by this record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{epoch_millis, ModelValidationError, ProjectId, TaskId, UserId};

/// Shared workspace owning an ordered set of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Creating user; fixed for the record's lifetime.
    pub owner_id: UserId,
    /// User ids allowed to view the project and create tasks in it.
    pub members: Vec<UserId>,
    /// Ordered ids of tasks owned by this project.
    pub task_ids: Vec<TaskId>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; refreshed by every mutation.
    pub updated_at: i64,
}

impl Project {
    /// Creates a project owned by `owner`, who becomes the first member.
    pub fn new(name: impl Into<String>, description: impl Into<String>, owner: UserId) -> Self {
        let now = epoch_millis();
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            description: description.into(),
            owner_id: owner,
            members: vec![owner],
            task_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether `user` may act as a member (the owner always can).
    pub fn is_member(&self, user: UserId) -> bool {
        self.owner_id == user || self.members.contains(&user)
    }

    /// Refreshes `updated_at`; called by every mutating write path.
    pub fn touch(&mut self) {
        self.updated_at = epoch_millis();
    }

    /// Checks record shape and the owner-membership rule.
    ///
    /// # Errors
    /// - `BlankProjectName` when the name is empty.
    /// - `OwnerNotMember` when `members` no longer lists the owner.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankProjectName);
        }
        if !self.members.contains(&self.owner_id) {
            return Err(ModelValidationError::OwnerNotMember);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::ModelValidationError;
    use uuid::Uuid;

    #[test]
    fn owner_is_sole_member_at_creation() {
        let owner = Uuid::new_v4();
        let project = Project::new("Sprint 9", "", owner);
        assert_eq!(project.members, vec![owner]);
        assert!(project.is_member(owner));
        assert!(project.task_ids.is_empty());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn non_member_is_rejected_by_membership_check() {
        let project = Project::new("Sprint 9", "", Uuid::new_v4());
        assert!(!project.is_member(Uuid::new_v4()));
    }

    #[test]
    fn validate_rejects_blank_name_and_lost_owner() {
        let owner = Uuid::new_v4();
        let mut project = Project::new("  ", "", owner);
        assert_eq!(
            project.validate(),
            Err(ModelValidationError::BlankProjectName)
        );

        project.name = "named".to_string();
        project.members.clear();
        assert_eq!(project.validate(), Err(ModelValidationError::OwnerNotMember));
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let mut project = Project::new("Sprint 9", "", Uuid::new_v4());
        let before = project.updated_at;
        project.touch();
        assert!(project.updated_at >= before);
    }
}
