//! Task repository contract.

use crate::model::task::Task;
use crate::model::{ProjectId, TaskId};
use crate::repo::RepoResult;

/// Persistence contract for task records (embedded comments included).
///
/// # Contract
/// - Writes enforce `Task::validate()` before persisting.
/// - `list_tasks_for_project` filters by `project_id` directly rather than
///   walking the project's `task_ids` list, so an id orphaned by a failed
///   two-step write never surfaces a phantom task.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;

    /// Tasks belonging to `project`, soonest due date first (ties broken by
    /// id for stable output). Unknown projects yield an empty list.
    fn list_tasks_for_project(&self, project: ProjectId) -> RepoResult<Vec<Task>>;

    /// Removes every task belonging to `project`; returns how many records
    /// were deleted. Used by the project-deletion cascade.
    fn delete_tasks_for_project(&self, project: ProjectId) -> RepoResult<usize>;
}
