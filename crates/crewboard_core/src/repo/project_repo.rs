//! Project repository contract.

use crate::model::project::Project;
use crate::model::{ProjectId, UserId};
use crate::repo::RepoResult;

/// Persistence contract for project records.
///
/// # Contract
/// - Writes enforce `Project::validate()` before persisting.
/// - `update_project` and `delete_project` report `NotFound` for unknown
///   ids instead of succeeding silently.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;

    /// Projects where `user` is the owner or a member, most recently
    /// updated first (ties broken by id for stable output).
    fn list_projects_for(&self, user: UserId) -> RepoResult<Vec<Project>>;
}
