//! In-memory reference store implementing every repository contract.
//!
//! # Responsibility
//! - Provide the storage backend used by tests and local wiring.
//! - Demonstrate the locking discipline a store implementation needs under
//!   concurrent pipeline calls.
//!
//! # Invariants
//! - A cloned `MemStore` shares state with its source; clones are cheap
//!   handles, not snapshots.
//! - Every method takes the lock once; no lock is held across calls, so a
//!   fetch-modify-persist sequence in a service is *not* serialized here.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::model::{ProjectId, TaskId, UserId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};

#[derive(Debug, Default)]
struct MemTables {
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

/// Cloneable handle over shared in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    tables: Arc<RwLock<MemTables>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemStore {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        let mut tables = self.tables.write();
        if tables.users.values().any(|other| other.email == user.email) {
            return Err(RepoError::Duplicate("email"));
        }
        if tables
            .users
            .values()
            .any(|other| other.handle == user.handle)
        {
            return Err(RepoError::Duplicate("handle"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let needle = email.trim().to_ascii_lowercase();
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|user| user.email == needle)
            .cloned())
    }

    fn find_user_by_handle(&self, handle: &str) -> RepoResult<Option<User>> {
        let needle = handle.trim();
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|user| user.handle == needle)
            .cloned())
    }
}

impl ProjectRepository for MemStore {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;
        self.tables
            .write()
            .projects
            .insert(project.id, project.clone());
        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        Ok(self.tables.read().projects.get(&id).cloned())
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let mut tables = self.tables.write();
        if !tables.projects.contains_key(&project.id) {
            return Err(RepoError::NotFound(project.id));
        }
        tables.projects.insert(project.id, project.clone());
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        if self.tables.write().projects.remove(&id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_projects_for(&self, user: UserId) -> RepoResult<Vec<Project>> {
        let tables = self.tables.read();
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|project| project.is_member(user))
            .cloned()
            .collect();
        projects.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(projects)
    }
}

impl TaskRepository for MemStore {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        self.tables.write().tasks.insert(task.id, task.clone());
        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.tables.read().tasks.get(&id).cloned())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let mut tables = self.tables.write();
        if !tables.tasks.contains_key(&task.id) {
            return Err(RepoError::NotFound(task.id));
        }
        tables.tasks.insert(task.id, task.clone());
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        if self.tables.write().tasks.remove(&id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_tasks_for_project(&self, project: ProjectId) -> RepoResult<Vec<Task>> {
        let tables = self.tables.read();
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|task| task.project_id == project)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    fn delete_tasks_for_project(&self, project: ProjectId) -> RepoResult<usize> {
        let mut tables = self.tables.write();
        let doomed: Vec<TaskId> = tables
            .tasks
            .values()
            .filter(|task| task.project_id == project)
            .map(|task| task.id)
            .collect();
        for id in &doomed {
            tables.tasks.remove(id);
        }
        Ok(doomed.len())
    }
}
