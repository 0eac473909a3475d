//! Task use-cases: the task half of the mutation pipeline.
//!
//! # Responsibility
//! - Drive fetch -> authorize -> validate -> persist -> publish for task
//!   writes, including the append-only comment thread.
//! - Maintain the parent project's `task_ids` link across create/delete.
//!
//! # Invariants
//! - Create/delete perform two single-record writes with no transaction;
//!   the transient window leaves at worst an orphaned id or an unlinked
//!   task, both invisible to `project_id`-filtered reads.
//! - An event is published only after every persist step succeeded.
//! - Task reads and comment appends pass the guard but are open to any
//!   authenticated actor (relaxed-read policy, flagged not fixed).

use log::info;

use crate::access::{decide, AccessRequest};
use crate::model::project::Project;
use crate::model::task::{Comment, Task, TaskPriority, TaskStatus};
use crate::model::{ProjectId, TaskId, UserId};
use crate::realtime::event::{ChangeEvent, EventKind};
use crate::realtime::gateway::SessionGateway;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Defaults to `MEDIUM` when absent.
    pub priority: Option<TaskPriority>,
    /// Due date as Unix epoch milliseconds.
    pub due_at: i64,
    pub assigned_to: UserId,
}

/// Partial update for task fields; `None` leaves a field untouched.
/// Assignment is deliberately not patchable through this operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_at: Option<i64>,
}

/// Service facade over task persistence plus the fan-out gateway.
#[derive(Debug, Clone)]
pub struct TaskService<S>
where
    S: ProjectRepository + TaskRepository + UserRepository,
{
    store: S,
    gateway: SessionGateway,
}

impl<S> TaskService<S>
where
    S: ProjectRepository + TaskRepository + UserRepository,
{
    pub fn new(store: S, gateway: SessionGateway) -> Self {
        Self { store, gateway }
    }

    fn project_of(&self, task: &Task) -> ServiceResult<Project> {
        self.store
            .get_project(task.project_id)?
            .ok_or(ServiceError::NotFound(task.project_id))
    }

    /// Creates a task inside `project_id`; any current member may do this.
    ///
    /// Payload shape is checked before the project fetch (creation
    /// ordering); the assignee must resolve to a known user but is not
    /// required to be a member.
    pub fn create_task(
        &self,
        actor: UserId,
        project_id: ProjectId,
        input: NewTask,
    ) -> ServiceResult<Task> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "task title is required".to_string(),
            ));
        }

        let mut project = self
            .store
            .get_project(project_id)?
            .ok_or(ServiceError::NotFound(project_id))?;
        decide(actor, &AccessRequest::CreateTask { project: &project }).into_result()?;

        if self.store.get_user(input.assigned_to)?.is_none() {
            return Err(ServiceError::InvalidInput(
                "assignee does not resolve to a known user".to_string(),
            ));
        }

        let mut task = Task::new(project_id, input.title, input.assigned_to, actor, input.due_at);
        task.description = input.description;
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        self.store.create_task(&task)?;

        // Second write of the non-transactional pair; a failure here leaves
        // an unlinked task that project_id-filtered reads still return.
        project.task_ids.push(task.id);
        project.touch();
        self.store.update_project(&project)?;

        self.gateway
            .publish(ChangeEvent::task(EventKind::Created, project_id, task.id));
        info!(
            "event=task_created module=service task={} project={project_id} actor={actor}",
            task.id
        );
        Ok(task)
    }

    /// Tasks of one project, soonest due first. Open read: the guard is
    /// consulted but requires no membership, and an unknown project yields
    /// an empty list rather than `NotFound`.
    pub fn list_project_tasks(
        &self,
        actor: UserId,
        project_id: ProjectId,
    ) -> ServiceResult<Vec<Task>> {
        decide(actor, &AccessRequest::ViewTask).into_result()?;
        Ok(self.store.list_tasks_for_project(project_id)?)
    }

    /// Loads one task by id. Open read, same policy as listing.
    pub fn get_task(&self, actor: UserId, id: TaskId) -> ServiceResult<Task> {
        decide(actor, &AccessRequest::ViewTask).into_result()?;
        self.store.get_task(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Applies a field patch; project owner or current assignee only.
    pub fn update_task(&self, actor: UserId, id: TaskId, patch: TaskPatch) -> ServiceResult<Task> {
        let mut task = self.store.get_task(id)?.ok_or(ServiceError::NotFound(id))?;
        let project = self.project_of(&task)?;
        decide(
            actor,
            &AccessRequest::UpdateTask {
                project: &project,
                task: &task,
            },
        )
        .into_result()?;

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ServiceError::InvalidInput(
                    "task title must not be blank".to_string(),
                ));
            }
        }

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_at) = patch.due_at {
            task.due_at = due_at;
        }
        task.touch();
        self.store.update_task(&task)?;

        self.gateway
            .publish(ChangeEvent::task(EventKind::Updated, task.project_id, id));
        info!(
            "event=task_updated module=service task={id} project={} status={}",
            task.project_id,
            task.status.as_str()
        );
        Ok(task)
    }

    /// Deletes a task; project owner only.
    pub fn delete_task(&self, actor: UserId, id: TaskId) -> ServiceResult<()> {
        let task = self.store.get_task(id)?.ok_or(ServiceError::NotFound(id))?;
        let mut project = self.project_of(&task)?;
        decide(actor, &AccessRequest::DeleteTask { project: &project }).into_result()?;

        // Unlink first so no reader follows the id into a deleted record.
        project.task_ids.retain(|linked| *linked != id);
        project.touch();
        self.store.update_project(&project)?;
        self.store.delete_task(id)?;

        self.gateway
            .publish(ChangeEvent::task(EventKind::Deleted, task.project_id, id));
        info!(
            "event=task_deleted module=service task={id} project={} actor={actor}",
            task.project_id
        );
        Ok(())
    }

    /// Appends a comment to a task's thread. Open append: any authenticated
    /// actor; text is validated after the fetch (id-addressed ordering).
    pub fn add_comment(
        &self,
        actor: UserId,
        id: TaskId,
        text: impl Into<String>,
    ) -> ServiceResult<Comment> {
        let mut task = self.store.get_task(id)?.ok_or(ServiceError::NotFound(id))?;

        let text = text.into();
        if text.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "comment text is required".to_string(),
            ));
        }
        decide(actor, &AccessRequest::CommentOnTask).into_result()?;

        let comment = Comment::new(actor, text);
        task.add_comment(comment.clone());
        task.touch();
        self.store.update_task(&task)?;

        self.gateway
            .publish(ChangeEvent::task(EventKind::Updated, task.project_id, id));
        info!(
            "event=task_comment_added module=service task={id} project={} author={actor}",
            task.project_id
        );
        Ok(comment)
    }
}
