//! Project use-cases: the project half of the mutation pipeline.
//!
//! # Responsibility
//! - Drive fetch -> authorize -> validate -> persist -> publish for project
//!   writes, and the membership-filtered read paths.
//! - Maintain the project/task link on cascade deletion.
//!
//! # Invariants
//! - The owner is fixed at creation and the member list only grows.
//! - On deletion, `task_ids` is cleared and persisted before the task
//!   records are cascaded away, so no reader ever follows a dangling id.
//! - An event is published only after every persist step succeeded.

use log::info;

use crate::access::{decide, AccessRequest};
use crate::client::cache::ReadGateway;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::{ProjectId, UserId};
use crate::realtime::event::{ChangeEvent, EventKind};
use crate::realtime::gateway::SessionGateway;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::service::{ServiceError, ServiceResult};

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}

/// Partial update for project metadata; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Service facade over project persistence plus the fan-out gateway.
#[derive(Debug, Clone)]
pub struct ProjectService<S>
where
    S: ProjectRepository + TaskRepository,
{
    store: S,
    gateway: SessionGateway,
}

impl<S> ProjectService<S>
where
    S: ProjectRepository + TaskRepository,
{
    pub fn new(store: S, gateway: SessionGateway) -> Self {
        Self { store, gateway }
    }

    /// Creates a project owned by `actor`.
    ///
    /// Payload shape is checked before anything else; creation has no
    /// resource to fetch and any authenticated actor is allowed.
    pub fn create_project(&self, actor: UserId, input: NewProject) -> ServiceResult<Project> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "project name is required".to_string(),
            ));
        }
        decide(actor, &AccessRequest::CreateProject).into_result()?;

        let project = Project::new(input.name, input.description, actor);
        self.store.create_project(&project)?;

        self.gateway
            .publish(ChangeEvent::project(EventKind::Created, project.id));
        info!(
            "event=project_created module=service project={} owner={actor}",
            project.id
        );
        Ok(project)
    }

    /// Projects `actor` owns or belongs to, most recently updated first.
    pub fn list_projects(&self, actor: UserId) -> ServiceResult<Vec<Project>> {
        Ok(self.store.list_projects_for(actor)?)
    }

    /// Loads one project, enforcing the member-or-owner view rule.
    pub fn get_project(&self, actor: UserId, id: ProjectId) -> ServiceResult<Project> {
        let project = self
            .store
            .get_project(id)?
            .ok_or(ServiceError::NotFound(id))?;
        decide(actor, &AccessRequest::ViewProject(&project)).into_result()?;
        Ok(project)
    }

    /// Applies a metadata patch; owner only.
    pub fn update_project(
        &self,
        actor: UserId,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> ServiceResult<Project> {
        let mut project = self
            .store
            .get_project(id)?
            .ok_or(ServiceError::NotFound(id))?;
        decide(actor, &AccessRequest::UpdateProject(&project)).into_result()?;

        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::InvalidInput(
                    "project name must not be blank".to_string(),
                ));
            }
        }

        if let Some(name) = patch.name {
            project.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        project.touch();
        self.store.update_project(&project)?;

        self.gateway
            .publish(ChangeEvent::project(EventKind::Updated, project.id));
        info!("event=project_updated module=service project={id} actor={actor}");
        Ok(project)
    }

    /// Deletes a project and cascades over its tasks; owner only.
    pub fn delete_project(&self, actor: UserId, id: ProjectId) -> ServiceResult<()> {
        let mut project = self
            .store
            .get_project(id)?
            .ok_or(ServiceError::NotFound(id))?;
        decide(actor, &AccessRequest::DeleteProject(&project)).into_result()?;

        // Unlink first: readers following task_ids must never see ids whose
        // records are already gone.
        project.task_ids.clear();
        project.touch();
        self.store.update_project(&project)?;

        let cascaded = self.store.delete_tasks_for_project(id)?;
        self.store.delete_project(id)?;

        self.gateway
            .publish(ChangeEvent::project(EventKind::Deleted, id));
        info!(
            "event=project_deleted module=service project={id} actor={actor} cascaded_tasks={cascaded}"
        );
        Ok(())
    }

    /// Adds a member; owner only, duplicates denied with `ALREADY_MEMBER`.
    pub fn add_member(
        &self,
        actor: UserId,
        id: ProjectId,
        target: UserId,
    ) -> ServiceResult<Project> {
        let mut project = self
            .store
            .get_project(id)?
            .ok_or(ServiceError::NotFound(id))?;
        decide(
            actor,
            &AccessRequest::AddProjectMember {
                project: &project,
                target,
            },
        )
        .into_result()?;

        project.members.push(target);
        project.touch();
        self.store.update_project(&project)?;

        self.gateway
            .publish(ChangeEvent::project(EventKind::Updated, project.id));
        info!("event=project_member_added module=service project={id} member={target}");
        Ok(project)
    }
}

/// The server read path clients reconcile against: project metadata under
/// the view rule, task collections under the relaxed-read policy.
impl<S> ReadGateway for ProjectService<S>
where
    S: ProjectRepository + TaskRepository,
{
    fn fetch_projects(&self, viewer: UserId) -> ServiceResult<Vec<Project>> {
        self.list_projects(viewer)
    }

    fn fetch_project(&self, viewer: UserId, project: ProjectId) -> ServiceResult<Project> {
        self.get_project(viewer, project)
    }

    fn fetch_project_tasks(&self, _viewer: UserId, project: ProjectId) -> ServiceResult<Vec<Task>> {
        Ok(self.store.list_tasks_for_project(project)?)
    }
}
