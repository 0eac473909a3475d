//! Reconciliation cache and its read-side projections.
//!
//! The cache holds what one viewer currently knows. REST-confirmed writes
//! are merged by upsert; pushed events trigger a full refetch of the
//! affected project's state, which makes convergence independent of event
//! payloads, ordering and duplication. Presentation groupings are computed
//! from the authoritative task collection on every call and never stored.

use std::collections::HashMap;

use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};
use crate::model::{ProjectId, UserId};
use crate::realtime::event::{ChangeEvent, EventKind, ResourceKind};
use crate::service::{ServiceError, ServiceResult};

/// Server read path the cache reconciles against.
///
/// Implemented by the project service so a client (or a test) can wire a
/// cache directly to the pipeline it receives events from.
pub trait ReadGateway {
    /// Projects the viewer owns or belongs to, most recently updated first.
    fn fetch_projects(&self, viewer: UserId) -> ServiceResult<Vec<Project>>;
    /// One project under the member-or-owner view rule.
    fn fetch_project(&self, viewer: UserId, project: ProjectId) -> ServiceResult<Project>;
    /// The project's full task collection, soonest due first.
    fn fetch_project_tasks(&self, viewer: UserId, project: ProjectId) -> ServiceResult<Vec<Task>>;
}

/// Status-partitioned view over one cached task collection.
///
/// Column order inside each lane follows the cached collection (due date
/// ascending); the lanes themselves are recomputed on every call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

/// One viewer's locally known projects and tasks.
#[derive(Debug)]
pub struct ClientCache<R: ReadGateway> {
    reader: R,
    viewer: UserId,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<ProjectId, Vec<Task>>,
}

impl<R: ReadGateway> ClientCache<R> {
    pub fn new(reader: R, viewer: UserId) -> Self {
        Self {
            reader,
            viewer,
            projects: HashMap::new(),
            tasks: HashMap::new(),
        }
    }

    pub fn viewer(&self) -> UserId {
        self.viewer
    }

    /// Replaces the cached project list with the viewer's current one.
    pub fn load_projects(&mut self) -> ServiceResult<()> {
        let projects = self.reader.fetch_projects(self.viewer)?;
        self.projects = projects
            .into_iter()
            .map(|project| (project.id, project))
            .collect();
        Ok(())
    }

    /// Replaces the cached task collection for one project.
    pub fn load_project_tasks(&mut self, project: ProjectId) -> ServiceResult<()> {
        let tasks = self.reader.fetch_project_tasks(self.viewer, project)?;
        self.tasks.insert(project, tasks);
        Ok(())
    }

    /// Merges a REST-confirmed project (create/update response) by upsert.
    pub fn record_project(&mut self, project: Project) {
        self.projects.insert(project.id, project);
    }

    /// Drops a project (REST-confirmed delete) and its task collection.
    pub fn remove_project(&mut self, project: ProjectId) {
        self.projects.remove(&project);
        self.tasks.remove(&project);
    }

    /// Merges a REST-confirmed task (create/update response) by upsert:
    /// replaces the entry with the same id or appends, never duplicates.
    pub fn record_task(&mut self, task: Task) {
        let collection = self.tasks.entry(task.project_id).or_default();
        match collection.iter_mut().find(|known| known.id == task.id) {
            Some(known) => *known = task,
            None => collection.push(task),
        }
    }

    /// Reconciles one pushed event.
    ///
    /// Every event invalidates the affected project wholesale; only a
    /// project deletion (or a refetch that answers `NotFound`/`Forbidden`)
    /// evicts instead of refreshing. Errors other than those two are
    /// returned so the caller can retry; the cache is left on its previous
    /// consistent state.
    pub fn apply_event(&mut self, event: &ChangeEvent) -> ServiceResult<()> {
        match (event.resource, event.kind) {
            (ResourceKind::Project, EventKind::Deleted) => {
                self.remove_project(event.project_id);
                Ok(())
            }
            _ => self.refresh_project(event.project_id),
        }
    }

    fn refresh_project(&mut self, project: ProjectId) -> ServiceResult<()> {
        match self.reader.fetch_project(self.viewer, project) {
            Ok(record) => {
                self.projects.insert(record.id, record);
            }
            Err(ServiceError::NotFound(_)) | Err(ServiceError::Forbidden(_)) => {
                self.remove_project(project);
                return Ok(());
            }
            Err(other) => return Err(other),
        }

        let tasks = self.reader.fetch_project_tasks(self.viewer, project)?;
        self.tasks.insert(project, tasks);
        Ok(())
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Cached projects, most recently updated first (mirrors the server
    /// listing order so a reload does not reshuffle the view).
    pub fn projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        projects
    }

    /// Cached task collection for one project; empty when unknown.
    pub fn tasks_for(&self, project: ProjectId) -> &[Task] {
        self.tasks.get(&project).map_or(&[], Vec::as_slice)
    }

    /// Kanban projection over the cached collection; never persisted and
    /// therefore never out of sync with `tasks_for`.
    pub fn board(&self, project: ProjectId) -> Board<'_> {
        let mut board = Board::default();
        for task in self.tasks_for(project) {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        board
    }
}
