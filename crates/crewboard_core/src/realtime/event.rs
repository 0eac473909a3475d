//! Change notification envelope.
//!
//! Events carry coordinates only (kind, resource, project and record id),
//! never the mutated payload. Receivers are expected to refetch through the
//! read path, so a stale or duplicated event can do no harm.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ProjectId, TaskId};

/// What happened to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
}

impl EventKind {
    /// Stable wire name, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::Deleted => "DELETED",
        }
    }
}

/// Which resource family the event refers to.
///
/// Comment appends surface as `Task` updates; comments are never addressed
/// independently on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Project,
    Task,
}

impl ResourceKind {
    /// Stable wire name, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Task => "TASK",
        }
    }
}

/// One confirmed mutation, scoped to a project room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: EventKind,
    pub resource: ResourceKind,
    /// Room scope; every watcher of this project receives the event.
    pub project_id: ProjectId,
    /// Id of the mutated record (equals `project_id` for project events).
    pub resource_id: Uuid,
}

impl ChangeEvent {
    /// Event about the project record itself.
    pub fn project(kind: EventKind, project_id: ProjectId) -> Self {
        Self {
            kind,
            resource: ResourceKind::Project,
            project_id,
            resource_id: project_id,
        }
    }

    /// Event about one task inside a project.
    pub fn task(kind: EventKind, project_id: ProjectId, task_id: TaskId) -> Self {
        Self {
            kind,
            resource: ResourceKind::Task,
            project_id,
            resource_id: task_id,
        }
    }

    /// Name of the room this event is delivered to.
    pub fn room(&self) -> String {
        room_name(self.project_id)
    }
}

/// Room naming scheme: one room per project.
pub fn room_name(project: ProjectId) -> String {
    format!("project-{project}")
}
