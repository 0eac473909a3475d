//! Authorization guard for every project/task operation.
//!
//! # Responsibility
//! - Decide, from already-loaded records, whether an actor may perform an
//!   operation; return a stable reason code when it may not.
//! - Keep the whole policy in one table so route-level checks cannot drift
//!   apart.
//!
//! # Invariants
//! - `decide` is pure: no store access, no clock, no logging side effects.
//! - Every arm ends in an explicit `Allow` or `Deny`; there is no trailing
//!   allow-all.
//! - Task reads and comment appends are deliberately open to any
//!   authenticated actor (relaxed-read policy, kept visible here rather
//!   than silently tightened).
//!
//! # See also
//! - docs/architecture/access-policy.md

use std::fmt::{Display, Formatter};

use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::UserId;

/// One requested operation, carrying the records the rule needs.
///
/// Callers fetch the records first; a missing record is a `NotFound` and
/// never reaches this guard.
#[derive(Debug, Clone, Copy)]
pub enum AccessRequest<'a> {
    /// Any authenticated actor may create a project (becoming its owner).
    CreateProject,
    ViewProject(&'a Project),
    UpdateProject(&'a Project),
    DeleteProject(&'a Project),
    AddProjectMember {
        project: &'a Project,
        target: UserId,
    },
    CreateTask {
        project: &'a Project,
    },
    /// Open read; membership is not checked.
    ViewTask,
    UpdateTask {
        project: &'a Project,
        task: &'a Task,
    },
    DeleteTask {
        project: &'a Project,
    },
    /// Open append; membership is not checked.
    CommentOnTask,
}

/// Why an operation was denied; `code()` is the stable wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotOwner,
    NotMember,
    NotAssignee,
    AlreadyMember,
}

impl DenyReason {
    /// Stable machine-checkable reason code.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotOwner => "NOT_OWNER",
            Self::NotMember => "NOT_MEMBER",
            Self::NotAssignee => "NOT_ASSIGNEE",
            Self::AlreadyMember => "ALREADY_MEMBER",
        }
    }
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Guard verdict for one `(actor, request)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    fn allow_if(condition: bool, reason: DenyReason) -> Self {
        if condition {
            Self::Allow
        } else {
            Self::Deny(reason)
        }
    }

    /// Converts the verdict into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(reason),
        }
    }
}

/// Applies the policy table; first matching rule wins.
pub fn decide(actor: UserId, request: &AccessRequest<'_>) -> Decision {
    match request {
        AccessRequest::CreateProject => Decision::Allow,
        AccessRequest::ViewProject(project) => {
            Decision::allow_if(project.is_member(actor), DenyReason::NotMember)
        }
        AccessRequest::UpdateProject(project) | AccessRequest::DeleteProject(project) => {
            Decision::allow_if(project.owner_id == actor, DenyReason::NotOwner)
        }
        AccessRequest::AddProjectMember { project, target } => {
            if project.owner_id != actor {
                Decision::Deny(DenyReason::NotOwner)
            } else if project.members.contains(target) {
                Decision::Deny(DenyReason::AlreadyMember)
            } else {
                Decision::Allow
            }
        }
        AccessRequest::CreateTask { project } => {
            Decision::allow_if(project.is_member(actor), DenyReason::NotMember)
        }
        AccessRequest::ViewTask => Decision::Allow,
        AccessRequest::UpdateTask { project, task } => Decision::allow_if(
            project.owner_id == actor || task.assigned_to == actor,
            DenyReason::NotAssignee,
        ),
        AccessRequest::DeleteTask { project } => {
            Decision::allow_if(project.owner_id == actor, DenyReason::NotOwner)
        }
        AccessRequest::CommentOnTask => Decision::Allow,
    }
}
