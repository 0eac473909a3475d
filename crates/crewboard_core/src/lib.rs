//! Collaboration core for shared project/task boards.
//! This crate is the single source of truth for who may change what, how a
//! confirmed change reaches every watching session, and how clients
//! reconcile what they see.

pub mod access;
pub mod auth;
pub mod client;
pub mod logging;
pub mod model;
pub mod realtime;
pub mod repo;
pub mod service;

pub use access::{decide, AccessRequest, Decision, DenyReason};
pub use auth::{Authenticator, TokenTable, Unauthenticated};
pub use client::cache::{Board, ClientCache, ReadGateway};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::Project;
pub use model::task::{Comment, Task, TaskPriority, TaskStatus};
pub use model::user::User;
pub use model::{
    epoch_millis, CommentId, ModelValidationError, ProjectId, TaskId, UserId,
};
pub use realtime::event::{room_name, ChangeEvent, EventKind, ResourceKind};
pub use realtime::gateway::{SessionGateway, SessionHandle};
pub use realtime::registry::RoomRegistry;
pub use realtime::SessionId;
pub use repo::memory::MemStore;
pub use repo::project_repo::ProjectRepository;
pub use repo::task_repo::TaskRepository;
pub use repo::user_repo::UserRepository;
pub use repo::{RepoError, RepoResult};
pub use service::project_service::{NewProject, ProjectPatch, ProjectService};
pub use service::task_service::{NewTask, TaskPatch, TaskService};
pub use service::user_service::{NewUser, UserService};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
