//! Mutation pipeline services.
//!
//! # Responsibility
//! - Orchestrate fetch -> authorize -> validate -> persist -> publish for
//!   every exposed write operation.
//! - Map repository and guard failures into one caller-facing taxonomy.
//!
//! # Invariants
//! - Every guard denial surfaces as `Forbidden`; nothing is silently
//!   dropped or downgraded to success.
//! - A storage failure aborts the pipeline before any event is published;
//!   the fan-out event is the observable commit signal.
//! - The updated record is returned to the caller synchronously; fan-out is
//!   fire-and-forget relative to that response.
//!
//! # See also
//! - docs/architecture/access-policy.md

use std::error::Error;
use std::fmt::{Display, Formatter};

use uuid::Uuid;

use crate::access::DenyReason;
use crate::auth::Unauthenticated;
use crate::model::ModelValidationError;
use crate::repo::RepoError;

pub mod project_service;
pub mod task_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing failure for every exposed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The addressed resource id does not resolve.
    NotFound(Uuid),
    /// The guard denied the operation; carries the stable reason.
    Forbidden(DenyReason),
    /// Payload failed shape or reference validation.
    InvalidInput(String),
    /// No verified actor was presented.
    Unauthenticated,
    /// Persistence failed; no event was published for this request.
    Storage(String),
}

impl ServiceError {
    /// Stable machine-checkable code for transports and clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "resource not found: {id}"),
            Self::Forbidden(reason) => write!(f, "operation forbidden: {reason}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Unauthenticated => write!(f, "no verified actor for this request"),
            Self::Storage(detail) => write!(f, "storage failure: {detail}"),
        }
    }
}

impl Error for ServiceError {}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err.to_string()),
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Duplicate(field) => {
                Self::InvalidInput(format!("value for `{field}` is already taken"))
            }
            RepoError::Storage(detail) => Self::Storage(detail),
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<DenyReason> for ServiceError {
    fn from(value: DenyReason) -> Self {
        Self::Forbidden(value)
    }
}

impl From<Unauthenticated> for ServiceError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthenticated
    }
}
