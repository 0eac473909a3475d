//! Entity store contracts and the in-memory reference implementation.
//!
//! # Responsibility
//! - Define use-case oriented persistence contracts per entity.
//! - Keep every storage detail behind these traits so services stay
//!   storage-agnostic.
//!
//! # Invariants
//! - Write paths must enforce record `validate()` before persisting.
//! - Missing records surface as semantic `NotFound` errors, distinct from
//!   transport-level `Storage` failures.
//! - Each single-record write is atomic; no cross-record transaction is
//!   offered or assumed.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};

use uuid::Uuid;

use crate::model::ModelValidationError;

pub mod memory;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query error shared by all entity repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Record failed shape validation before the write.
    Validation(ModelValidationError),
    /// No record with this id exists.
    NotFound(Uuid),
    /// A unique field already holds this value; carries the field name.
    Duplicate(&'static str),
    /// Backend failure unrelated to the request's semantics.
    Storage(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Duplicate(field) => write!(f, "duplicate value for unique field `{field}`"),
            Self::Storage(detail) => write!(f, "storage failure: {detail}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}
