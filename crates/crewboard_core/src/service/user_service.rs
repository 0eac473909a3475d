//! User registration use-cases.
//!
//! Registration is the only user mutation the core exposes; identity fields
//! are immutable afterwards. No fan-out happens here because user records
//! are not scoped to any project room.

use log::info;

use crate::model::user::User;
use crate::model::UserId;
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};

/// Payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub handle: String,
    pub avatar_url: Option<String>,
}

/// Service facade over the user repository.
#[derive(Debug, Clone)]
pub struct UserService<S: UserRepository> {
    store: S,
}

impl<S: UserRepository> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers an account after shape validation; uniqueness of email and
    /// handle is enforced by the store.
    ///
    /// # Errors
    /// - `InvalidInput` for a malformed email, blank handle, or a value that
    ///   is already taken.
    pub fn register_user(&self, input: NewUser) -> ServiceResult<User> {
        let mut user = User::new(input.email, input.handle);
        user.avatar_url = input.avatar_url;
        user.validate()?;

        self.store.create_user(&user)?;
        info!("event=user_registered module=service user={}", user.id);
        Ok(user)
    }

    /// Loads one account by id.
    pub fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.store.get_user(id)?.ok_or(ServiceError::NotFound(id))
    }
}
