//! User repository contract.

use crate::model::user::User;
use crate::model::UserId;
use crate::repo::RepoResult;

/// Persistence contract for user identity records.
///
/// # Contract
/// - `create_user` enforces `User::validate()` and uniqueness of `email`
///   and `handle` (`RepoError::Duplicate`).
/// - Lookups compare the normalized (lowercased/trimmed) values records are
///   stored with.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn find_user_by_handle(&self, handle: &str) -> RepoResult<Option<User>>;
}
