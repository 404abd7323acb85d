//! Port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// No connection to the store could be obtained.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already taken.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, returning it with its generated key.
    async fn create_user(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by key.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
