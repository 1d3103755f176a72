//! User repository trait definition.

use chatapp_types::error::RepositoryError;
use chatapp_types::user::{NewUser, User, UserCredentials};

/// Repository trait for user account persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Returns `Conflict` if the username already exists.
    fn create(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Load a user with their stored password hash.
    fn find_credentials(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserCredentials>, RepositoryError>> + Send;

    /// List all users ordered by username.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;
}
