//! Authentication service: registration, login, logout.
//!
//! Credentials are verified against the user repository; successful logins
//! open a session in the shared [`SessionRegistry`].

use std::sync::Arc;

use chatapp_types::error::{AuthError, RepositoryError};
use chatapp_types::message::BROADCAST_RECIPIENT;
use chatapp_types::session::Session;
use chatapp_types::user::{NewUser, User, validate_username};
use tracing::{error, info, warn};

use crate::repository::user::UserRepository;
use crate::service::hash::PasswordHasher;
use crate::session::SessionRegistry;

/// Service handling user accounts and login sessions.
///
/// Generic over the repository and hasher so chatapp-core never depends on
/// chatapp-infra.
pub struct AuthService<U: UserRepository, H: PasswordHasher> {
    user_repo: U,
    hasher: H,
    sessions: Arc<SessionRegistry>,
}

impl<U: UserRepository, H: PasswordHasher> AuthService<U, H> {
    pub fn new(user_repo: U, hasher: H, sessions: Arc<SessionRegistry>) -> Self {
        Self {
            user_repo,
            hasher,
            sessions,
        }
    }

    /// The session registry shared with the chat service.
    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown users, inactive users, and wrong passwords all yield
    /// `InvalidCredentials` so callers cannot probe which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let creds = self
            .user_repo
            .find_credentials(username)
            .await
            .map_err(|e| {
                error!(%username, error = %e, "database error during authentication");
                AuthError::Storage(e.to_string())
            })?;

        let Some(creds) = creds else {
            warn!(%username, "login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !creds.user.is_active {
            warn!(%username, "login attempt for inactive user");
            return Err(AuthError::InvalidCredentials);
        }

        if !self.hasher.verify(password, &creds.password_hash).await? {
            warn!(%username, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.sessions.open(username);
        info!(%username, "user logged in");
        Ok(session)
    }

    /// Create a new account. The password is hashed before it is stored.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        validate_username(username).map_err(AuthError::InvalidUsername)?;
        if username.eq_ignore_ascii_case(BROADCAST_RECIPIENT) {
            return Err(AuthError::InvalidUsername(format!(
                "'{BROADCAST_RECIPIENT}' is reserved"
            )));
        }

        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        let new_user = NewUser {
            username: username.to_string(),
            password_hash: self.hasher.hash(password).await?,
            email,
        };

        let user = self
            .user_repo
            .create(&new_user)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken(username.to_string()),
                other => {
                    error!(%username, error = %other, "error registering user");
                    AuthError::Storage(other.to_string())
                }
            })?;

        info!(%username, user_id = user.id, "user registered");
        Ok(user)
    }

    /// End the user's session. Returns whether one was open.
    pub fn logout(&self, username: &str) -> bool {
        let closed = self.sessions.close(username.trim());
        if closed {
            info!(username = %username.trim(), "user logged out");
        }
        closed
    }

    pub fn is_logged_in(&self, username: &str) -> bool {
        self.sessions.is_active(username.trim())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.user_repo
            .list()
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{MemoryUserRepository, PlainHasher};

    fn service() -> AuthService<MemoryUserRepository, PlainHasher> {
        AuthService::new(
            MemoryUserRepository::default(),
            PlainHasher,
            Arc::new(SessionRegistry::new()),
        )
    }

    #[tokio::test]
    async fn register_then_login_opens_session() {
        let auth = service();
        auth.register("alice", "s3cret", Some("alice@example.com"))
            .await
            .unwrap();

        let session = auth.authenticate("alice", "s3cret").await.unwrap();

        assert_eq!(session.username, "alice");
        assert!(auth.is_logged_in("alice"));
    }

    #[tokio::test]
    async fn register_stores_hashed_password_and_email() {
        let auth = service();
        let user = auth.register("alice", "pw", Some("  a@b.c ")).await.unwrap();

        assert_eq!(user.email.as_deref(), Some("a@b.c"));
        let stored = auth.user_repo.users.lock().unwrap()[0].password_hash.clone();
        assert_eq!(stored, "plain$pw");
    }

    #[tokio::test]
    async fn register_blank_email_is_none() {
        let auth = service();
        let user = auth.register("alice", "pw", Some("   ")).await.unwrap();
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn register_duplicate_is_taken() {
        let auth = service();
        auth.register("alice", "pw", None).await.unwrap();

        let err = auth.register("alice", "other", None).await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken(name) if name == "alice"));
    }

    #[tokio::test]
    async fn register_requires_both_fields() {
        let auth = service();
        assert!(matches!(
            auth.register("", "pw", None).await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.register("alice", "", None).await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn register_rejects_reserved_and_malformed_names() {
        let auth = service();
        assert!(matches!(
            auth.register("broadcast", "pw", None).await,
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(matches!(
            auth.register("bad name", "pw", None).await,
            Err(AuthError::InvalidUsername(_))
        ));
    }

    #[tokio::test]
    async fn register_storage_failure_is_reported() {
        let auth = AuthService::new(
            MemoryUserRepository::failing(),
            PlainHasher,
            Arc::new(SessionRegistry::new()),
        );
        let err = auth.register("alice", "pw", None).await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
    }

    #[tokio::test]
    async fn login_wrong_password_fails_without_session() {
        let auth = service();
        auth.register("alice", "right", None).await.unwrap();

        let err = auth.authenticate("alice", "wrong").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!auth.is_logged_in("alice"));
    }

    #[tokio::test]
    async fn login_unknown_user_fails() {
        let auth = service();
        let err = auth.authenticate("nobody", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_inactive_user_fails() {
        let auth = service();
        auth.register("alice", "pw", None).await.unwrap();
        auth.user_repo.deactivate("alice");

        let err = auth.authenticate("alice", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_missing_fields() {
        let auth = service();
        assert!(matches!(
            auth.authenticate("  ", "pw").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn login_storage_failure_is_reported() {
        let auth = AuthService::new(
            MemoryUserRepository::failing(),
            PlainHasher,
            Arc::new(SessionRegistry::new()),
        );
        let err = auth.authenticate("alice", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(!auth.is_logged_in("alice"));
    }

    #[tokio::test]
    async fn logout_closes_session_and_is_idempotent() {
        let auth = service();
        auth.register("alice", "pw", None).await.unwrap();
        auth.authenticate("alice", "pw").await.unwrap();

        assert!(auth.logout("alice"));
        assert!(!auth.is_logged_in("alice"));
        assert!(!auth.logout("alice"));
    }

    #[tokio::test]
    async fn list_users_sorted() {
        let auth = service();
        auth.register("carol", "pw", None).await.unwrap();
        auth.register("alice", "pw", None).await.unwrap();

        let names: Vec<String> = auth
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }
}
