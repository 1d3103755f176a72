//! PasswordHasher trait for credential storage.
//!
//! Defined in chatapp-core so services can hash and verify passwords without
//! coupling to a specific algorithm. The Argon2 adapter lives in chatapp-infra.

use chatapp_types::error::AuthError;

/// Abstraction over one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    fn hash(
        &self,
        password: &str,
    ) -> impl std::future::Future<Output = Result<String, AuthError>> + Send;

    /// Check a plaintext password against a hash produced by [`Self::hash`].
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only if the hash is unreadable.
    fn verify(
        &self,
        password: &str,
        hash: &str,
    ) -> impl std::future::Future<Output = Result<bool, AuthError>> + Send;
}
