//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, the session registry, and business
//! rules. They depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod auth;
pub mod chat;
pub mod hash;

#[cfg(test)]
pub(crate) mod testing;
