//! In-memory login session registry.

pub mod registry;

pub use registry::SessionRegistry;
