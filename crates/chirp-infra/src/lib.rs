//! # Chirp Infrastructure
//!
//! Concrete implementations of the ports defined in `chirp-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT validation

pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

use std::sync::Arc;

use chirp_core::ports::Stores;

// Re-exports - In-Memory
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, postgres_stores};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

/// A fresh in-memory store wired as every engine port.
pub fn in_memory_stores() -> Stores {
    Arc::new(InMemoryStore::new()).stores()
}
