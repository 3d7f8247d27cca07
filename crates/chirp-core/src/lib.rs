//! # Chirp Core
//!
//! The domain layer of the Chirp backend: entities, invariants, store ports and the
//! timeline aggregation engine. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod presentation;
pub mod services;

pub use error::DomainError;
pub use services::Engine;
