//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Cloneable so the reconciler can keep the last failure around for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Storage read or write failed (quota, unavailable, serialization)
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Persisted payload matches neither the current nor a legacy shape
    #[error("Corrupt state: {0}")]
    CorruptState(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, DomainError::CorruptState(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Persistence(format!("serialization failed: {}", err))
    }
}
