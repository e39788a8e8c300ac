//! Error types for world and body operations.

use thiserror::Error;

use crate::domain::BodyId;

/// Errors surfaced to callers of the physics world.
///
/// Per-pair contact failures are not here: the resolver skips those pairs and the
/// step carries on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A body with this id is already registered.
    #[error("duplicate body id: {0}")]
    DuplicateId(BodyId),

    /// Negative radius or non-positive rectangle extents.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Non-finite state or out-of-range material parameters.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// World configuration that would make stepping ill-defined.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No body with this id exists.
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),
}

impl PhysicsError {
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
