//! Error types for the entity layer.

use crate::entity::EntityId;

/// Errors raised by entity collections, time construction and scene documents.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EntityError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Times must be finite.
    #[error("invalid time value: {0}")]
    InvalidTime(f64),

    /// An entity with this id is already in the collection.
    #[error("entity '{0}' is already in the collection")]
    DuplicateId(EntityId),

    /// No entity with this id is in the collection.
    #[error("entity '{0}' is not in the collection")]
    NotFound(EntityId),

    /// `resume_events` was called more often than `suspend_events`.
    #[error("resume_events called without a matching suspend_events")]
    EventsNotSuspended,

    /// A scene document could not be parsed or failed validation.
    #[error("scene document error: {0}")]
    Document(String),
}
