//! Error types for visualizers.

use vizij_entity_core::EntityError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VisualizerError {
    /// A required reference or value was missing or malformed. Fix the argument
    /// before retrying.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The visualizer was destroyed; no further calls are allowed.
    #[error("visualizer has been destroyed")]
    Destroyed,
}

impl From<EntityError> for VisualizerError {
    fn from(err: EntityError) -> Self {
        VisualizerError::InvalidArgument(err.to_string())
    }
}
