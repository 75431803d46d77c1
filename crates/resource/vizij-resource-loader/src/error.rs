use thiserror::Error;

/// Failure to resolve or load an external resource.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The deferred URL itself failed to resolve.
    #[error("url could not be resolved: {0}")]
    Unresolved(String),

    /// The request completed with a non-success status.
    #[error("request for '{url}' failed with status {status}")]
    Status { url: String, status: u16 },

    /// The request could not be completed (I/O, network, missing file).
    #[error("request for '{url}' failed: {message}")]
    Request { url: String, message: String },

    #[error("image '{url}' could not be created: {message}")]
    Image { url: String, message: String },
}
