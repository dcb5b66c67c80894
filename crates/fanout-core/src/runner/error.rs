//! Per-item failure recorded by the runner.

/// Why a single item failed. Never propagates past the runner; it is stored
/// as that item's result.
#[derive(Debug, thiserror::Error)]
pub enum ItemError<E> {
    /// The operation itself returned an error.
    #[error(transparent)]
    Operation(E),
    /// The unit of work panicked or was torn down by the runtime.
    #[error("task panicked: {0}")]
    Panicked(String),
}

impl<E> ItemError<E> {
    /// The operation error, if this failure came from the operation.
    pub fn operation(&self) -> Option<&E> {
        match self {
            ItemError::Operation(e) => Some(e),
            _ => None,
        }
    }
}
