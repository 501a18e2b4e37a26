//! Error types for codeclash storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A document a patch operation targets does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The collection the document belongs to.
        entity: &'static str,
        /// The id that did not resolve.
        id: String,
    },
}

impl StoreError {
    /// Convenience constructor for [`StoreError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
