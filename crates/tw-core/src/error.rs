/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or loading documents.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A table with the same id already exists in the document.
    #[error("duplicate table id: \"{0}\"")]
    DuplicateTableId(String),

    /// A template with the same id already exists in the document.
    #[error("duplicate template id: \"{0}\"")]
    DuplicateTemplateId(String),

    /// A collection with the same slug is already loaded in the library.
    #[error("duplicate collection: \"{0}\"")]
    DuplicateCollection(String),

    /// The requested collection is not loaded in the library.
    #[error("unknown collection: \"{0}\"")]
    UnknownCollection(String),

    /// The document JSON could not be parsed or serialized.
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
