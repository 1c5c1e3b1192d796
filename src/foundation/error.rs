/// Convenience result type used across moviepack.
pub type MoviepackResult<T> = Result<T, MoviepackError>;

/// Top-level error taxonomy for packing, unpacking and audio extraction.
///
/// Recoverable asset misses never surface here: they downgrade the enclosing document element
/// instead. Every variant below aborts the whole operation.
#[derive(thiserror::Error, Debug)]
pub enum MoviepackError {
    /// Zero-length movie document passed to `pack`.
    #[error("empty document")]
    EmptyDocument,

    /// Asset reference string with fewer than two dotted segments.
    #[error("malformed reference: {0}")]
    MalformedReference(String),

    /// Required asset or record could not be found.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// Archive member declared by the manifest is absent or unreadable.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    /// Document or manifest failed to parse.
    #[error("malformed xml: {0}")]
    MalformedXml(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MoviepackError {
    /// Build a [`MoviepackError::MalformedReference`] value.
    pub fn malformed_reference(msg: impl Into<String>) -> Self {
        Self::MalformedReference(msg.into())
    }

    /// Build a [`MoviepackError::MissingAsset`] value.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Build a [`MoviepackError::CorruptArchive`] value.
    pub fn corrupt_archive(msg: impl Into<String>) -> Self {
        Self::CorruptArchive(msg.into())
    }

    /// Build a [`MoviepackError::MalformedXml`] value.
    pub fn malformed_xml(msg: impl Into<String>) -> Self {
        Self::MalformedXml(msg.into())
    }

    /// Whether a caller should report this as "not found" rather than a server fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MissingAsset(_) | Self::CorruptArchive(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
