use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of a [`crate::Store`] operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An account with this email already exists (pre-check or UNIQUE constraint).
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// The registration points at an event the store does not hold.
    #[error("event {0} does not exist")]
    UnknownEvent(i64),

    /// A data file exists but is not a JSON array of the expected records.
    #[error("corrupt data file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized for writing back to `path`.
    #[error("could not encode records for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Anything the relational backend reports that has no dedicated variant.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
