use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading data and driving the engine from disk
#[derive(Debug, Error)]
pub enum ForgeError {
    /// A file or directory could not be read or written
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A RON configuration or save document is malformed
    #[error("Malformed document {}: {details}", path.display())]
    Document { path: PathBuf, details: String },
    /// Personal table data is malformed or incomplete
    #[error("Malformed personal table data: {0}")]
    PersonalData(String),
    /// An entity file could not be decoded
    #[error("Malformed entity data: {0}")]
    EntityData(#[from] postcard::Error),
    /// A box operation was rejected by the save container
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Errors related to box storage of a save container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Box index is out of bounds
    #[error("Invalid box index: {index} (box count {count})")]
    InvalidIndex { index: usize, count: usize },
    /// The save type has no box storage at all
    #[error("Save has no box storage")]
    NoContainers,
}

impl ContainerError {
    /// Reserved count reported to callers that expect a signed result.
    pub const SENTINEL: i32 = -1;

    pub fn code(&self) -> i32 {
        Self::SENTINEL
    }
}

impl ForgeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForgeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for Results using ForgeError
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Type alias for Results using ContainerError
pub type ContainerResult<T> = Result<T, ContainerError>;
