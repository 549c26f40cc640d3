/// Errors produced by the library.
///
/// Every variant is a local precondition or format violation. Nothing here is
/// transient, so callers are expected to report and abort rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("wrong field count: expected {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("invalid format for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A record that failed validation, with the line it starts on.
    #[error("invalid record at line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: Box<LibraryError>,
    },

    #[error("csv error at line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("config error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        LibraryError::InvalidInput(message.into())
    }
}

pub type Result<T, E = LibraryError> = std::result::Result<T, E>;
