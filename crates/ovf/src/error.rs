//! Result and Error types for mmtools-ovf

use std::path::PathBuf;

/// Type alias for Result<T, ovf::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `mmtools-ovf` crate
///
/// Every variant is fatal to the file being read, and no [Simulation] is
/// produced. Recoverable problems are reported as a
/// [Warning](crate::Warning) instead.
///
/// [Simulation]: crate::Simulation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    #[error("reached end of file before \"# Begin: Data\"")]
    UnexpectedEndOfFile,

    #[error("missing required header key \"{0}\"")]
    MissingHeaderKey(String),

    #[error("invalid value {value:?} for header key \"{key}\"")]
    InvalidHeaderValue { key: String, value: String },

    #[error("malformed vector on line {line} ({content:?})")]
    MalformedVectorLine { line: usize, content: String },

    #[error("invalid geometry {0:?}, cell counts must be at least 1 and their product representable")]
    InvalidGeometry([usize; 3]),

    #[error("unsupported OVF data representation \"{0}\", only text is readable")]
    UnsupportedFormat(String),

    #[error("inconsistent geometry across files (expected {expected:?}, found {found:?})")]
    InconsistentGeometry {
        expected: [usize; 3],
        found: [usize; 3],
    },

    #[error("failed to read {path:?}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The underlying error, without any file context
    ///
    /// Errors raised while reading from a path are wrapped in [Error::File]
    /// to identify the file. This unwraps those layers so that the kind of
    /// failure can be matched directly.
    ///
    /// ```rust
    /// # use mmtools_ovf::Error;
    /// let error = Error::MissingHeaderKey("xnodes".into()).in_file("m000000.ovf");
    /// assert!(matches!(error.root(), Error::MissingHeaderKey(key) if key == "xnodes"));
    /// ```
    pub fn root(&self) -> &Error {
        match self {
            Error::File { source, .. } => source.root(),
            other => other,
        }
    }

    /// Attach the identity of the file being read
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
