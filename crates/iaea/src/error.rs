//! Result and Error types for the IAEA data module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, iaea::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `rnlib-iaea`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure during GET request to IAEA API
    #[error("request to IAEA API failed")]
    FailedRequest(#[from] minreq::Error),

    /// Failed to read or write CSV data
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Radiation type names not recognised
    #[error("failed infer radiation type from \"{hint:?}\"")]
    CouldNotInferRadType { hint: String },

    /// Generic error type for nom parser results
    #[error("parser failed: {0}")]
    ParseError(String),

    /// Invalid nuclide state for IAEA API queries
    #[error("IAEA API does not allow elements")]
    InvalidNuclideQuery,

    /// The API answered with one of its numbered error codes
    #[error("IAEA API error code {code}: {message}")]
    Request { code: u8, message: &'static str },

    /// A local data file exists but is not a usable table
    #[error("cached table {path:?} could not be parsed")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    /// Errors that should abort a dataset rather than skip a single lookup
    ///
    /// Local data that can not be read or written is fatal. API error codes
    /// and failed requests are not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CacheCorrupt { .. } | Error::Io(_))
    }
}
