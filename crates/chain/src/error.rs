//! Result and Error types for decay chain processing

// external crates
use log::warn;

/// Type alias for `Result<T, chain::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `rnlib-chain`
pub enum Error {
    /// Failure in the underlying data provider
    #[error("data provider failure")]
    Provider(#[from] rnlib_iaea::Error),

    /// Dataset configuration is unusable
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// Errors that abort the current dataset
    ///
    /// Configuration problems are always fatal, provider errors only if the
    /// provider says so.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Provider(e) => e.is_fatal(),
            Error::Configuration(_) => true,
        }
    }
}

/// Downgrade non-fatal provider errors to missing data
///
/// A single failed lookup is logged and treated as unavailable, anything
/// fatal is passed on.
pub(crate) fn tolerate<T>(
    result: rnlib_iaea::Result<Option<T>>,
    what: impl std::fmt::Display,
) -> Result<Option<T>> {
    match result {
        Ok(table) => Ok(table),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            warn!("Skipping {what}: {e}");
            Ok(None)
        }
    }
}
