//! Result and Error types for batch runs

/// Type alias for `Result<T, rnlib::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for the `rnlib` tool
pub enum Error {
    /// Reading or writing files failed
    #[error("failed to access a file")]
    Io(#[from] std::io::Error),

    /// Batch file or report could not be (de)serialised
    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    /// Library table could not be written
    #[error("failed to write the library table")]
    Csv(#[from] csv::Error),

    /// Failure in the decay data layer
    #[error("decay data failure")]
    Iaea(#[from] rnlib_iaea::Error),

    /// Failure while generating the library
    #[error("library generation failed")]
    Chain(#[from] rnlib_chain::Error),
}
