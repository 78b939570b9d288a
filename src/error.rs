//! Error types for rst2pdf-serve.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for rst2pdf-serve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building stylesheets, converting
/// documents, or serving the output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading, writing, or copying files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stylesheet could not be serialized to YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Font family is not one of the supported families.
    #[error("`{0}` is an invalid font name. Choose from: Mono, Sans, Serif")]
    InvalidFontFamily(String),

    /// Font attribute is not one of the supported attributes.
    #[error("`{0}` is an invalid font attribute. Choose from: Bold, Italic, Oblique")]
    InvalidFontAttr(String),

    /// Font size is outside the accepted range.
    #[error("Font size {0} is out of range ({1}-{2})")]
    InvalidFontSize(u32, u32, u32),

    /// Page size is not one of the supported sizes.
    #[error("`{0}` is an invalid page size")]
    InvalidPageSize(String),

    /// Orientation is neither portrait nor landscape.
    #[error("`{0}` is an invalid orientation. Choose from: portrait, landscape")]
    InvalidOrientation(String),

    /// Measurement does not match `<number>[.<decimal>](cm|in)`.
    #[error("`{0}` is an invalid measurement; expected a number followed by cm or in")]
    InvalidMeasurement(String),

    /// The source filename suffix could not be interpreted.
    #[error("This is an invalid suffix: '{0}'")]
    InvalidSuffix(String),

    /// A string is neither an IPv4 nor an IPv6 address.
    #[error("addr: {0} is an invalid address")]
    InvalidAddress(String),

    /// The webserver port was zero.
    #[error("Webserver port must not be 0")]
    InvalidPort,

    /// The terminal encoding label is unknown.
    #[error("Unknown terminal encoding: {0}")]
    UnknownEncoding(String),

    /// A required input file does not exist.
    #[error("{} must exist", .0.display())]
    FileNotFound(PathBuf),

    /// An external program could not be found.
    #[error("Program not found: {0}")]
    ToolNotFound(String),

    /// An external program could not be started.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The converter exited with a nonzero status.
    #[error("rst2pdf failed ({status}): {stderr}")]
    ConverterFailed {
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The converter reported success but did not write its output.
    #[error("Converter exited successfully but {} was not created", .0.display())]
    MissingOutput(PathBuf),

    /// The file server exited with a nonzero status.
    #[error("File server failed ({0})")]
    ServerFailed(String),

    /// The file server exited before it could have served anything.
    #[error("File server exited after {0:?}; it probably failed to bind")]
    ServerExitedEarly(Duration),

    /// No local addresses were found on this host.
    #[error("No ipv4_addrs or ipv6_addrs found")]
    NoAddresses,

    /// Local address listing is not implemented for this platform.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error comes from an invalid configuration value, which is
    /// always reported before any file or process work starts.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFontFamily(_)
                | Error::InvalidFontAttr(_)
                | Error::InvalidFontSize(..)
                | Error::InvalidPageSize(_)
                | Error::InvalidOrientation(_)
                | Error::InvalidMeasurement(_)
                | Error::InvalidSuffix(_)
                | Error::InvalidAddress(_)
                | Error::InvalidPort
                | Error::UnknownEncoding(_)
        )
    }
}
