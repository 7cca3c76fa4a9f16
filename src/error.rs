//! Error types for dochtml library.

use std::io;
use thiserror::Error;

/// Result type alias for dochtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but cannot be converted.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The DOCX container is malformed or incomplete.
    #[error("DOCX error: {0}")]
    Docx(String),

    /// Error reading the document markup.
    #[error("XML error: {0}")]
    Xml(String),

    /// Text could not be decoded or encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The configuration file is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required configuration key is absent.
    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    /// A configuration value could not be interpreted.
    #[error("Invalid value for configuration key {key}: {value:?}")]
    InvalidConfigValue {
        /// Offending key
        key: String,
        /// Raw value as written in the file
        value: String,
    },

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error comes from the layout configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::MissingConfigKey(_) | Error::InvalidConfigValue { .. }
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Docx(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingConfigKey("p-margin-top".to_string());
        assert_eq!(err.to_string(), "Missing configuration key: p-margin-top");

        let err = Error::InvalidConfigValue {
            key: "width".to_string(),
            value: "wide".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for configuration key width: \"wide\""
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::Docx(_)));
    }

    #[test]
    fn test_config_error_classification() {
        assert!(Error::Config("bad".into()).is_config_error());
        assert!(Error::MissingConfigKey("width".into()).is_config_error());
        assert!(!Error::UnknownFormat.is_config_error());
    }
}
