//! Error types for MudraLock

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// MudraLock error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sensor transport failure (raw read or configuration)
    #[error("Sensor error: {0}")]
    Sensor(String),

    /// The two series handed to the correlation engine differ in length
    #[error("Series length mismatch: reference {reference} vs attempt {attempt}")]
    LengthMismatch {
        /// Reference gesture length
        reference: usize,
        /// Attempt gesture length
        attempt: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Gesture serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Stored gesture file is corrupt or from an unknown version
    #[error("Invalid gesture file: {0}")]
    InvalidFormat(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Error::Serialize(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
