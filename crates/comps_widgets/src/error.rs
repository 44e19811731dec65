//! Error types

use thiserror::Error;

/// Errors raised while loading widget configuration.
///
/// Widget operations themselves never fail; misuse such as a zero indicator
/// count is only caught when it comes from a config file.
#[derive(Error, Debug)]
pub enum CompsError {
    /// Failed to read a config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the expected shape
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds values the widgets cannot use
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, CompsError>;
