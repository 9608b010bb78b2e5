use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while drawing on the contribution graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// The text contains a character the font has no glyph for
    #[error("'{character}' character not supported\nCharset: {charset}")]
    UnsupportedCharacter { character: char, charset: Arc<String> },

    /// A required input (such as the text to draw) was not provided
    #[error("Option --{field} required")]
    MissingRequiredInput { field: Arc<String> },

    /// Options that are inconsistent or out of range
    #[error("Configuration error: {0}")]
    InvalidConfiguration(Arc<String>),

    /// The start date could not be parsed
    #[error("Invalid start date '{input}': {message}")]
    InvalidStartDate { input: Arc<String>, message: Arc<String> },

    /// A font definition violates the glyph rules
    #[error("Invalid font: {0}")]
    InvalidFont(Arc<String>),

    /// The configuration file could not be read or parsed
    #[error("Failed to load config {path}: {message}")]
    ConfigLoadError { path: PathBuf, message: Arc<String> },

    /// An external git command failed
    #[error("Command `{command}` failed ({status}): {stderr}")]
    EmitterFailure {
        command: Arc<String>,
        status: Arc<String>,
        stderr: Arc<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for Result with GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Shorthand for a configuration error with a formatted message
    pub fn config(message: impl Into<String>) -> Self {
        GraphError::InvalidConfiguration(Arc::new(message.into()))
    }

    /// Shorthand for a font error with a formatted message
    pub fn font(message: impl Into<String>) -> Self {
        GraphError::InvalidFont(Arc::new(message.into()))
    }

    /// Whether the error was raised before any side effect took place
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GraphError::UnsupportedCharacter { .. }
                | GraphError::MissingRequiredInput { .. }
                | GraphError::InvalidConfiguration(_)
                | GraphError::InvalidStartDate { .. }
                | GraphError::InvalidFont(_)
                | GraphError::ConfigLoadError { .. }
        )
    }
}
