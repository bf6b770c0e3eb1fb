use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading results or rendering the chart.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Input file does not exist
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Missing columns, malformed rows or non-numeric values
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chart drawing, font or image encoding failure
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration file or values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlotError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PlotError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
