//! Error types for story-tui

use thiserror::Error;

/// TUI-specific errors wrapping service and terminal failures
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libstorycast::StorycastError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),
}

pub type Result<T> = std::result::Result<T, TuiError>;
