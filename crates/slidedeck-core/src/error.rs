//! Error types for deck construction and navigation.

use thiserror::Error;

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors raised by the deck model
#[derive(Error, Debug)]
pub enum DeckError {
    /// Requested slide index is outside the deck
    #[error("Slide index {index} is out of range: deck has {len} slides")]
    OutOfRange { index: isize, len: usize },

    /// A deck needs at least one slide
    #[error("Deck has no slides")]
    EmptyDeck,

    /// Transition duration must be positive
    #[error("Invalid transition duration {duration_ms}ms: {context}")]
    InvalidDuration { duration_ms: u32, context: String },

    /// Heading level outside 1..=6
    #[error("Invalid heading level {level} on slide {slide}, node {node}: expected 1-6")]
    InvalidHeadingLevel { slide: usize, node: usize, level: u8 },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Deck file parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DeckError {
    /// Create an out of range error
    pub fn out_of_range(index: isize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create an invalid duration error
    pub fn invalid_duration(duration_ms: u32, context: impl Into<String>) -> Self {
        Self::InvalidDuration {
            duration_ms,
            context: context.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "DECK001",
            Self::EmptyDeck => "DECK002",
            Self::InvalidDuration { .. } => "DECK003",
            Self::InvalidHeadingLevel { .. } => "DECK004",
            Self::IoError(_) => "DECK005",
            Self::TomlError(_) => "DECK006",
        }
    }

    /// Whether a live session can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
