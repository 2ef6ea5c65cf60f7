//! # slidedeck-core
//!
//! The navigable document model behind a talk.
//!
//! A [`Deck`] holds the ordered slides, the theme and the transition
//! settings, plus the one piece of mutable state: which slide is on screen.
//! Navigation is total on the slide range. `go_to_next` and `go_to_previous`
//! clamp (or wrap, per [`BoundaryPolicy`]) at the ends; only `go_to_index`
//! can fail, with [`DeckError::OutOfRange`].
//!
//! Drawing is someone else's job. [`Deck::render`] produces a
//! [`PaintSequence`] of theme-resolved instructions, and every move returns
//! the [`ResolvedTransition`] to animate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidedeck_core::Deck;
//!
//! let mut deck = Deck::from_file("decks/migrating-to-react.toml")?;
//! let change = deck.go_to_next();
//! for instruction in deck.render_current() {
//!     println!("{:?} {:?}", instruction.kind, instruction.style);
//! }
//! ```

pub mod deck;
pub mod error;
pub mod render;
pub mod settings;

// Re-exports
pub use deck::{Deck, Progress, ResolvedTransition, SlideChange};
pub use error::{DeckError, Result};
pub use render::{
    PaintContent, PaintInstruction, PaintIter, PaintSequence, ResolvedStyle, ThemeDiagnostic,
};
pub use settings::{BoundaryPolicy, DeckFile, DeckSettings};

/// Transition duration used when a deck file does not set one
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 500;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
