//! slidedeck CLI - Command-line interface library
//!
//! This library provides the CLI functionality for slidedeck, including:
//! - Outline: list slides with titles and transitions
//! - Render: print paint instructions as text or JSON
//! - Check: report theme roles that fall back to defaults
//! - Present: drive a deck from stdin
//!
//! # Library Usage
//!
//! ```ignore
//! use slidedeck_cli::{run_cli, render_command, OutputFormat};
//!
//! // Run the full CLI
//! run_cli()?;
//!
//! // Or use individual commands programmatically
//! render_command(&input, Some(3), OutputFormat::Json, &mut std::io::stdout())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Outline the bundled talk
//! slidedeck outline decks/migrating-to-react.toml
//!
//! # Render slide 7 as JSON
//! slidedeck render decks/migrating-to-react.toml --slide 7 --format json
//!
//! # Fail on theme fallbacks
//! slidedeck check decks/migrating-to-react.toml --strict
//!
//! # Present, wrapping at the ends
//! slidedeck present decks/migrating-to-react.toml --policy wrap
//! ```

pub mod app;
pub mod present;
pub mod text;

// Re-export main entry point and types
pub use app::{check_command, load_deck, outline_command, present_command, render_command};
pub use app::{run_cli, OutputFormat, PolicyArg};
pub use present::{run_session, slide_index, PresenterCommand};
pub use text::{format_spans, write_slide, SlideReport};
