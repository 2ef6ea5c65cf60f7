//! slidedeck-ast - Slide content definitions
//!
//! This crate provides the plain data types a deck is built from: content
//! nodes, slides, transitions and the theme palette. Behavior (navigation,
//! rendering) lives in `slidedeck-core`.

pub mod node;
pub mod slide;
pub mod theme;
pub mod transition;

pub use node::{
    CodeBlock, ContentNode, Emphasis, Heading, Image, List, ListItem, NodeKind, Span,
    StyleOverrides, Text,
};
pub use slide::Slide;
pub use theme::{
    ColorRole, FontRole, ParseRoleError, Resolved, Theme, UnresolvedThemeRole,
    FALLBACK_COLOR, FALLBACK_FONT,
};
pub use transition::TransitionKind;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
