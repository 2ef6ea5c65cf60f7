//! Deck file configuration.
//!
//! A deck file is a TOML document with a `[deck]` settings table, a
//! `[theme]` palette and an ordered `[[slides]]` array:
//!
//! ```toml
//! [deck]
//! title = "Migrating to React"
//! transition = "slide"
//! transition_duration_ms = 500
//! policy = "clamp"
//!
//! [theme.colors]
//! primary = "white"
//! secondary = "#1F2022"
//!
//! [[slides]]
//! [[slides.nodes]]
//! type = "heading"
//! level = 1
//! text = "Migrating to React"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use slidedeck_ast::{Slide, Theme, TransitionKind};

use crate::deck::Deck;
use crate::error::Result;

/// Behavior at the first and last slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Stay on the boundary slide
    #[default]
    Clamp,
    /// Continue from the other end
    Wrap,
}

/// Global presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSettings {
    /// Talk title
    #[serde(default)]
    pub title: Option<String>,

    /// Default transition kind
    #[serde(default)]
    pub transition: TransitionKind,

    /// Default transition duration in milliseconds
    #[serde(default = "default_duration")]
    pub transition_duration_ms: u32,

    /// Boundary behavior for next/previous
    #[serde(default)]
    pub policy: BoundaryPolicy,
}

fn default_duration() -> u32 {
    crate::DEFAULT_TRANSITION_DURATION_MS
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            title: None,
            transition: TransitionKind::default(),
            transition_duration_ms: default_duration(),
            policy: BoundaryPolicy::default(),
        }
    }
}

impl DeckSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_transition(mut self, kind: TransitionKind, duration_ms: u32) -> Self {
        self.transition = kind;
        self.transition_duration_ms = duration_ms;
        self
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// On-disk deck description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckFile {
    #[serde(default)]
    pub deck: DeckSettings,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl DeckFile {
    /// Load a deck file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a deck file from a TOML string
    pub fn parse(toml_content: &str) -> Result<Self> {
        let file: DeckFile = toml::from_str(toml_content)?;
        Ok(file)
    }

    /// Validate and build the deck
    pub fn into_deck(self) -> Result<Deck> {
        Deck::new(self.slides, self.theme, self.deck)
    }
}
