//! The deck model.
//!
//! A [`Deck`] owns the ordered slides, the theme, the transition settings and
//! the active-slide cursor. The cursor is the only state that changes after
//! construction. Every navigation call returns the [`SlideChange`] the
//! renderer needs to animate; the deck itself never animates anything.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use slidedeck_ast::{ContentNode, Slide, Theme, TransitionKind};
use tracing::{debug, info, warn};

use crate::error::{DeckError, Result};
use crate::render::{PaintSequence, ThemeDiagnostic};
use crate::settings::{BoundaryPolicy, DeckFile, DeckSettings};

/// Transition handed to the renderer for one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedTransition {
    pub kind: TransitionKind,
    pub duration_ms: u32,
}

/// Outcome of a navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideChange {
    /// Index before the command
    pub from: usize,
    /// Index after the command
    pub to: usize,
    /// Effective transition of the destination slide
    pub transition: ResolvedTransition,
}

impl SlideChange {
    /// False when the command left the cursor where it was
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// 1-based position counter, e.g. "3 / 42"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current, self.total)
    }
}

/// An ordered, navigable talk
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    theme: Theme,
    settings: DeckSettings,
    active_index: usize,
}

impl Deck {
    /// Build a deck, validating slides and settings. The cursor starts at 0.
    pub fn new(slides: Vec<Slide>, theme: Theme, settings: DeckSettings) -> Result<Self> {
        validate(&slides, &settings)?;

        info!(
            title = settings.title.as_deref().unwrap_or("untitled"),
            slides = slides.len(),
            transition = %settings.transition,
            "Deck ready"
        );

        Ok(Self {
            slides,
            theme,
            settings,
            active_index: 0,
        })
    }

    /// Load and validate a deck file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading deck file {}", path.display());
        DeckFile::from_file(path)?.into_deck()
    }

    /// Parse and validate a deck from TOML
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        DeckFile::parse(toml_content)?.into_deck()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn title(&self) -> Option<&str> {
        self.settings.title.as_deref()
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.settings.policy
    }

    /// Change the boundary policy mid-session
    pub fn set_policy(&mut self, policy: BoundaryPolicy) {
        self.settings.policy = policy;
    }

    /// Number of slides (always at least one)
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn is_first(&self) -> bool {
        self.active_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.active_index == self.last_index()
    }

    /// The slide on screen
    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.active_index]
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.active_index + 1,
            total: self.slides.len(),
        }
    }

    /// Advance one slide. Clamps or wraps at the end according to the policy.
    pub fn go_to_next(&mut self) -> SlideChange {
        let to = match self.settings.policy {
            BoundaryPolicy::Clamp => (self.active_index + 1).min(self.last_index()),
            BoundaryPolicy::Wrap => (self.active_index + 1) % self.slides.len(),
        };
        self.move_to(to)
    }

    /// Step back one slide. Clamps or wraps at the start according to the policy.
    pub fn go_to_previous(&mut self) -> SlideChange {
        let to = match (self.settings.policy, self.active_index) {
            (BoundaryPolicy::Wrap, 0) => self.last_index(),
            (_, index) => index.saturating_sub(1),
        };
        self.move_to(to)
    }

    /// Jump to a slide. Fails without moving when `index` is outside the deck.
    pub fn go_to_index(&mut self, index: isize) -> Result<SlideChange> {
        match usize::try_from(index) {
            Ok(to) if to < self.slides.len() => Ok(self.move_to(to)),
            _ => {
                warn!(index, len = self.slides.len(), "Slide index out of range");
                Err(DeckError::out_of_range(index, self.slides.len()))
            }
        }
    }

    pub fn go_to_first(&mut self) -> SlideChange {
        self.move_to(0)
    }

    pub fn go_to_last(&mut self) -> SlideChange {
        self.move_to(self.last_index())
    }

    fn move_to(&mut self, to: usize) -> SlideChange {
        let from = self.active_index;
        self.active_index = to;
        let transition = self.transition_for(&self.slides[to]);
        debug!(from, to, kind = %transition.kind, "Navigated");
        SlideChange {
            from,
            to,
            transition,
        }
    }

    /// Effective transition for entering `slide`: the slide's override, else
    /// the deck default.
    pub fn transition_for(&self, slide: &Slide) -> ResolvedTransition {
        ResolvedTransition {
            kind: slide.transition.unwrap_or(self.settings.transition),
            duration_ms: slide
                .transition_duration_ms
                .unwrap_or(self.settings.transition_duration_ms),
        }
    }

    /// Effective transition for the slide at `index`; `None` past the end
    pub fn resolve_transition(&self, index: usize) -> Option<ResolvedTransition> {
        self.slide(index).map(|slide| self.transition_for(slide))
    }

    pub fn current_transition(&self) -> ResolvedTransition {
        self.transition_for(self.current_slide())
    }

    /// Paint instructions for a slide, resolved against this deck's theme
    pub fn render<'a>(&'a self, slide: &'a Slide) -> PaintSequence<'a> {
        PaintSequence::new(slide, &self.theme)
    }

    pub fn render_current(&self) -> PaintSequence<'_> {
        self.render(self.current_slide())
    }

    /// Every theme role in the deck that falls back, with its position
    pub fn check(&self) -> Vec<ThemeDiagnostic> {
        self.slides
            .iter()
            .enumerate()
            .flat_map(|(index, slide)| self.render(slide).diagnostics(index))
            .collect()
    }
}

fn validate(slides: &[Slide], settings: &DeckSettings) -> Result<()> {
    if slides.is_empty() {
        return Err(DeckError::EmptyDeck);
    }

    if settings.transition_duration_ms == 0 {
        return Err(DeckError::invalid_duration(0, "deck default"));
    }

    for (slide_index, slide) in slides.iter().enumerate() {
        if slide.transition_duration_ms == Some(0) {
            return Err(DeckError::invalid_duration(
                0,
                format!("slide {}", slide_index),
            ));
        }

        for (node_index, node) in slide.nodes.iter().enumerate() {
            if let ContentNode::Heading(heading) = node {
                if !(1..=6).contains(&heading.level) {
                    return Err(DeckError::InvalidHeadingLevel {
                        slide: slide_index,
                        node: node_index,
                        level: heading.level,
                    });
                }
            }
        }
    }

    Ok(())
}
