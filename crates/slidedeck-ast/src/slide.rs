//! Slide definition
//!
//! A slide has no identity beyond its position in the deck. It owns its
//! nodes in render order and may override the deck's transition.

use serde::{Deserialize, Serialize};

use crate::node::ContentNode;
use crate::theme::ColorRole;
use crate::transition::TransitionKind;

/// One screen of ordered content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Content in top-to-bottom render order
    #[serde(default)]
    pub nodes: Vec<ContentNode>,

    /// Transition used when this slide becomes active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionKind>,

    /// Transition duration override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_duration_ms: Option<u32>,

    /// Background color role (primary when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorRole>,

    /// Speaker notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Slide {
    /// Create an empty slide
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slide from nodes
    pub fn from_nodes(nodes: Vec<ContentNode>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    /// Append a node
    pub fn with_node(mut self, node: impl Into<ContentNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Override the transition kind
    pub fn with_transition(mut self, kind: TransitionKind) -> Self {
        self.transition = Some(kind);
        self
    }

    /// Override the transition duration
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.transition_duration_ms = Some(duration_ms);
        self
    }

    /// Attach speaker notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Text of the first heading, used as the slide's title in outlines
    pub fn title(&self) -> Option<&str> {
        self.nodes.iter().find_map(ContentNode::heading_text)
    }

    /// Background role, defaulting to primary
    pub fn background_role(&self) -> ColorRole {
        self.background.unwrap_or(ColorRole::Primary)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
