//! Slide transition kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual effect used when moving between slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Slide,
    Fade,
    Zoom,
    Spin,
    None,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::Zoom => "zoom",
            Self::Spin => "spin",
            Self::None => "none",
        }
    }

    /// Whether the renderer has anything to animate
    pub fn is_animated(&self) -> bool {
        *self != Self::None
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
