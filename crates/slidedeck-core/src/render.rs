//! Paint instructions.
//!
//! [`PaintSequence`] is the contract with the rendering collaborator: one
//! [`PaintInstruction`] per content node, in slide order, each carrying the
//! node's content and its style resolved against the theme. Instructions are
//! built on demand, and the sequence can be iterated any number of times.

use std::iter::{Enumerate, FusedIterator};
use std::slice;

use serde::Serialize;
use slidedeck_ast::{
    ContentNode, ListItem, NodeKind, Resolved, Slide, Span, Theme, UnresolvedThemeRole,
};
use tracing::warn;

/// Style of a node after theme resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle<'a> {
    pub color: &'a str,
    pub font: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// Node content as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PaintContent<'a> {
    Heading {
        level: u8,
        text: &'a str,
    },
    Text {
        spans: &'a [Span],
    },
    List {
        items: &'a [ListItem],
        ordered: bool,
    },
    Image {
        src: &'a str,
        alt: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
    },
    Code {
        language: Option<&'a str>,
        /// Dedented source
        source: String,
    },
}

/// One renderer-ready node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintInstruction<'a> {
    /// Position of the node within its slide
    pub position: usize,
    pub kind: NodeKind,
    pub content: PaintContent<'a>,
    pub style: ResolvedStyle<'a>,
    /// Roles that fell back during resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<UnresolvedThemeRole>,
}

/// A theme fallback found while checking a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDiagnostic {
    pub slide: usize,
    /// `None` for the slide background
    pub node: Option<usize>,
    pub warning: UnresolvedThemeRole,
}

/// Lazy, restartable paint instructions for one slide
#[derive(Debug, Clone, Copy)]
pub struct PaintSequence<'a> {
    slide: &'a Slide,
    theme: &'a Theme,
}

impl<'a> PaintSequence<'a> {
    pub fn new(slide: &'a Slide, theme: &'a Theme) -> Self {
        Self { slide, theme }
    }

    /// Start a fresh pass over the slide's nodes
    pub fn iter(&self) -> PaintIter<'a> {
        PaintIter {
            nodes: self.slide.nodes.iter().enumerate(),
            theme: self.theme,
        }
    }

    pub fn slide(&self) -> &'a Slide {
        self.slide
    }

    pub fn len(&self) -> usize {
        self.slide.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slide.nodes.is_empty()
    }

    /// Resolved background color of the slide
    pub fn background(&self) -> Resolved<'a> {
        self.theme.resolve_color(self.slide.background_role())
    }

    /// Theme fallbacks on this slide, reported against `slide_index`
    pub fn diagnostics(&self, slide_index: usize) -> Vec<ThemeDiagnostic> {
        let background = self.background().warning.map(|warning| ThemeDiagnostic {
            slide: slide_index,
            node: None,
            warning,
        });

        background
            .into_iter()
            .chain(self.iter().flat_map(move |instruction| {
                let node = instruction.position;
                instruction
                    .warnings
                    .into_iter()
                    .map(move |warning| ThemeDiagnostic {
                        slide: slide_index,
                        node: Some(node),
                        warning,
                    })
            }))
            .collect()
    }
}

impl<'a> IntoIterator for PaintSequence<'a> {
    type Item = PaintInstruction<'a>;
    type IntoIter = PaintIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &PaintSequence<'a> {
    type Item = PaintInstruction<'a>;
    type IntoIter = PaintIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a slide's paint instructions
#[derive(Debug, Clone)]
pub struct PaintIter<'a> {
    nodes: Enumerate<slice::Iter<'a, ContentNode>>,
    theme: &'a Theme,
}

impl<'a> Iterator for PaintIter<'a> {
    type Item = PaintInstruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, node) = self.nodes.next()?;
        Some(paint_node(position, node, self.theme))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for PaintIter<'_> {}

impl FusedIterator for PaintIter<'_> {}

fn paint_node<'a>(
    position: usize,
    node: &'a ContentNode,
    theme: &'a Theme,
) -> PaintInstruction<'a> {
    let kind = node.kind();
    let overrides = node.style();

    let color_role = overrides
        .and_then(|s| s.color)
        .unwrap_or_else(|| kind.default_color());
    let font_role = overrides
        .and_then(|s| s.font)
        .unwrap_or_else(|| kind.default_font());

    let mut warnings = Vec::new();
    let color = take_value(theme.resolve_color(color_role), position, &mut warnings);
    let font = take_value(theme.resolve_font(font_role), position, &mut warnings);

    let style = ResolvedStyle {
        color,
        font,
        font_size: overrides.and_then(|s| s.font_size),
    };

    let content = match node {
        ContentNode::Heading(h) => PaintContent::Heading {
            level: h.level,
            text: &h.text,
        },
        ContentNode::Text(t) => PaintContent::Text { spans: &t.spans },
        ContentNode::List(l) => PaintContent::List {
            items: &l.items,
            ordered: l.ordered,
        },
        ContentNode::Image(i) => PaintContent::Image {
            src: &i.src,
            alt: &i.alt,
            height: i.height,
            width: i.width,
        },
        ContentNode::CodeBlock(c) => PaintContent::Code {
            language: c.language.as_deref(),
            source: c.normalized_source(),
        },
    };

    PaintInstruction {
        position,
        kind,
        content,
        style,
        warnings,
    }
}

fn take_value<'a>(
    resolved: Resolved<'a>,
    position: usize,
    warnings: &mut Vec<UnresolvedThemeRole>,
) -> &'a str {
    if let Some(warning) = resolved.warning {
        warn!(node = position, "{}", warning);
        warnings.push(warning);
    }
    resolved.value
}
