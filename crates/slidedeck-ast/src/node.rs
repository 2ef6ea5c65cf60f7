//! Content nodes
//!
//! A slide is an ordered list of content nodes. Each node kind is a flat
//! record; consumers switch on the [`ContentNode`] tag to render it.

use serde::{Deserialize, Serialize};

use crate::theme::{ColorRole, FontRole};

/// A single typed unit of slide content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// A heading (level 1-6)
    Heading(Heading),
    /// A paragraph of inline spans
    Text(Text),
    /// A bullet or numbered list
    List(List),
    /// An image reference
    Image(Image),
    /// A block of source code
    CodeBlock(CodeBlock),
}

/// Discriminant of a [`ContentNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Heading,
    Text,
    List,
    Image,
    CodeBlock,
}

impl NodeKind {
    /// Name used in deck files and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::List => "list",
            Self::Image => "image",
            Self::CodeBlock => "code_block",
        }
    }

    /// Color role used when a node does not name one
    pub fn default_color(&self) -> ColorRole {
        ColorRole::Secondary
    }

    /// Font role used when a node does not name one
    pub fn default_font(&self) -> FontRole {
        match self {
            Self::Heading => FontRole::Primary,
            _ => FontRole::Secondary,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-node style overrides referencing theme roles
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Text color role
    pub color: Option<ColorRole>,
    /// Font family role
    pub font: Option<FontRole>,
    /// Font size in pixels
    pub font_size: Option<u32>,
}

impl StyleOverrides {
    /// Whether no override is set
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.font.is_none() && self.font_size.is_none()
    }
}

/// A heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6, where 1 is the largest)
    #[serde(default = "default_heading_level")]
    pub level: u8,
    /// Heading text
    pub text: String,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,
}

fn default_heading_level() -> u8 {
    1
}

impl Heading {
    /// Create a heading at the given level
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            style: StyleOverrides::default(),
        }
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self::new(default_heading_level(), String::new())
    }
}

/// Inline emphasis applied to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Bold,
    Italic,
    Code,
    Strikethrough,
}

/// A run of text with at most one emphasis style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
}

impl Span {
    /// Create an unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
        }
    }

    /// Create an emphasized span
    pub fn emphasized(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis: Some(emphasis),
        }
    }
}

/// A paragraph made of inline spans
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,
}

impl Text {
    /// Create text from a single plain string
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_spans(vec![Span::plain(text)])
    }

    /// Create text from multiple spans
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            spans,
            style: StyleOverrides::default(),
        }
    }

    /// Get the text without emphasis
    pub fn as_plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A list of items
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct List {
    pub items: Vec<ListItem>,
    /// Numbered instead of bulleted
    #[serde(default)]
    pub ordered: bool,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,
}

impl List {
    /// Create a bullet list from plain item strings
    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(ListItem::new).collect(),
            ordered: false,
            style: StyleOverrides::default(),
        }
    }
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// An image reference. The source is resolved by the asset collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image path or URL
    pub src: String,
    /// Alternative text
    #[serde(default)]
    pub alt: String,
    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl Image {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            height: None,
            width: None,
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A block of source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag for the highlighter
    #[serde(default)]
    pub language: Option<String>,
    /// Source text as written in the deck
    pub source: String,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,
}

impl CodeBlock {
    /// Create a code block without a language tag
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            language: None,
            source: source.into(),
            style: StyleOverrides::default(),
        }
    }

    /// Set the language tag
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Set the font size override
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.style.font_size = Some(size);
        self
    }

    /// Source with surrounding blank lines removed and the common leading
    /// indentation stripped.
    pub fn normalized_source(&self) -> String {
        let lines: Vec<&str> = self.source.lines().collect();

        let start = match lines.iter().position(|l| !is_blank(l)) {
            Some(start) => start,
            None => return String::new(),
        };
        let end = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(start);
        let body = &lines[start..=end];

        let indent = body
            .iter()
            .filter(|l| !is_blank(l))
            .map(|l| leading_whitespace(l))
            .min()
            .unwrap_or(0);

        body.iter()
            .map(|l| if is_blank(l) { "" } else { &l[indent..] })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

// Spaces and tabs are single-byte, so the count is also a byte offset.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

impl ContentNode {
    /// The node's discriminant
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Heading(_) => NodeKind::Heading,
            Self::Text(_) => NodeKind::Text,
            Self::List(_) => NodeKind::List,
            Self::Image(_) => NodeKind::Image,
            Self::CodeBlock(_) => NodeKind::CodeBlock,
        }
    }

    /// Style overrides, if the node kind carries any
    pub fn style(&self) -> Option<&StyleOverrides> {
        match self {
            Self::Heading(h) => Some(&h.style),
            Self::Text(t) => Some(&t.style),
            Self::List(l) => Some(&l.style),
            Self::CodeBlock(c) => Some(&c.style),
            Self::Image(_) => None,
        }
    }

    /// Heading text, if this node is a heading
    pub fn heading_text(&self) -> Option<&str> {
        match self {
            Self::Heading(h) => Some(&h.text),
            _ => None,
        }
    }
}

impl From<Heading> for ContentNode {
    fn from(h: Heading) -> Self {
        Self::Heading(h)
    }
}

impl From<Text> for ContentNode {
    fn from(t: Text) -> Self {
        Self::Text(t)
    }
}

impl From<List> for ContentNode {
    fn from(l: List) -> Self {
        Self::List(l)
    }
}

impl From<Image> for ContentNode {
    fn from(i: Image) -> Self {
        Self::Image(i)
    }
}

impl From<CodeBlock> for ContentNode {
    fn from(c: CodeBlock) -> Self {
        Self::CodeBlock(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_default() {
        let h = Heading::default();
        assert_eq!(h.level, 1);
        assert!(h.text.is_empty());
        assert!(h.style.is_empty());
    }

    #[test]
    fn test_text_plain() {
        let text = Text::from_spans(vec![
            Span::plain("swap it for "),
            Span::emphasized("React", Emphasis::Bold),
            Span::plain("!"),
        ]);
        assert_eq!(text.as_plain_text(), "swap it for React!");
        assert_eq!(text.spans[1].emphasis, Some(Emphasis::Bold));
    }

    #[test]
    fn test_node_kind() {
        let node: ContentNode = List::bullets(["a", "b"]).into();
        assert_eq!(node.kind(), NodeKind::List);
        assert_eq!(node.kind().as_str(), "list");
        assert!(node.heading_text().is_none());

        let node: ContentNode = Image::new("rewrite.jpg", "Rewrite").into();
        assert!(node.style().is_none());
    }

    #[test]
    fn test_default_roles() {
        assert_eq!(NodeKind::Heading.default_font(), FontRole::Primary);
        assert_eq!(NodeKind::CodeBlock.default_font(), FontRole::Secondary);
        assert_eq!(NodeKind::Text.default_color(), ColorRole::Secondary);
    }

    #[test]
    fn test_normalized_source_dedents() {
        let code = CodeBlock::new(
            "\n            const a = {\n              b: 1\n            };\n\n            // done\n          ",
        );
        assert_eq!(code.normalized_source(), "const a = {\n  b: 1\n};\n\n// done");
    }

    #[test]
    fn test_normalized_source_blank() {
        assert_eq!(CodeBlock::new("  \n \n").normalized_source(), "");
        assert_eq!(CodeBlock::new("x").normalized_source(), "x");
    }

    #[test]
    fn test_deserialize_tagged_node() {
        let json = r#"{"type":"code_block","language":"js","source":"x","style":{"font_size":20}}"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();
        match node {
            ContentNode::CodeBlock(code) => {
                assert_eq!(code.language.as_deref(), Some("js"));
                assert_eq!(code.style.font_size, Some(20));
            }
            other => panic!("Expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_list_item_bold_defaults_false() {
        let item: ListItem = serde_json::from_str(r#"{"text":"Stability!"}"#).unwrap();
        assert!(!item.bold);
        let item: ListItem = serde_json::from_str(r#"{"text":"Stability!","bold":true}"#).unwrap();
        assert_eq!(item, ListItem::bold("Stability!"));
    }
}
