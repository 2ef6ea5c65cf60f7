//! Plain-text and JSON slide renderers.
//!
//! These are reference rendering collaborators: they consume the deck's
//! paint instructions and resolved transitions and write them out, one as
//! Markdown-like text for a terminal and one as JSON for tools.

use std::io::{self, Write};

use serde::Serialize;
use slidedeck_ast::{Emphasis, Span};
use slidedeck_core::{Deck, PaintContent, PaintInstruction, ResolvedTransition};

/// JSON view of one slide
#[derive(Debug, Serialize)]
pub struct SlideReport<'a> {
    /// 1-based slide number
    pub number: usize,
    pub transition: ResolvedTransition,
    pub background: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
    pub instructions: Vec<PaintInstruction<'a>>,
}

impl<'a> SlideReport<'a> {
    /// Build the report for the slide at `index`; `None` past the end
    pub fn new(deck: &'a Deck, index: usize) -> Option<Self> {
        let slide = deck.slide(index)?;
        let sequence = deck.render(slide);
        Some(Self {
            number: index + 1,
            transition: deck.transition_for(slide),
            background: sequence.background().value,
            notes: slide.notes.as_deref(),
            instructions: sequence.iter().collect(),
        })
    }
}

/// Write the slide at `index` as text. Does nothing past the end.
pub fn write_slide(out: &mut impl Write, deck: &Deck, index: usize) -> io::Result<()> {
    let Some(slide) = deck.slide(index) else {
        return Ok(());
    };
    let transition = deck.transition_for(slide);

    writeln!(
        out,
        "--- {} / {} [{} {}ms] ---",
        index + 1,
        deck.len(),
        transition.kind,
        transition.duration_ms
    )?;

    for instruction in deck.render(slide) {
        write_instruction(out, &instruction)?;
    }

    if let Some(notes) = &slide.notes {
        writeln!(out, "> notes: {}", notes)?;
    }

    Ok(())
}

fn write_instruction(out: &mut impl Write, instruction: &PaintInstruction<'_>) -> io::Result<()> {
    match &instruction.content {
        PaintContent::Heading { level, text } => {
            writeln!(out, "{} {}", "#".repeat(usize::from(*level)), text)?;
        }
        PaintContent::Text { spans } => {
            writeln!(out, "{}", format_spans(spans))?;
        }
        PaintContent::List { items, ordered } => {
            for (i, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}.", i + 1)
                } else {
                    "-".to_string()
                };
                if item.bold {
                    writeln!(out, "{} **{}**", marker, item.text)?;
                } else {
                    writeln!(out, "{} {}", marker, item.text)?;
                }
            }
        }
        PaintContent::Image {
            src, alt, height, ..
        } => match height {
            Some(h) => writeln!(out, "![{}]({}) height={}", alt, src, h)?,
            None => writeln!(out, "![{}]({})", alt, src)?,
        },
        PaintContent::Code { language, source } => {
            writeln!(out, "```{}", language.unwrap_or(""))?;
            writeln!(out, "{}", source)?;
            writeln!(out, "```")?;
        }
    }
    Ok(())
}

/// Inline spans with Markdown emphasis markers
pub fn format_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span.emphasis {
            Some(Emphasis::Bold) => format!("**{}**", span.text),
            Some(Emphasis::Italic) => format!("*{}*", span.text),
            Some(Emphasis::Code) => format!("`{}`", span.text),
            Some(Emphasis::Strikethrough) => format!("~~{}~~", span.text),
            None => span.text.clone(),
        })
        .collect()
}
