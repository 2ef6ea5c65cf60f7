//! Line-oriented presenter session.
//!
//! Reads one command per line and applies it to the deck. Slide numbers
//! typed by the presenter are 1-based, matching the on-screen counter.
//! A bad slide number is reported and the session carries on.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use slidedeck_core::{Deck, DeckError, SlideChange};
use tracing::debug;

use crate::text::write_slide;

/// A presenter command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCommand {
    Next,
    Previous,
    /// 1-based slide number as typed
    GoTo(i64),
    First,
    Last,
    Help,
    Quit,
}

impl FromStr for PresenterCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");

        let parsed = match command {
            "" | "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "f" | "first" => Self::First,
            "l" | "last" => Self::Last,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "g" | "goto" => {
                let number = words
                    .next()
                    .ok_or_else(|| format!("'{}' needs a slide number", command))?;
                Self::GoTo(parse_number(number)?)
            }
            other => Self::GoTo(parse_number(other)?),
        };

        match words.next() {
            Some(extra) => Err(format!("unexpected argument '{}'", extra)),
            None => Ok(parsed),
        }
    }
}

fn parse_number(word: &str) -> std::result::Result<i64, String> {
    word.parse()
        .map_err(|_| format!("unknown command '{}' (type 'help')", word))
}

const HELP: &str = "\
commands:
  <enter>, n, next       next slide
  p, prev                previous slide
  <number>, g <number>   go to slide
  f, first / l, last     first or last slide
  q, quit                end the session";

/// Run a session until `quit` or end of input. Returns the final 0-based
/// slide index.
///
/// Lines that are not valid UTF-8 are decoded lossily and reported like any
/// other unknown command. Only read failures end the session early.
pub fn run_session<R, W>(deck: &mut Deck, mut input: R, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    write_slide(out, deck, deck.active_index())?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let command = match line.parse::<PresenterCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "! {}", message)?;
                continue;
            }
        };
        debug!(?command, "Presenter command");

        let change = match command {
            PresenterCommand::Quit => break,
            PresenterCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            PresenterCommand::Next => deck.go_to_next(),
            PresenterCommand::Previous => deck.go_to_previous(),
            PresenterCommand::First => deck.go_to_first(),
            PresenterCommand::Last => deck.go_to_last(),
            PresenterCommand::GoTo(number) => match go_to_number(deck, number) {
                Ok(change) => change,
                Err(DeckError::OutOfRange { len, .. }) => {
                    writeln!(out, "! no slide {}: deck has {} slides", number, len)?;
                    continue;
                }
                Err(other) => return Err(other.into()),
            },
        };

        report_change(out, deck, command, &change)?;
    }

    Ok(deck.active_index())
}

/// Convert a 1-based slide number to a deck index
///
/// Numbers that do not fit an `isize` map to `isize::MIN`, which is out of
/// range for every deck.
pub fn slide_index(number: i64) -> isize {
    number
        .checked_sub(1)
        .and_then(|i| isize::try_from(i).ok())
        .unwrap_or(isize::MIN)
}

fn go_to_number(deck: &mut Deck, number: i64) -> slidedeck_core::Result<SlideChange> {
    deck.go_to_index(slide_index(number))
}

fn report_change<W: Write>(
    out: &mut W,
    deck: &Deck,
    command: PresenterCommand,
    change: &SlideChange,
) -> Result<()> {
    if !change.moved() {
        // Stepping past an edge; an explicit jump re-shows the slide
        let edge = match command {
            PresenterCommand::Next => Some("last"),
            PresenterCommand::Previous => Some("first"),
            _ => None,
        };
        if let Some(edge) = edge {
            writeln!(out, "! already on the {} slide", edge)?;
            return Ok(());
        }
    }
    write_slide(out, deck, change.to)?;
    Ok(())
}
