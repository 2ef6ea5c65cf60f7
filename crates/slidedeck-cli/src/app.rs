//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slidedeck_core::{BoundaryPolicy, Deck, ResolvedTransition};
use tracing::info;

use crate::present::{run_session, slide_index};
use crate::text::{write_slide, SlideReport};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tools
    Json,
}

/// Boundary behavior for a presenter session
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Stay on the first/last slide
    Clamp,
    /// Continue from the other end
    Wrap,
}

impl From<PolicyArg> for BoundaryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Clamp => BoundaryPolicy::Clamp,
            PolicyArg::Wrap => BoundaryPolicy::Wrap,
        }
    }
}

#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(author, version, about = "Talks as data", long_about = None)]
struct Cli {
    /// Log navigation and theme resolution at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slides of a deck with their titles and transitions
    Outline {
        /// Deck file (TOML)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the paint instructions of one slide or the whole deck
    Render {
        /// Deck file (TOML)
        input: PathBuf,

        /// 1-based slide number (all slides when omitted)
        #[arg(short, long)]
        slide: Option<i64>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report theme roles that fall back to defaults
    Check {
        /// Deck file (TOML)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Strict mode: exit with error code if any role falls back
        #[arg(long)]
        strict: bool,
    },

    /// Drive a deck from stdin, one command per line
    Present {
        /// Deck file (TOML)
        input: PathBuf,

        /// Override the deck's boundary policy
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// 1-based slide number to start on
        #[arg(long)]
        start: Option<i64>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Outline { input, format } => {
            outline_command(&input, format, &mut out)?;
        }
        Commands::Render {
            input,
            slide,
            format,
        } => {
            render_command(&input, slide, format, &mut out)?;
        }
        Commands::Check {
            input,
            format,
            strict,
        } => {
            check_command(&input, format, strict, &mut out)?;
        }
        Commands::Present {
            input,
            policy,
            start,
        } => {
            let stdin = io::stdin();
            present_command(&input, policy, start, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

/// Load and validate a deck file
pub fn load_deck(input: &Path) -> Result<Deck> {
    if !input.exists() {
        anyhow::bail!("Deck file not found: {}", input.display());
    }

    Deck::from_file(input).with_context(|| format!("Failed to load deck: {}", input.display()))
}

/// One row of the outline
#[derive(Debug, Serialize)]
struct OutlineEntry<'a> {
    number: usize,
    title: Option<&'a str>,
    nodes: usize,
    transition: ResolvedTransition,
}

/// Execute the outline command
pub fn outline_command(input: &Path, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let deck = load_deck(input)?;

    let entries: Vec<OutlineEntry<'_>> = deck
        .slides()
        .iter()
        .enumerate()
        .map(|(index, slide)| OutlineEntry {
            number: index + 1,
            title: slide.title(),
            nodes: slide.len(),
            transition: deck.transition_for(slide),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .context("Failed to serialize outline to JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            if let Some(title) = deck.title() {
                writeln!(out, "{}", title)?;
            }
            let width = deck.len().to_string().len();
            for entry in &entries {
                let noun = if entry.nodes == 1 { "node" } else { "nodes" };
                writeln!(
                    out,
                    "{:>width$}. {} ({} {}, {})",
                    entry.number,
                    entry.title.unwrap_or("(untitled)"),
                    entry.nodes,
                    noun,
                    entry.transition.kind,
                    width = width
                )?;
            }
        }
    }

    Ok(())
}

/// Execute the render command
pub fn render_command(
    input: &Path,
    slide: Option<i64>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let mut deck = load_deck(input)?;

    let indices: Vec<usize> = match slide {
        Some(number) => {
            let change = deck
                .go_to_index(slide_index(number))
                .with_context(|| format!("No slide {} in {}", number, input.display()))?;
            vec![change.to]
        }
        None => (0..deck.len()).collect(),
    };

    match format {
        OutputFormat::Json => {
            let reports: Vec<SlideReport<'_>> = indices
                .iter()
                .filter_map(|&index| SlideReport::new(&deck, index))
                .collect();
            let json = serde_json::to_string_pretty(&reports)
                .context("Failed to serialize slides to JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            for index in indices {
                write_slide(out, &deck, index)?;
            }
        }
    }

    Ok(())
}

/// Execute the check command
pub fn check_command(
    input: &Path,
    format: OutputFormat,
    strict: bool,
    out: &mut impl Write,
) -> Result<()> {
    let deck = load_deck(input)?;
    let diagnostics = deck.check();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)
                .context("Failed to serialize diagnostics to JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                writeln!(out, "✓ No theme fallbacks in {}", input.display())?;
            } else {
                for diag in &diagnostics {
                    match diag.node {
                        Some(node) => writeln!(
                            out,
                            "slide {}, node {}: {}",
                            diag.slide + 1,
                            node + 1,
                            diag.warning
                        )?,
                        None => writeln!(
                            out,
                            "slide {}, background: {}",
                            diag.slide + 1,
                            diag.warning
                        )?,
                    }
                }
                writeln!(out, "Found {} warning(s)", diagnostics.len())?;
            }
        }
    }

    if strict && !diagnostics.is_empty() {
        anyhow::bail!(
            "{} theme role(s) fall back in {}",
            diagnostics.len(),
            input.display()
        );
    }

    Ok(())
}

/// Execute the present command
pub fn present_command<R: io::BufRead>(
    input: &Path,
    policy: Option<PolicyArg>,
    start: Option<i64>,
    commands: R,
    out: &mut impl Write,
) -> Result<usize> {
    let mut deck = load_deck(input)?;

    if let Some(policy) = policy {
        deck.set_policy(policy.into());
    }

    if let Some(number) = start {
        deck.go_to_index(slide_index(number))
            .with_context(|| format!("Cannot start on slide {}", number))?;
    }

    info!(
        "Presenting {} ({} slides)",
        deck.title().unwrap_or("untitled"),
        deck.len()
    );

    run_session(&mut deck, commands, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DECK: &str = r##"
[deck]
title = "Tiny"

[theme.colors]
primary = "white"
secondary = "#1F2022"

[[slides]]
[[slides.nodes]]
type = "heading"
level = 1
text = "Hello"

[[slides]]
transition = "fade"
[[slides.nodes]]
type = "text"
spans = [{ text = "Two" }]
"##;

    fn write_deck(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("tiny.toml");
        fs::write(&path, DECK).unwrap();
        path
    }

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_parse_render() {
        let args = vec!["slidedeck", "render", "talk.toml", "--slide", "3"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                slide,
                format,
            } => {
                assert_eq!(input, PathBuf::from("talk.toml"));
                assert_eq!(slide, Some(3));
                assert!(matches!(format, OutputFormat::Text));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_present() {
        let args = vec![
            "slidedeck",
            "present",
            "talk.toml",
            "--policy",
            "wrap",
            "--start",
            "2",
            "-v",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);

        match cli.command {
            Commands::Present { policy, start, .. } => {
                assert!(matches!(policy, Some(PolicyArg::Wrap)));
                assert_eq!(start, Some(2));
            }
            _ => panic!("Expected Present command"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let args = vec!["slidedeck", "check", "talk.toml", "--format", "json", "--strict"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { format, strict, .. } => {
                assert!(matches!(format, OutputFormat::Json));
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_load_missing_deck() {
        let err = load_deck(Path::new("/nonexistent/talk.toml")).unwrap_err();
        assert!(err.to_string().contains("Deck file not found"));
    }

    #[test]
    fn test_outline_text() {
        let dir = TempDir::new().unwrap();
        let path = write_deck(&dir);
        let output = capture(|out| outline_command(&path, OutputFormat::Text, out));

        assert!(output.starts_with("Tiny\n"));
        assert!(output.contains("1. Hello (1 node, slide)"));
        assert!(output.contains("2. (untitled) (1 node, fade)"));
    }

    #[test]
    fn test_render_single_slide_json() {
        let dir = TempDir::new().unwrap();
        let path = write_deck(&dir);
        let output = capture(|out| render_command(&path, Some(2), OutputFormat::Json, out));

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let reports = json.as_array().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0]["number"], 2);
        assert_eq!(reports[0]["transition"]["kind"], "fade");
    }

    #[test]
    fn test_render_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = write_deck(&dir);
        let mut out = Vec::new();
        let err = render_command(&path, Some(3), OutputFormat::Text, &mut out).unwrap_err();
        assert!(err.to_string().contains("No slide 3"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_check_reports_font_fallbacks() {
        let dir = TempDir::new().unwrap();
        let path = write_deck(&dir);
        let output = capture(|out| check_command(&path, OutputFormat::Text, false, out));

        assert!(output.contains("slide 1, node 1:"));
        assert!(output.contains("Found 2 warning(s)"));

        let mut out = Vec::new();
        assert!(check_command(&path, OutputFormat::Text, true, &mut out).is_err());
    }

    #[test]
    fn test_present_starts_on_requested_slide() {
        let dir = TempDir::new().unwrap();
        let path = write_deck(&dir);
        let mut out = Vec::new();
        let index = present_command(
            &path,
            Some(PolicyArg::Wrap),
            Some(2),
            "n\n".as_bytes(),
            &mut out,
        )
        .unwrap();

        assert_eq!(index, 0);
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("--- 2 / 2 [fade 500ms] ---\n"));
        assert!(output.contains("--- 1 / 2 [slide 500ms] ---\n"));
    }
}
