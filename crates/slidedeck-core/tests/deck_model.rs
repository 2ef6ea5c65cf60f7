//! Integration tests for the deck model
//!
//! Covers the navigation properties over arbitrary deck sizes and loads the
//! bundled talk end to end.

use std::fs;
use std::path::PathBuf;

use slidedeck_ast::{
    ColorRole, ContentNode, Emphasis, FontRole, Heading, Slide, Theme, TransitionKind,
};
use slidedeck_core::{BoundaryPolicy, Deck, DeckError, DeckSettings, PaintContent};
use tempfile::TempDir;

fn bundled_deck_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../decks/migrating-to-react.toml")
}

fn deck_of(n: usize) -> Deck {
    let slides = (0..n)
        .map(|i| Slide::new().with_node(Heading::new(4, format!("S{}", i))))
        .collect();
    Deck::new(slides, Theme::new(), DeckSettings::default()).unwrap()
}

#[test]
fn test_go_to_index_every_valid_index() {
    for n in 1..=8 {
        let mut deck = deck_of(n);
        for k in 0..n {
            deck.go_to_index(k as isize).unwrap();
            assert_eq!(deck.active_index(), k);
            assert_eq!(deck.current_slide(), &deck.slides()[k]);
        }
    }
}

#[test]
fn test_next_saturates_at_last() {
    for n in 1..=8 {
        let mut deck = deck_of(n);
        for _ in 0..n - 1 {
            assert!(deck.go_to_next().moved());
        }
        assert_eq!(deck.active_index(), n - 1);

        let change = deck.go_to_next();
        assert!(!change.moved());
        assert_eq!(deck.active_index(), n - 1);

        for _ in 0..n - 1 {
            deck.go_to_previous();
        }
        assert_eq!(deck.active_index(), 0);
        deck.go_to_previous();
        assert_eq!(deck.active_index(), 0);
    }
}

#[test]
fn test_out_of_range_leaves_cursor() {
    for n in 1..=5 {
        let mut deck = deck_of(n);
        deck.go_to_last();

        for bad in [n as isize, -1, isize::MIN, isize::MAX] {
            let err = deck.go_to_index(bad).unwrap_err();
            assert!(matches!(err, DeckError::OutOfRange { .. }));
            assert_eq!(err.code(), "DECK001");
            assert_eq!(deck.active_index(), n - 1);
        }
    }
}

#[test]
fn test_single_slide_deck_wraps_to_itself() {
    let mut deck = deck_of(1);
    deck.set_policy(BoundaryPolicy::Wrap);
    assert!(!deck.go_to_next().moved());
    assert!(!deck.go_to_previous().moved());
}

#[test]
fn test_render_matches_node_count() {
    let deck = Deck::from_file(bundled_deck_path()).unwrap();
    for slide in deck.slides() {
        let sequence = deck.render(slide);
        assert_eq!(sequence.iter().count(), slide.nodes.len());
        let kinds: Vec<_> = sequence.iter().map(|i| i.kind).collect();
        let expected: Vec<_> = slide.nodes.iter().map(ContentNode::kind).collect();
        assert_eq!(kinds, expected);
    }
}

#[test]
fn test_bundled_talk_loads() {
    let deck = Deck::from_file(bundled_deck_path()).unwrap();

    assert_eq!(deck.title(), Some("Migrating to React"));
    assert_eq!(deck.len(), 42);
    assert_eq!(deck.settings().transition, TransitionKind::Slide);
    assert_eq!(deck.settings().transition_duration_ms, 500);
    assert_eq!(deck.current_slide().title(), Some("Migrating to React"));
    assert_eq!(deck.slides()[41].title(), Some("Thank you!"));

    let theme = deck.theme();
    assert_eq!(theme.resolve_color(ColorRole::Quaternary).value, "#CECECE");
    assert_eq!(theme.resolve_font(FontRole::Secondary).value, "Helvetica");

    // The full palette is defined, so nothing falls back
    assert!(deck.check().is_empty());
}

#[test]
fn test_bundled_talk_content() {
    let mut deck = Deck::from_file(bundled_deck_path()).unwrap();

    // "Now that our components are focused on rendering..." with a bold span
    let bold = deck
        .slides()
        .iter()
        .flat_map(|s| s.nodes.iter())
        .find_map(|n| match n {
            ContentNode::Text(t) => t
                .spans
                .iter()
                .find(|s| s.emphasis == Some(Emphasis::Bold))
                .cloned(),
            _ => None,
        })
        .unwrap();
    assert_eq!(bold.text, "React");

    // First code slide follows "Example 1: Basic Props"
    let example = deck
        .slides()
        .iter()
        .position(|s| s.title() == Some("Example 1: Basic Props"))
        .unwrap();
    deck.go_to_index(example as isize + 1).unwrap();

    let code = deck.render_current().iter().next().unwrap();
    match code.content {
        PaintContent::Code { language, source } => {
            assert_eq!(language, Some("js"));
            assert!(source.starts_with("const helloWorldComponent = {"));
            assert!(source.contains("\n  bindings: {"));
        }
        other => panic!("Expected code, got {:?}", other),
    }
    assert_eq!(code.style.font_size, Some(20));
}

#[test]
fn test_deck_file_round_trip_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("talk.toml");
    fs::write(
        &path,
        r##"
[deck]
title = "Lightning"
transition = "spin"
transition_duration_ms = 250
policy = "wrap"

[theme.colors]
primary = "#000"

[[slides]]
[[slides.nodes]]
type = "heading"
level = 2
text = "One"

[[slides]]
transition = "fade"
[[slides.nodes]]
type = "image"
src = "diagram.png"
alt = "Diagram"
"##,
    )
    .unwrap();

    let mut deck = Deck::from_file(&path).unwrap();
    assert_eq!(deck.policy(), BoundaryPolicy::Wrap);

    let change = deck.go_to_next();
    assert_eq!(change.transition.kind, TransitionKind::Fade);
    assert_eq!(change.transition.duration_ms, 250);

    let change = deck.go_to_next();
    assert_eq!(change.to, 0);
    assert_eq!(change.transition.kind, TransitionKind::Spin);
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = Deck::from_file(temp_dir.path().join("nope.toml")).unwrap_err();
    assert_eq!(err.code(), "DECK005");
}
