use super::*;
use crate::star::{build_stars, StarRecord};

fn stars(positions: &[(f32, f32)]) -> StarList {
    let records: Vec<StarRecord> = positions
        .iter()
        .enumerate()
        .map(|(idx, &(x, y))| StarRecord::new(format!("Star{}", idx + 1), x, y, 100.0))
        .collect();
    build_stars(&records).unwrap()
}

fn editor(positions: &[(f32, f32)]) -> EditorState {
    EditorState::new(stars(positions), EditorConfig::default()).unwrap()
}

#[test]
fn two_selections_commit_one_link() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0)]);

    assert_eq!(editor.on_click(0.5, 0.5), ClickOutcome::StarSelected(StarId(0)));
    assert_eq!(editor.pending(), PendingSelection::One(StarId(0)));

    let outcome = editor.on_click(9.0, 0.3);
    let ClickOutcome::LinkAdded(link) = outcome else {
        panic!("expected a link, got {outcome:?}");
    };
    assert_eq!((link.a, link.b), (StarId(0), StarId(1)));
    assert_eq!(link.start, Vec2::new(0.0, 0.0));
    assert_eq!(link.end, Vec2::new(10.0, 0.0));
    assert_eq!(editor.links().len(), 1);
    assert_eq!(editor.pending(), PendingSelection::Empty);

    // A third click starts a new selection instead of duplicating the link.
    assert_eq!(editor.on_click(-0.5, 3.0), ClickOutcome::StarSelected(StarId(0)));
    assert_eq!(editor.links().len(), 1);
    assert_eq!(editor.pending(), PendingSelection::One(StarId(0)));
}

#[test]
fn same_star_twice_creates_no_link() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0)]);

    editor.on_click(0.0, 3.0);
    assert_eq!(
        editor.on_click(-1.0, -3.0),
        ClickOutcome::SelectionCleared(StarId(0))
    );
    assert!(editor.links().is_empty());
    assert_eq!(editor.pending(), PendingSelection::Empty);
}

#[test]
fn click_on_link_removes_it_without_selecting() {
    let mut editor = EditorState::new(
        stars(&[(0.0, 0.0), (10.0, 0.0), (5.0, 0.5)]),
        EditorConfig {
            link_removal_tolerance: 2.0,
            ..EditorConfig::default()
        },
    )
    .unwrap();
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 0.0);
    assert_eq!(editor.links().len(), 1);

    // Star 2 is the nearest star, but the link takes precedence.
    let outcome = editor.on_click(5.0, 0.1);

    assert!(matches!(outcome, ClickOutcome::LinkRemoved(ref link) if link.connects(StarId(1), StarId(0))));
    assert!(editor.links().is_empty());
    assert_eq!(editor.pending(), PendingSelection::Empty);
}

#[test]
fn removal_keeps_pending_selection() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0), (0.0, 20.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 0.0);
    editor.on_click(0.0, 20.0);
    assert_eq!(editor.pending(), PendingSelection::One(StarId(2)));

    assert!(matches!(editor.on_click(5.0, 0.0), ClickOutcome::LinkRemoved(_)));
    assert_eq!(editor.pending(), PendingSelection::One(StarId(2)));
}

#[test]
fn removal_takes_first_link_in_creation_order() {
    // Lines y = 0 and y = 25 - x cross at (25, 0).
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0), (30.0, -5.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 0.0);
    editor.on_click(20.0, 5.0);
    editor.on_click(30.0, -5.0);
    assert_eq!(editor.links().len(), 2);

    let ClickOutcome::LinkRemoved(removed) = editor.on_click(25.0, 0.0) else {
        panic!("expected removal");
    };
    assert_eq!(removed.id, LinkId(0));
    assert_eq!(editor.links().len(), 1);
    assert_eq!(editor.links()[0].id, LinkId(1));
}

#[test]
fn clicking_a_linked_star_on_the_line_removes_the_link() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 10.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 10.0);

    assert!(matches!(editor.on_click(10.0, 10.0), ClickOutcome::LinkRemoved(_)));
    assert_eq!(editor.pending(), PendingSelection::Empty);
}

#[test]
fn collinear_click_past_segment_still_hits_infinite_line() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0), (60.0, 5.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 0.0);

    assert!(matches!(editor.on_click(50.0, 1.0), ClickOutcome::LinkRemoved(_)));
}

#[test]
fn segment_mode_ignores_clicks_past_the_end() {
    let mut editor = EditorState::new(
        stars(&[(0.0, 0.0), (10.0, 0.0), (60.0, 5.0)]),
        EditorConfig {
            link_hit_mode: LineHitMode::Segment,
            ..EditorConfig::default()
        },
    )
    .unwrap();
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 0.0);

    assert_eq!(editor.on_click(50.0, 1.0), ClickOutcome::StarSelected(StarId(2)));
    assert_eq!(editor.links().len(), 1);
    assert!(matches!(editor.on_click(5.0, 1.0), ClickOutcome::LinkRemoved(_)));
}

#[test]
fn equidistant_stars_resolve_to_lowest_id() {
    let mut editor = editor(&[(-3.0, 0.0), (3.0, 0.0), (0.0, 3.0)]);

    for _ in 0..3 {
        assert_eq!(editor.on_click(0.0, 0.0), ClickOutcome::StarSelected(StarId(0)));
        assert_eq!(editor.on_click(0.0, 0.0), ClickOutcome::SelectionCleared(StarId(0)));
    }
}

#[test]
fn linking_an_existing_pair_is_rejected() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 10.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(10.0, 10.0);

    // Off the line by ~2.83, beyond the removal tolerance.
    assert_eq!(editor.on_click(10.0, 14.0), ClickOutcome::StarSelected(StarId(1)));
    assert_eq!(editor.on_click(0.0, -4.0), ClickOutcome::AlreadyLinked(LinkId(0)));
    assert_eq!(editor.links().len(), 1);
    assert_eq!(editor.pending(), PendingSelection::Empty);
}

#[test]
fn link_keeps_captured_coordinates() {
    let mut editor = editor(&[(1.0, 2.0), (7.0, 9.0)]);
    editor.on_click(1.0, 2.0);
    editor.on_click(7.0, 9.0);

    let link = &editor.links()[0];
    assert_eq!(link.start, editor.stars().stars()[0].pos());
    assert_eq!(link.end, editor.stars().stars()[1].pos());
}

#[test]
fn click_without_stars_is_ignored() {
    let mut editor = editor(&[]);
    let outcome = editor.on_click(1.0, 1.0);

    assert_eq!(outcome, ClickOutcome::Ignored);
    assert!(!outcome.needs_redraw());
    assert_eq!(editor.revision(), 0);
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut editor = editor(&[(0.0, 0.0)]);
    assert_eq!(editor.on_click(f32::NAN, 0.0), ClickOutcome::Ignored);
    assert_eq!(editor.on_pointer_move(0.0, f32::INFINITY), HoverTarget::None);
    assert_eq!(editor.pending(), PendingSelection::Empty);
}

#[test]
fn hover_prefers_stars_over_links() {
    let mut editor = editor(&[(0.0, 0.0), (40.0, 0.0), (20.0, 2.0)]);
    editor.on_click(0.0, 0.0);
    editor.on_click(40.0, 0.0);

    assert_eq!(editor.on_pointer_move(20.0, 1.0), HoverTarget::Star(StarId(2)));
    assert_eq!(editor.on_pointer_move(30.0, -4.0), HoverTarget::Link(LinkId(0)));
    assert_eq!(editor.on_pointer_move(30.0, -6.0), HoverTarget::None);
    assert_eq!(editor.on_pointer_move(30.0, -6.0).cursor(), CursorIcon::Pointer);
    assert_eq!(editor.on_pointer_move(0.5, 0.5).cursor(), CursorIcon::Hand);
}

#[test]
fn hover_radius_is_strict() {
    let editor = editor(&[(0.0, 0.0)]);
    assert_eq!(editor.on_pointer_move(4.9, 0.0), HoverTarget::Star(StarId(0)));
    assert_eq!(editor.on_pointer_move(5.0, 0.0), HoverTarget::None);
}

#[test]
fn hover_does_not_mutate() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0)]);
    editor.on_click(0.0, 0.0);
    let revision = editor.revision();

    editor.on_pointer_move(10.0, 0.0);

    assert_eq!(editor.revision(), revision);
    assert_eq!(editor.pending(), PendingSelection::One(StarId(0)));
}

#[test]
fn every_mutation_requests_redraw() {
    let mut editor = editor(&[(0.0, 0.0), (10.0, 0.0)]);

    let outcomes = [
        editor.on_click(0.0, 0.0),
        editor.on_click(10.0, 0.0),
        editor.on_click(5.0, 0.0),
    ];
    assert!(outcomes.iter().all(ClickOutcome::needs_redraw));
    assert_eq!(editor.revision(), 3);

    editor.rename_title("Cygnus constellation");
    assert_eq!(editor.title(), "Cygnus constellation");
    assert_eq!(editor.revision(), 4);
}

#[test]
fn new_editor_has_default_title() {
    let editor = editor(&[(0.0, 0.0)]);
    assert_eq!(editor.title(), DEFAULT_TITLE);
    assert!(editor.links().is_empty());
}

#[test]
fn presentation_parameters_are_validated() {
    assert!(create_editor(stars(&[(0.0, 0.0)]), 1.5, 8.0).is_ok());

    let err = create_editor(stars(&[]), 0.0, 5.0).unwrap_err();
    assert_eq!(
        err,
        InvalidArgument::NonPositive {
            name: "lineWidth",
            value: 0.0
        }
    );
    assert!(create_editor(stars(&[]), 1.0, f32::NAN).is_err());

    let negative = EditorConfig {
        link_removal_tolerance: -1.0,
        ..EditorConfig::default()
    };
    assert!(EditorState::new(stars(&[]), negative).is_err());
}

#[test]
fn presentation_parameters_pass_through() {
    let editor = create_editor(stars(&[(0.0, 0.0)]), 1.25, 7.0).unwrap();
    assert_eq!(editor.line_width(), 1.25);
    assert_eq!(editor.marker_size(), 7.0);
}
