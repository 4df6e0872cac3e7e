#![allow(clippy::unwrap_used)]

use rstest::rstest;
use zipedit::engine::ZipperInfo;
use zipedit::syntax::NodeTag;
use zipedit::{Direction, EditError, Path, PathStep, Position};

use crate::helpers::session_helpers::{SESSION, current_text, editor_with, walk};
use crate::helpers::source_fixtures::{COMMENTED_VECTOR, NESTED_COLLECTIONS};

use Direction::*;

#[rstest]
#[case(&[Down], "a")]
#[case(&[Down, Right], "(b c)")]
#[case(&[Down, Right, Down], "b")]
#[case(&[Down, Right, Down, Right], "c")]
#[case(&[Down, Right, Down, Right, Up], "(b c)")]
#[case(&[Down, Rightmost], "d")]
#[case(&[Down, Rightmost, Leftmost], "a")]
#[case(&[Down, Rightmost, Left], "(b c)")]
#[case(&[Up], "(a (b c) d)")]
fn test_directional_moves(#[case] moves: &[Direction], #[case] expected: &str) {
    let editor = editor_with("(a (b c) d)");
    walk(&editor, moves);
    assert_eq!(current_text(&editor), expected);
}

#[test]
fn test_next_and_prev_walk_depth_first() {
    let editor = editor_with("(a (b c) d) e");
    let mut seen = vec![current_text(&editor)];
    while editor.navigate(SESSION, Next, 1).is_ok() {
        seen.push(current_text(&editor));
    }
    assert_eq!(seen, vec!["(a (b c) d)", "a", "(b c)", "b", "c", "d", "e"]);

    let mut back = Vec::new();
    while editor.navigate(SESSION, Prev, 1).is_ok() {
        back.push(current_text(&editor));
    }
    assert_eq!(
        back,
        vec!["d", "c", "b", "(b c)", "a", "(a (b c) d)", "(a (b c) d) e"]
    );
}

#[test]
fn test_trivia_is_never_a_target() {
    let editor = editor_with(COMMENTED_VECTOR);
    let texts: Vec<_> = [Down, Right, Right]
        .iter()
        .map(|dir| {
            editor.navigate(SESSION, *dir, 1).unwrap();
            current_text(&editor)
        })
        .collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
    assert!(editor.navigate(SESSION, Right, 1).is_err());
}

#[test]
fn test_discarded_forms_are_skipped() {
    let editor = editor_with("(a #_b c)");
    walk(&editor, &[Down, Right]);
    assert_eq!(current_text(&editor), "c");
}

#[test]
fn test_multi_step_is_atomic() {
    let editor = editor_with("(a b c)");
    walk(&editor, &[Down]);
    let err = editor.navigate(SESSION, Right, 3).unwrap_err();
    assert!(matches!(err, EditError::NavigationFailed(_)));
    assert_eq!(current_text(&editor), "a");

    let info = editor.navigate(SESSION, Right, 2).unwrap();
    assert_eq!(info.current.text, "c");
}

#[test]
fn test_zero_steps_is_a_no_op() {
    let editor = editor_with("(a b)");
    let before = editor.zipper_info(SESSION).unwrap();
    let after = editor.navigate(SESSION, Down, 0).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_root_bounds() {
    let editor = editor_with("(a) (b)");
    let info: ZipperInfo = walk(&editor, &[Up]);
    assert_eq!(info.current.tag, NodeTag::Forms);
    assert!(info.parent.is_none());
    assert!(editor.navigate(SESSION, Up, 1).is_err());
    assert!(editor.navigate(SESSION, Leftmost, 1).is_err());
    assert!(editor.navigate(SESSION, Right, 1).is_err());
}

#[test]
fn test_navigate_to_path() {
    let editor = editor_with(NESTED_COLLECTIONS);
    let path = Path::new(vec![
        PathStep::Nth(0),
        PathStep::Nth(1),
        PathStep::Nth(1),
        PathStep::Nth(1),
        PathStep::Nth(2),
    ]);
    let info = editor.navigate_to_path(SESSION, &path).unwrap();
    assert_eq!(info.current.text, "#{3}");
    assert_eq!(info.current.depth, 5);

    let bad = Path::new(vec![PathStep::Nth(0), PathStep::Nth(9)]);
    assert!(matches!(
        editor.navigate_to_path(SESSION, &bad),
        Err(EditError::NotFound(_))
    ));
    assert_eq!(current_text(&editor), "#{3}");
}

#[test]
fn test_node_info_flags() {
    let editor = editor_with("(f x)\n(g)");
    let info = walk(&editor, &[Right, Down]);
    assert_eq!(info.current.text, "g");
    assert!(info.current.at_document_end);
    assert!(!info.current.has_left_sibling);
    assert!(!info.current.has_right_sibling);
    assert_eq!(info.current.span.start, Position::new(1, 1));
    assert_eq!(info.parent.unwrap().text, "(g)");
    assert_eq!(info.left_siblings.len(), 0);
}

#[test]
fn test_zipper_info_lists_children_and_siblings() {
    let editor = editor_with("(x [1 2 3] y)");
    let info = walk(&editor, &[Down, Right]);
    let children: Vec<_> = info.children.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(children, vec!["1", "2", "3"]);
    assert_eq!(info.left_siblings[0].text, "x");
    assert_eq!(info.right_siblings[0].text, "y");
}
