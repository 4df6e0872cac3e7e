#![allow(clippy::unwrap_used)]

use zipedit::engine::{BulkKind, BulkOperation};
use zipedit::{EditorConfig, Path, PathStep, WrapperKind};

use crate::helpers::session_helpers::{
    SESSION, current_text, document, editor_with, editor_with_config,
};

use PathStep::Nth;

fn op(steps: &[PathStep], kind: BulkKind, content: &str) -> BulkOperation {
    BulkOperation::new(steps.iter().copied().collect(), kind, content)
}

#[test]
fn test_bulk_insert_applies_deepest_first() {
    let editor = editor_with("(defn f [x] (g x))");
    let outcome = editor
        .bulk_insert(
            SESSION,
            vec![
                op(&[Nth(0), Nth(2)], BulkKind::InsertChild, "y"),
                op(&[Nth(0), Nth(1)], BulkKind::InsertAfter, "\"doc\""),
                op(&[Nth(0), Nth(3), Nth(1)], BulkKind::Replace, "(h x)"),
            ],
        )
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(document(&editor), "(defn f \"doc\" [x y] (g (h x)))");
    assert_eq!(current_text(&editor), "(defn f \"doc\" [x y] (g (h x)))");
}

#[test]
fn test_bulk_insert_skips_failures_without_rollback() {
    let editor = editor_with("(a b)");
    let outcome = editor
        .bulk_insert(
            SESSION,
            vec![
                op(&[Nth(0), Nth(7)], BulkKind::Replace, "x"),
                op(&[Nth(0), Nth(0)], BulkKind::InsertBefore, "z"),
                op(&[Nth(0), Nth(1)], BulkKind::InsertChild, "q"),
            ],
        )
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(document(&editor), "(z a b)");
}

#[test]
fn test_bulk_insert_from_json() {
    let editor = editor_with("[1]");
    let ops: Vec<BulkOperation> = serde_json::from_str(
        r#"[{"path": [{"nth": 0}], "kind": "insert-child", "content": "2"},
            {"path": [{"nth": 0}], "kind": "insert-after", "content": "[3]"}]"#,
    )
    .unwrap();
    editor.bulk_insert(SESSION, ops).unwrap();
    assert_eq!(document(&editor), "[1 2]\n[3]");
}

#[test]
fn test_bulk_wrap() {
    let editor = editor_with("(+ a b c)");
    let paths: Vec<Path> = vec![
        [Nth(0), Nth(1)].into_iter().collect(),
        [Nth(0), Nth(3)].into_iter().collect(),
        [Nth(0), Nth(9)].into_iter().collect(),
    ];
    let outcome = editor
        .bulk_wrap(SESSION, paths, WrapperKind::List)
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(document(&editor), "(+ (a) b (c))");
}

#[test]
fn test_bulk_find_and_replace_bound() {
    let editor = editor_with("(foo [foo {:k foo}] \"foo\" :foo foo/bar)");
    let outcome = editor
        .bulk_find_and_replace(SESSION, "foo", "bar")
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(
        document(&editor),
        "(bar [bar {:k bar}] \"foo\" :foo foo/bar)"
    );
    let again = editor
        .bulk_find_and_replace(SESSION, "foo", "bar")
        .unwrap();
    assert_eq!(again.count, 0);
}

#[test]
fn test_bulk_find_and_replace_cap() {
    let config = EditorConfig {
        replace_iteration_cap: 3,
        ..EditorConfig::default()
    };
    let editor = editor_with_config("(x x x x x)", config);
    let outcome = editor.bulk_find_and_replace(SESSION, "x", "y").unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(document(&editor), "(y y y x x)");
}

#[test]
fn test_bulk_find_and_replace_rejects_bad_replacement() {
    let editor = editor_with("(x)");
    assert!(editor.bulk_find_and_replace(SESSION, "x", "(").is_err());
    assert_eq!(document(&editor), "(x)");
}
