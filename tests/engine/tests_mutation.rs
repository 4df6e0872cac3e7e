#![allow(clippy::unwrap_used)]

use zipedit::syntax::NodeTag;
use zipedit::{CollectionTarget, Direction, EditError, Value};

use crate::helpers::session_helpers::{SESSION, current_text, document, editor_with, walk};
use crate::helpers::source_fixtures::COMMENTED_VECTOR;

use Direction::*;

#[test]
fn test_replace_keeps_surrounding_layout() {
    let editor = editor_with("(defn f [x]\n  ;; doubles\n  (* x 2))");
    walk(&editor, &[Down, Rightmost]);
    let info = editor.replace(SESSION, "(+ x x)").unwrap();
    assert_eq!(info.current.text, "(+ x x)");
    assert_eq!(document(&editor), "(defn f [x]\n  ;; doubles\n  (+ x x))");
}

#[test]
fn test_replace_requires_single_form() {
    let editor = editor_with("(a b)");
    walk(&editor, &[Down]);
    for content in ["", "x y", "(unclosed", ")"] {
        let err = editor.replace(SESSION, content).unwrap_err();
        assert!(
            matches!(err, EditError::ParseFailure(_)),
            "{content:?} gave {err}"
        );
    }
    assert_eq!(document(&editor), "(a b)");
}

#[test]
fn test_replace_root_is_not_applicable() {
    let editor = editor_with("(a)");
    walk(&editor, &[Up]);
    assert!(matches!(
        editor.replace(SESSION, "b"),
        Err(EditError::OperationNotApplicable(_))
    ));
}

#[test]
fn test_edit_applies_function_to_value() {
    let editor = editor_with("{:count 1}");
    walk(&editor, &[Down, Right]);
    let info = editor
        .edit(SESSION, |value| match value {
            Value::Int(n) => Value::Int(n + 1),
            other => other,
        })
        .unwrap();
    assert_eq!(info.current.value, Some(Value::Int(2)));
    assert_eq!(document(&editor), "{:count 2}");
}

#[test]
fn test_edit_prints_collections() {
    let editor = editor_with("(f [3 1 2])");
    walk(&editor, &[Down, Right]);
    editor
        .edit(SESSION, |value| match value {
            Value::Vector(mut items) => {
                items.reverse();
                Value::List(items)
            }
            other => other,
        })
        .unwrap();
    assert_eq!(document(&editor), "(f (2 1 3))");
}

#[test]
fn test_insert_before_and_after() {
    let editor = editor_with("(a c)");
    walk(&editor, &[Down, Right]);
    editor.insert_before(SESSION, "b").unwrap();
    let info = editor.insert_after(SESSION, "[d]").unwrap();
    assert_eq!(info.current.text, "c");
    assert_eq!(document(&editor), "(a b c [d])");
}

#[test]
fn test_top_level_inserts_use_newlines() {
    let editor = editor_with("(ns a)");
    editor.insert_after(SESSION, "(def x 1)").unwrap();
    editor.insert_before(SESSION, ";; never a comment").unwrap_err();
    assert_eq!(document(&editor), "(ns a)\n(def x 1)");
}

#[test]
fn test_remove_returns_value_and_moves_left() {
    let editor = editor_with("(a b c)");
    walk(&editor, &[Down, Right, Right]);
    let removed = editor.remove(SESSION).unwrap();
    assert_eq!(removed.value, Some(Value::symbol("c")));
    assert_eq!(removed.info.current.text, "b");
    assert_eq!(document(&editor), "(a b)");
}

#[test]
fn test_remove_first_child_moves_to_parent() {
    let editor = editor_with("(a b)");
    walk(&editor, &[Down]);
    let removed = editor.remove(SESSION).unwrap();
    assert_eq!(removed.info.current.text, "(b)");
    assert_eq!(document(&editor), "(b)");
}

#[test]
fn test_remove_preserves_comments() {
    let editor = editor_with(COMMENTED_VECTOR);
    walk(&editor, &[Down, Right]);
    editor.remove(SESSION).unwrap();
    assert_eq!(document(&editor), "[1 ; one\n ; two\n 3]");
    assert_eq!(current_text(&editor), "1");
}

#[test]
fn test_assoc_scenario() {
    let editor = editor_with("{:a 1}");
    let info = editor.assoc(SESSION, ":b", "2").unwrap();
    assert_eq!(
        info.current.value,
        Some(Value::read("{:a 1, :b 2}").unwrap())
    );
    assert_eq!(info.current.value.unwrap().to_string(), "{:a 1, :b 2}");
}

#[test]
fn test_assoc_overwrites_and_dissoc_removes() {
    let editor = editor_with("{:a 1, :b 2}");
    editor.assoc(SESSION, ":b", "[3]").unwrap();
    assert_eq!(document(&editor), "{:a 1, :b [3]}");
    editor.dissoc(SESSION, ":a").unwrap();
    assert_eq!(document(&editor), "{:b [3]}");
    editor.dissoc(SESSION, ":missing").unwrap();
    assert_eq!(document(&editor), "{:b [3]}");
}

#[test]
fn test_get_moves_to_value() {
    let editor = editor_with("{:a 1 :b {:c 2}}");
    let info = editor.get(SESSION, ":b").unwrap();
    assert_eq!(info.current.text, "{:c 2}");
    let info = editor.get(SESSION, ":c").unwrap();
    assert_eq!(info.current.text, "2");
    assert!(matches!(
        editor.get(SESSION, ":c"),
        Err(EditError::WrongNodeKind { .. })
    ));
}

#[test]
fn test_map_operations_need_a_map() {
    let editor = editor_with("[1 2]");
    let err = editor.assoc(SESSION, ":a", "1").unwrap_err();
    assert!(matches!(
        err,
        EditError::WrongNodeKind {
            expected: "map",
            found: NodeTag::Vector
        }
    ));
    assert_eq!(err.to_string(), "Wrong node kind: expected map, found vector");
}

#[test]
fn test_append_child_only_on_vectors() {
    let editor = editor_with("([1] (2))");
    walk(&editor, &[Down]);
    editor.append_child(SESSION, "{:k 3}").unwrap();
    assert_eq!(document(&editor), "([1 {:k 3}] (2))");

    walk(&editor, &[Right]);
    assert!(matches!(
        editor.append_child(SESSION, "3"),
        Err(EditError::WrongNodeKind { .. })
    ));
}

#[test]
fn test_transform_collection_type() {
    let editor = editor_with("(use [1 1 2])");
    walk(&editor, &[Down, Right]);
    let info = editor
        .transform_collection_type(SESSION, CollectionTarget::Set)
        .unwrap();
    assert_eq!(info.current.text, "#{1 2}");
    editor
        .transform_collection_type(SESSION, CollectionTarget::List)
        .unwrap();
    assert_eq!(document(&editor), "(use (1 2))");
}

#[test]
fn test_transform_map_into_pairs() {
    let editor = editor_with("{:a 1 :b 2}");
    editor
        .transform_collection_type(SESSION, CollectionTarget::Vector)
        .unwrap();
    assert_eq!(document(&editor), "[[:a 1] [:b 2]]");
}

#[test]
fn test_transform_rejects_atoms() {
    let editor = editor_with("(f x)");
    walk(&editor, &[Down]);
    assert!(matches!(
        editor.transform_collection_type(SESSION, CollectionTarget::Vector),
        Err(EditError::WrongNodeKind { .. })
    ));
}

#[test]
fn test_reader_prefix_forms_stay_readable() {
    let editor = editor_with("'x");
    walk(&editor, &[Down]);
    assert!(matches!(
        editor.remove(SESSION),
        Err(EditError::OperationNotApplicable(_))
    ));
    assert!(editor.insert_before(SESSION, "y").is_err());
    assert_eq!(document(&editor), "'x");

    let editor = editor_with("^:m x");
    walk(&editor, &[Down, Right]);
    assert!(matches!(
        editor.insert_after(SESSION, "y"),
        Err(EditError::OperationNotApplicable(_))
    ));
    assert_eq!(current_text(&editor), "x");
    editor.replace(SESSION, "y").unwrap();

    let saved = document(&editor);
    assert_eq!(saved, "^:m y");
    editor_with(&saved);
}
