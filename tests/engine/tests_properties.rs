#![allow(clippy::unwrap_used)]

use std::fs;

use rstest::rstest;
use tempfile::TempDir;
use zipedit::engine::{Editor, Saved, Source};
use zipedit::parser::parse;
use zipedit::{Cursor, Direction, SearchDirection, Value, WrapperKind};

use crate::helpers::session_helpers::{SESSION, current_text, document, editor_with, walk};
use crate::helpers::source_fixtures::{
    COMMENTED_VECTOR, NAMESPACE_WITH_FUNCTIONS, NESTED_COLLECTIONS, READER_FORMS,
};

use Direction::*;

#[rstest]
#[case("")]
#[case("\n\n")]
#[case(NAMESPACE_WITH_FUNCTIONS)]
#[case(NESTED_COLLECTIONS)]
#[case(READER_FORMS)]
#[case(COMMENTED_VECTOR)]
#[case("{:a 1,, :b 2}\r\n; trailing")]
#[case("(str \\a \\space \\u0041 #\"[a-z]+\" 1/2 -3.5e2 0x1F ##Inf)")]
fn test_round_trip(#[case] source: &str) {
    let editor = editor_with(source);
    let saved = editor.save(SESSION, None).unwrap();
    assert_eq!(saved, Saved::Text { text: source.to_string() });
}

#[rstest]
#[case(NAMESPACE_WITH_FUNCTIONS)]
#[case(NESTED_COLLECTIONS)]
#[case(READER_FORMS)]
fn test_navigation_symmetry(#[case] source: &str) {
    let mut cursor = Cursor::start(parse(source).green);
    loop {
        if let Some(child) = cursor.down() {
            assert_eq!(child.up().unwrap().text(), cursor.text());
        }
        if let (Some(left), Some(_)) = (cursor.left(), cursor.right()) {
            assert_eq!(left.right().unwrap(), cursor);
            assert_eq!(cursor.right().unwrap().left().unwrap(), cursor);
        }
        match cursor.next() {
            Some(next) => cursor = next,
            None => break,
        }
    }
}

#[test]
fn test_navigation_symmetry_through_editor() {
    let editor = editor_with("(a b c)");
    walk(&editor, &[Down, Right]);
    walk(&editor, &[Left, Right]);
    assert_eq!(current_text(&editor), "b");
    walk(&editor, &[Up, Down]);
    assert_eq!(current_text(&editor), "a");
}

#[rstest]
#[case("42")]
#[case("{:b [1 2], :a #{\"s\"}}")]
#[case("(fn [x] (* x x))")]
#[case("^:meta sym")]
#[case("'quoted")]
fn test_replace_semantics(#[case] content: &str) {
    let editor = editor_with("(f old)");
    walk(&editor, &[Down, Right]);
    let info = editor.replace(SESSION, content).unwrap();
    let expected = Value::read(content).unwrap();
    assert_eq!(info.current.value, Some(expected));
}

#[test]
fn test_defn_add_scenario() {
    let editor = editor_with("(defn add [a b] (+ a b))");
    let by_symbol = editor
        .find_by_symbol(SESSION, "add", Default::default())
        .unwrap();
    assert_eq!(by_symbol.current.text, "add");
    assert_eq!(
        by_symbol.parent.unwrap().text,
        "(defn add [a b] (+ a b))"
    );

    let definition = editor.find_function_definition(SESSION, "add").unwrap();
    assert_eq!(definition.current.text, "(defn add [a b] (+ a b))");
    assert_eq!(definition.current.depth, 1);
}

#[test]
fn test_insert_after_then_wrap_scenario() {
    let editor = editor_with("(+ 1 (+ 2 3))");
    walk(&editor, &[Down, Right]);
    editor.insert_after(SESSION, "5").unwrap();
    let found = editor
        .find_value(SESSION, SearchDirection::Next, &Value::Int(5))
        .unwrap();
    assert_eq!(found.current.text, "5");
    let wrapped = editor.wrap_around(SESSION, WrapperKind::Vector).unwrap();
    assert_eq!(wrapped.current.text, "[5]");
    assert_eq!(
        wrapped.current.value,
        Some(Value::Vector(vec![Value::Int(5)]))
    );
    assert_eq!(document(&editor), "(+ 1 [5] (+ 2 3))");
}

#[test]
fn test_save_then_reparse_is_self_consistent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("core.clj");
    fs::write(&path, NAMESPACE_WITH_FUNCTIONS).unwrap();

    let editor = Editor::new();
    editor.create_session("file", Source::File(path.clone())).unwrap();
    editor.find_function_definition("file", "add").unwrap();
    editor.navigate("file", Down, 1).unwrap();
    editor.navigate("file", Rightmost, 1).unwrap();
    editor.wrap_around("file", WrapperKind::List).unwrap();
    editor.insert_before("file", "(println a)").unwrap();
    let saved = editor.save("file", None).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, saved.text());
    let reparsed = parse(&written);
    assert!(reparsed.ok(), "{}", reparsed.error_summary());
    assert_eq!(reparsed.syntax().text().to_string(), written);
    assert!(written.contains("(println a) ((+ a b))"));
}
