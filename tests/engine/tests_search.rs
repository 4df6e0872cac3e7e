#![allow(clippy::unwrap_used)]

use zipedit::engine::SymbolMatch;
use zipedit::syntax::NodeTag;
use zipedit::{Direction, EditError, SearchDirection, Value};

use crate::helpers::session_helpers::{SESSION, current_text, editor_with, walk};
use crate::helpers::source_fixtures::NAMESPACE_WITH_FUNCTIONS;

#[test]
fn test_find_value_forward_and_back() {
    let editor = editor_with("(a 1 [b 1] \"1\")");
    let target = Value::Int(1);
    let first = editor
        .find_value(SESSION, SearchDirection::Next, &target)
        .unwrap();
    assert_eq!(first.parent.unwrap().text, "(a 1 [b 1] \"1\")");

    let second = editor
        .find_value(SESSION, SearchDirection::Next, &target)
        .unwrap();
    assert_eq!(second.parent.unwrap().text, "[b 1]");

    assert!(matches!(
        editor.find_value(SESSION, SearchDirection::Next, &target),
        Err(EditError::NotFound(_))
    ));
    assert_eq!(editor.node_info(SESSION).unwrap().depth, 3);

    let back = editor
        .find_value(SESSION, SearchDirection::Prev, &target)
        .unwrap();
    assert_eq!(back.current.depth, 2);
}

#[test]
fn test_find_value_of_collection() {
    let editor = editor_with("(assoc {:b 2 :a 1} :c #{1 2})");
    let map = Value::read("{:a 1 :b 2}").unwrap();
    let info = editor
        .find_value(SESSION, SearchDirection::Next, &map)
        .unwrap();
    assert_eq!(info.current.tag, NodeTag::Map);

    let set = Value::read("#{2 1}").unwrap();
    let info = editor
        .find_value(SESSION, SearchDirection::Next, &set)
        .unwrap();
    assert_eq!(info.current.text, "#{1 2}");
}

#[test]
fn test_find_by_predicate() {
    let editor = editor_with("(x [1] (y) #{})");
    let info = editor
        .find_by_predicate(SESSION, SearchDirection::Next, |cursor| {
            cursor.tag() == NodeTag::Set
        })
        .unwrap();
    assert_eq!(info.current.text, "#{}");

    let missing = editor.find_by_predicate(SESSION, SearchDirection::Next, |cursor| {
        cursor.tag() == NodeTag::Map
    });
    assert!(missing.is_err());
    assert_eq!(current_text(&editor), "#{}");
}

#[test]
fn test_find_by_symbol_scans_whole_document() {
    let editor = editor_with(NAMESPACE_WITH_FUNCTIONS);
    walk(&editor, &[Direction::Right, Direction::Right]);
    let info = editor
        .find_by_symbol(SESSION, "ns", SymbolMatch::exact())
        .unwrap();
    assert_eq!(info.current.text, "ns");
    assert_eq!(info.current.span.start.line, 0);
}

#[test]
fn test_find_by_symbol_keyword_equivalence() {
    let editor = editor_with(NAMESPACE_WITH_FUNCTIONS);
    let info = editor
        .find_by_symbol(SESSION, "port", SymbolMatch::exact())
        .unwrap();
    assert_eq!(info.current.text, ":port");

    let info = editor
        .find_by_symbol(SESSION, ":ns", SymbolMatch::exact())
        .unwrap();
    assert_eq!(info.current.text, "ns");
}

#[test]
fn test_find_by_symbol_substring_fallback() {
    let editor = editor_with(NAMESPACE_WITH_FUNCTIONS);
    assert!(
        editor
            .find_by_symbol(SESSION, "help", SymbolMatch::exact())
            .is_err()
    );
    let info = editor
        .find_by_symbol(SESSION, "help", SymbolMatch::default())
        .unwrap();
    assert_eq!(info.current.text, "helper");

    let folded = SymbolMatch {
        exact: false,
        case_sensitive: false,
    };
    let info = editor.find_by_symbol(SESSION, "STRING", folded).unwrap();
    assert_eq!(info.current.text, "clojure.string");
}

#[test]
fn test_find_function_definition() {
    let editor = editor_with(NAMESPACE_WITH_FUNCTIONS);
    let info = editor.find_function_definition(SESSION, "helper").unwrap();
    assert_eq!(info.current.text, "(defn- ^:private helper [x]\n  (* x 2))");

    let info = editor.find_function_definition(SESSION, "config").unwrap();
    assert!(info.current.text.starts_with("(def config"));

    assert!(matches!(
        editor.find_function_definition(SESSION, "nope"),
        Err(EditError::NotFound(_))
    ));
}

#[test]
fn test_next_and_prev_function() {
    let editor = editor_with(NAMESPACE_WITH_FUNCTIONS);
    let add = editor.find_next_function(SESSION).unwrap();
    assert_eq!(add.current.text, "(defn add [a b]\n  (+ a b))");
    let helper = editor.find_next_function(SESSION).unwrap();
    assert!(helper.current.text.contains("helper"));
    let config = editor.find_next_function(SESSION).unwrap();
    assert!(config.current.text.starts_with("(def config"));
    assert!(editor.find_next_function(SESSION).is_err());

    let back = editor.find_prev_function(SESSION).unwrap();
    assert_eq!(back.current.text, helper.current.text);
}
