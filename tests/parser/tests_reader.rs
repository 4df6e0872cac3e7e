#![allow(clippy::unwrap_used)]

use rstest::rstest;
use zipedit::Value;
use zipedit::parser::{SyntaxKind, parse, parse_form, tokenize};
use zipedit::syntax::{self, NodeTag};

#[rstest]
#[case("(a [b] {:c d} #{e} #(f %))")]
#[case("'x `(y ~z ~@w) @a #'b ^:m c #_d")]
#[case("#?(:clj 1 :cljs 2) #?@(:clj [3])")]
#[case("#inst \"2024-01-01T00:00:00Z\" #uuid \"00000000-0000-0000-0000-000000000000\"")]
#[case(";; only comments\n, , ,\n")]
fn test_parse_is_lossless(#[case] source: &str) {
    let parsed = parse(source);
    assert!(parsed.ok(), "{}", parsed.error_summary());
    assert_eq!(parsed.syntax().text().to_string(), source);
    let joined: String = tokenize(source).into_iter().map(|t| t.text).collect();
    assert_eq!(joined, source);
}

#[rstest]
#[case("(a", "unclosed")]
#[case("(a]", "mismatched")]
#[case("a)", "unmatched")]
#[case("'", "")]
fn test_parse_errors(#[case] source: &str, #[case] fragment: &str) {
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert!(
        parsed.error_summary().contains(fragment),
        "{}",
        parsed.error_summary()
    );
    assert_eq!(parsed.syntax().text().to_string(), source);
}

#[rstest]
#[case("(a b)", NodeTag::List)]
#[case("[1]", NodeTag::Vector)]
#[case("{}", NodeTag::Map)]
#[case("#{}", NodeTag::Set)]
#[case("#(inc %)", NodeTag::Fn)]
#[case("'x", NodeTag::Quote)]
#[case("@x", NodeTag::Deref)]
#[case("^:k x", NodeTag::Meta)]
#[case("#tag x", NodeTag::Tagged)]
#[case(":kw", NodeTag::Token)]
fn test_single_form_tags(#[case] source: &str, #[case] tag: NodeTag) {
    let form = parse_form(source).unwrap();
    assert_eq!(NodeTag::from(syntax::kind(&form)), tag);
}

#[test]
fn test_parse_form_rejects_multiple_forms() {
    assert!(parse_form("a b").is_err());
    assert!(parse_form("  ").is_err());
    assert!(parse_form(" a ").is_ok());
}

#[rstest]
#[case("nil", Value::Nil)]
#[case("true", Value::Bool(true))]
#[case("-17", Value::Int(-17))]
#[case("4/6", Value::Ratio(2, 3))]
#[case("2.5", Value::Float(2.5))]
#[case("\"a\\nb\"", Value::string("a\nb"))]
#[case("\\newline", Value::Char('\n'))]
#[case("::local", Value::keyword(":local"))]
#[case("ns/sym", Value::symbol("ns/sym"))]
fn test_atom_values(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(Value::read(source).unwrap(), expected);
}

#[rstest]
#[case("-9223372036854775808", Value::Int(i64::MIN))]
#[case("-0x8000000000000000", Value::Int(i64::MIN))]
#[case("0x7fffffffffffffff", Value::Int(i64::MAX))]
#[case("-3/6", Value::Ratio(-1, 2))]
#[case("2r101", Value::Int(5))]
#[case("017", Value::Int(15))]
fn test_integer_limits(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(Value::read(source).unwrap(), expected);
}

#[rstest]
#[case("-0x-8000000000000000")]
#[case("1/-9223372036854775808")]
#[case("1/+2")]
#[case("9223372036854775808")]
#[case("-9223372036854775809N")]
#[case("36r-zz")]
fn test_out_of_range_numbers_have_no_value(#[case] source: &str) {
    let parsed = parse(source);
    assert!(parsed.ok(), "{}", parsed.error_summary());
    assert_eq!(parsed.syntax().text().to_string(), source);
    assert!(Value::read(source).is_err());
}

#[test]
fn test_reader_form_values() {
    let quoted = Value::read("'(a b)").unwrap();
    assert_eq!(quoted.to_string(), "(quote (a b))");
    let template = Value::read("`(a ~b)").unwrap();
    assert_eq!(template.to_string(), "(syntax-quote (a (clojure.core/unquote b)))");
    assert_ne!(template, Value::read("'(a ~b)").unwrap());
    let deref = Value::read("@state").unwrap();
    assert_eq!(deref.to_string(), "(clojure.core/deref state)");
    let with_meta = Value::read("^{:doc \"x\"} [1]").unwrap();
    assert_eq!(with_meta, Value::Vector(vec![Value::Int(1)]));
    let fn_literal = Value::read("#(+ % %2)").unwrap();
    assert_eq!(fn_literal.to_string(), "(fn* [%1 %2] (+ %1 %2))");
}

#[test]
fn test_value_equality_rules() {
    let a = Value::read("{:a 1 :b 2}").unwrap();
    let b = Value::read("{:b 2, :a 1}").unwrap();
    assert_eq!(a, b);
    assert_ne!(Value::read("(1 2)").unwrap(), Value::read("[1 2]").unwrap());
    assert_eq!(Value::read("#{1 2}").unwrap(), Value::read("#{2 1}").unwrap());
}

#[test]
fn test_discard_and_comment_kinds() {
    let parsed = parse("#_x ; c");
    let kinds: Vec<SyntaxKind> = parsed
        .syntax()
        .children_with_tokens()
        .map(|el| el.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::DISCARD_FORM,
            SyntaxKind::WHITESPACE,
            SyntaxKind::COMMENT
        ]
    );
}
