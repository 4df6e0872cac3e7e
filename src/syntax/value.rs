//! Semantic values of forms and their printed representation.
//!
//! [`sexpr`] reads a green element as a host value the way the Clojure reader
//! would (best effort: reader conditionals, discards and unbalanced maps have
//! no value). `Display` prints a value back as readable source.

use super::{GreenElementRef, forms_of, kind_of, token_text};
use crate::parser::SyntaxKind;
use rowan::NodeOrToken;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;
use std::fmt;

/// A semantic value read from a form
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Ratio(i64, i64),
    Str(String),
    Char(char),
    /// Keyword name without its leading `:` (`::a` is stored as `:a`)
    Keyword(SmolStr),
    Symbol(SmolStr),
    Regex(String),
    List(Vec<Value>),
    Vector(Vec<Value>),
    /// Entries in source order
    Map(Vec<(Value, Value)>),
    /// Elements in source order
    Set(Vec<Value>),
    Tagged(SmolStr, Box<Value>),
}

impl Value {
    pub fn symbol(name: impl Into<SmolStr>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn keyword(name: impl Into<SmolStr>) -> Self {
        Value::Keyword(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// Read a single form from source text into a value
    pub fn read(text: &str) -> Result<Value, String> {
        let form = crate::parser::parse_form(text)?;
        sexpr(super::as_ref(&form)).ok_or_else(|| format!("{text:?} has no semantic value"))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Elements of a sequential or set value; map entries become `[k v]` vectors
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) | Value::Vector(items) | Value::Set(items) => Some(items.clone()),
            Value::Map(entries) => Some(
                entries
                    .iter()
                    .map(|(k, v)| Value::Vector(vec![k.clone(), v.clone()]))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Ratio(an, ad), Ratio(bn, bd)) => an == bn && ad == bd,
            (Str(a), Str(b)) | (Regex(a), Regex(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Keyword(a), Keyword(b)) | (Symbol(a), Symbol(b)) => a == b,
            (List(a), List(b)) | (Vector(a), Vector(b)) => a == b,
            (Set(a), Set(b)) => a.len() == b.len() && a.iter().all(|x| b.contains(x)),
            (Map(a), Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| k == bk && v == bv))
            }
            (Tagged(at, av), Tagged(bt, bv)) => at == bt && av == bv,
            _ => false,
        }
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Semantic value of an element, `None` if it is not a complete form
pub fn sexpr(el: GreenElementRef<'_>) -> Option<Value> {
    let kind = kind_of(el);
    match el {
        NodeOrToken::Token(token) => read_atom(kind, token.text()),
        NodeOrToken::Node(node) => {
            let forms = forms_of(node);
            let values = || forms.iter().map(|f| sexpr(*f)).collect::<Option<Vec<_>>>();
            match kind {
                SyntaxKind::LIST => values().map(Value::List),
                SyntaxKind::VECTOR => values().map(Value::Vector),
                SyntaxKind::SET => values().map(Value::Set),
                SyntaxKind::MAP => {
                    let items = values()?;
                    if items.len() % 2 != 0 {
                        return None;
                    }
                    let entries = items
                        .chunks(2)
                        .map(|pair| (pair[0].clone(), pair[1].clone()))
                        .collect();
                    Some(Value::Map(entries))
                }
                SyntaxKind::FN => values().map(expand_fn_literal),
                SyntaxKind::QUOTE_FORM => wrap_reader("quote", values()?),
                SyntaxKind::SYNTAX_QUOTE_FORM => wrap_reader("syntax-quote", values()?),
                SyntaxKind::UNQUOTE_FORM => wrap_reader("clojure.core/unquote", values()?),
                SyntaxKind::UNQUOTE_SPLICING_FORM => {
                    wrap_reader("clojure.core/unquote-splicing", values()?)
                }
                SyntaxKind::DEREF_FORM => wrap_reader("clojure.core/deref", values()?),
                SyntaxKind::VAR_FORM => wrap_reader("var", values()?),
                SyntaxKind::META_FORM => values()?.pop(),
                SyntaxKind::TAGGED_FORM => {
                    let tag = node
                        .children()
                        .find(|c| kind_of(*c) == SyntaxKind::HASH_TAG)
                        .and_then(token_text)?
                        .trim_start_matches('#');
                    let value = values()?.pop()?;
                    Some(Value::Tagged(SmolStr::new(tag), Box::new(value)))
                }
                _ => None,
            }
        }
    }
}

fn wrap_reader(head: &str, mut inner: Vec<Value>) -> Option<Value> {
    let form = inner.pop()?;
    Some(Value::List(vec![Value::symbol(head), form]))
}

fn read_atom(kind: SyntaxKind, text: &str) -> Option<Value> {
    match kind {
        SyntaxKind::SYMBOL => Some(match text {
            "nil" => Value::Nil,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::symbol(text),
        }),
        SyntaxKind::KEYWORD => Some(Value::keyword(text.strip_prefix(':')?)),
        SyntaxKind::NUMBER => read_number(text),
        SyntaxKind::STRING => Some(Value::Str(unescape(text.get(1..text.len() - 1)?))),
        SyntaxKind::CHAR => read_char(text.strip_prefix('\\')?).map(Value::Char),
        SyntaxKind::REGEX => Some(Value::Regex(text.get(2..text.len() - 1)?.to_string())),
        _ => None,
    }
}

fn read_number(text: &str) -> Option<Value> {
    match text {
        "##Inf" => return Some(Value::Float(f64::INFINITY)),
        "##-Inf" => return Some(Value::Float(f64::NEG_INFINITY)),
        "##NaN" => return Some(Value::Float(f64::NAN)),
        _ => {}
    }

    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let sign = if negative { -1.0 } else { 1.0 };

    if let Some((num, den)) = body.split_once('/') {
        return ratio(int(num, 10, negative)?, int(den, 10, false)?);
    }
    if let Some(digits) = body.strip_suffix('N') {
        return int(digits, 10, negative).map(Value::Int);
    }
    if let Some(float) = body.strip_suffix('M') {
        return float.parse::<f64>().ok().map(|f| Value::Float(sign * f));
    }
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        return int(hex, 16, negative).map(Value::Int);
    }
    if let Some((radix, digits)) = body.split_once(['r', 'R']) {
        let radix: u32 = radix.parse().ok()?;
        if !(2..=36).contains(&radix) {
            return None;
        }
        return int(digits, radix, negative).map(Value::Int);
    }
    if body.bytes().all(|b| b.is_ascii_digit()) {
        let radix = if body.len() > 1 && body.starts_with('0') { 8 } else { 10 };
        return int(body, radix, negative).map(Value::Int);
    }
    body.parse::<f64>().ok().map(|f| Value::Float(sign * f))
}

/// Unsigned `digits` in `radix` with the sign applied; `None` when the digits
/// carry their own sign or the result does not fit an `i64`
fn int(digits: &str, radix: u32, negative: bool) -> Option<i64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// `den` is positive
fn ratio(num: i64, den: i64) -> Option<Value> {
    if den == 0 {
        return None;
    }
    let divisor = gcd(num.unsigned_abs(), den.unsigned_abs());
    let divisor = i64::try_from(divisor).ok()?;
    let (num, den) = (num / divisor, den / divisor);
    if den == 1 {
        Some(Value::Int(num))
    } else {
        Some(Value::Ratio(num, den))
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a.max(1) } else { gcd(b, a % b) }
}

fn read_char(body: &str) -> Option<char> {
    match body {
        "newline" => Some('\n'),
        "space" => Some(' '),
        "tab" => Some('\t'),
        "formfeed" => Some('\u{0C}'),
        "backspace" => Some('\u{08}'),
        "return" => Some('\r'),
        _ => {
            let mut chars = body.chars();
            let first = chars.next()?;
            if chars.as_str().is_empty() {
                return Some(first);
            }
            match first {
                'u' => u32::from_str_radix(chars.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32),
                'o' => u32::from_str_radix(chars.as_str(), 8)
                    .ok()
                    .and_then(char::from_u32),
                _ => None,
            }
        }
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// `#(f % %2)` reads as `(fn* [%1 %2] (f %1 %2))`
fn expand_fn_literal(body: Vec<Value>) -> Value {
    let mut max_arg = 0;
    let mut rest = false;
    for value in &body {
        scan_fn_args(value, &mut max_arg, &mut rest);
    }

    let mut params: Vec<Value> = (1..=max_arg)
        .map(|i| Value::symbol(format!("%{i}")))
        .collect();
    if rest {
        params.push(Value::symbol("&"));
        params.push(Value::symbol("%&"));
    }
    let body = body.into_iter().map(rename_bare_arg).collect();
    Value::List(vec![
        Value::symbol("fn*"),
        Value::Vector(params),
        Value::List(body),
    ])
}

fn scan_fn_args(value: &Value, max_arg: &mut usize, rest: &mut bool) {
    match value {
        Value::Symbol(name) if name == "%" => *max_arg = (*max_arg).max(1),
        Value::Symbol(name) if name == "%&" => *rest = true,
        Value::Symbol(name) => {
            if let Some(n) = name.strip_prefix('%').and_then(|n| n.parse::<usize>().ok()) {
                *max_arg = (*max_arg).max(n);
            }
        }
        Value::List(items) | Value::Vector(items) | Value::Set(items) => {
            for item in items {
                scan_fn_args(item, max_arg, rest);
            }
        }
        Value::Map(entries) => {
            for (k, v) in entries {
                scan_fn_args(k, max_arg, rest);
                scan_fn_args(v, max_arg, rest);
            }
        }
        _ => {}
    }
}

fn rename_bare_arg(value: Value) -> Value {
    match value {
        Value::Symbol(name) if name == "%" => Value::symbol("%1"),
        Value::List(items) => Value::List(items.into_iter().map(rename_bare_arg).collect()),
        Value::Vector(items) => Value::Vector(items.into_iter().map(rename_bare_arg).collect()),
        Value::Set(items) => Value::Set(items.into_iter().map(rename_bare_arg).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (rename_bare_arg(k), rename_bare_arg(v)))
                .collect(),
        ),
        other => other,
    }
}

// ============================================================================
// Printing
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_nan() => f.write_str("##NaN"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "##Inf" } else { "##-Inf" })
            }
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Ratio(n, d) => write!(f, "{n}/{d}"),
            Value::Str(s) => write_escaped(f, s),
            Value::Char(c) => match c {
                '\n' => f.write_str("\\newline"),
                ' ' => f.write_str("\\space"),
                '\t' => f.write_str("\\tab"),
                '\r' => f.write_str("\\return"),
                '\u{0C}' => f.write_str("\\formfeed"),
                '\u{08}' => f.write_str("\\backspace"),
                c => write!(f, "\\{c}"),
            },
            Value::Keyword(name) => write!(f, ":{name}"),
            Value::Symbol(name) => f.write_str(name),
            Value::Regex(pattern) => write!(f, "#\"{pattern}\""),
            Value::List(items) => write_seq(f, "(", items, ")"),
            Value::Vector(items) => write_seq(f, "[", items, "]"),
            Value::Set(items) => write_seq(f, "#{", items, "}"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                f.write_str("}")
            }
            Value::Tagged(tag, value) => write!(f, "#{tag} {value}"),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

// Values travel as their printed source text.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Value::read(&text).map_err(serde::de::Error::custom)
    }
}
