//! A JSON grammar built from the library's combinators.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kombi::combinators::{choice, fail, retn, satisfy};
use kombi::text::{chr, dble, lexeme, none_of, string, wspaces};
use kombi::{Forward, Parser};
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    /// Compact JSON rendering. Strings use Rust escaping.
    fn render(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => n.to_string(),
            Node::Text(s) => format!("{s:?}"),
            Node::Array(items) => {
                let items: Vec<String> = items.iter().map(Node::render).collect();
                format!("[{}]", items.join(","))
            }
            Node::Object(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{name:?}:{}", value.render()))
                    .collect();
                format!("{{{}}}", fields.join(","))
            }
        }
    }
}

/// Insertion-ordered fields; a repeated name keeps its first slot and its
/// last value.
fn to_object(fields: Vec<(String, Node)>) -> Node {
    let mut object: Vec<(String, Node)> = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        match object.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => object.push((name, value)),
        }
    }
    Node::Object(object)
}

fn hex_digit() -> Parser<char, u32> {
    satisfy(char::is_ascii_hexdigit)
        .map(|c| c.to_digit(16).unwrap_or(0))
        .label("hex digit")
}

/// Four hex digits, most significant first.
fn unicode_escape() -> Parser<char, char> {
    hex_digit()
        .and(hex_digit())
        .and(hex_digit())
        .and(hex_digit())
        .map(|(((d0, d1), d2), d3)| (d0 << 12) | (d1 << 8) | (d2 << 4) | d3)
        .bind(|code| match char::from_u32(code) {
            Some(c) => retn(c),
            None => fail().label("unicode scalar value"),
        })
}

fn escape() -> Parser<char, char> {
    choice([
        chr('"'),
        chr('\\'),
        chr('/'),
        chr('b').then(retn('\u{8}')),
        chr('f').then(retn('\u{c}')),
        chr('n').then(retn('\n')),
        chr('r').then(retn('\r')),
        chr('t').then(retn('\t')),
        chr('u').then(unicode_escape()),
    ])
    .label("escape character")
}

fn json_string() -> Parser<char, String> {
    let character = chr('\\').then(escape()).or(none_of("\"\\"));
    lexeme(
        character
            .many()
            .map(|chars| chars.into_iter().collect::<String>())
            .between(chr('"'), chr('"')),
    )
}

fn json() -> Parser<char, Node> {
    let value: Forward<char, Node> = Forward::new();

    let null = lexeme(string("null")).map(|_| Node::Null).label("null");
    let boolean = lexeme(string("true").map(|_| true).or(string("false").map(|_| false)))
        .map(Node::Bool)
        .label("boolean");
    let number = lexeme(dble()).map(Node::Number).label("number");
    let text = json_string().map(Node::Text).label("text");
    let array = value
        .parser()
        .sep_by(lexeme(chr(',')))
        .between(lexeme(chr('[')), lexeme(chr(']')))
        .map(Node::Array)
        .label("array");
    let member = {
        let value = value.parser();
        json_string().bind(move |name| {
            lexeme(chr(':'))
                .then(value.clone())
                .map(move |node| (name.clone(), node))
        })
    };
    let object = member
        .sep_by(lexeme(chr(',')))
        .between(lexeme(chr('{')), lexeme(chr('}')))
        .map(to_object)
        .label("object");

    value.set(choice([null, boolean, number, text, array, object]).label("JSON value"));
    wspaces().then(value.into_parser())
}

fn expected(input: &str) -> (usize, Vec<String>) {
    let failure = json().parse_str(input).unwrap_err();
    let message = failure.message;
    (message.position, message.expected.into_iter().collect())
}

#[test]
fn compact_document() {
    let node = json()
        .parse_str(
            "{\"array\":[1,2,3],\"boolean\":true,\"null\":null,\"number\":123,\
             \"object\":{\"a\":\"b\",\"c\":\"d\",\"e\":\"f\"},\"string\":\"Hello\nWorld\"}",
        )
        .unwrap();
    assert_eq!(
        node.render(),
        r#"{"array":[1,2,3],"boolean":true,"null":null,"number":123,"object":{"a":"b","c":"d","e":"f"},"string":"Hello\nWorld"}"#
    );
}

#[test]
fn spaced_document() {
    let spaced = " { \"array\" : [ 1 , 2 , 3 ] , \"boolean\" : true , \"null\" : null , \
                  \"number\" : 123 , \"object\" : { \"a\" : \"b\" , \"c\" : \"d\" , \
                  \"e\" : \"f\" } , \"string\" : \"Hello World\" } ";
    let compact = "{\"array\":[1,2,3],\"boolean\":true,\"null\":null,\"number\":123,\
                   \"object\":{\"a\":\"b\",\"c\":\"d\",\"e\":\"f\"},\"string\":\"Hello World\"}";
    assert_eq!(json().parse_str(spaced).ok(), json().parse_str(compact).ok());
}

#[test]
fn multiline_document() {
    let input = "{\n  \"array\": [\n    1,\n    true,\n    [1,2,3]\n  ],\n  \"boolean\": true,\n  \
                 \"null\": null,\n  \"number\": 123,\n  \"object\": {\n    \"a\": \"b\",\n    \
                 \"c\": false,\n    \"e\": [6,7,8]\n  },\n  \"string\": \"Hello World\u{1234}\"\n}";
    let node = json().parse_str(input).unwrap();
    let fields = match node {
        Node::Object(fields) => fields,
        other => panic!("expected an object, got {other:?}"),
    };
    let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["array", "boolean", "null", "number", "object", "string"]);
    assert_eq!(
        fields[0].1,
        Node::Array(vec![
            Node::Number(1.0),
            Node::Bool(true),
            Node::Array(vec![Node::Number(1.0), Node::Number(2.0), Node::Number(3.0)]),
        ])
    );
    assert_eq!(fields[5].1, Node::Text("Hello World\u{1234}".to_string()));
}

#[test]
fn escapes() {
    let node = json().parse_str(r#""tab\t quote\" slash\/ back\\ \u00e9\u1234""#).unwrap();
    assert_eq!(node, Node::Text("tab\t quote\" slash/ back\\ \u{e9}\u{1234}".to_string()));
}

#[test]
fn numbers() {
    assert_eq!(json().parse_str("-12.5e1").ok(), Some(Node::Number(-125.0)));
    let list = json().parse_str("[0.25, 4]").unwrap();
    assert_eq!(list.render(), "[0.25,4]");
}

#[test]
fn repeated_member_keeps_first_position() {
    let node = json().parse_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(node.render(), r#"{"a":3,"b":2}"#);
}

#[test]
fn empty_containers() {
    assert_eq!(json().parse_str("[ ]").ok(), Some(Node::Array(Vec::new())));
    assert_eq!(json().parse_str("{}").ok(), Some(Node::Object(Vec::new())));
}

#[test]
fn empty_input_expects_a_value() {
    assert_eq!(expected(""), (0, vec!["JSON value".to_string()]));
    assert_eq!(expected("  ?"), (2, vec!["JSON value".to_string()]));
}

#[test]
fn dangling_comma_is_committed() {
    assert_eq!(expected("[1,]"), (3, vec!["JSON value".to_string()]));
}

#[test]
fn bad_escape() {
    assert_eq!(expected(r#""\q""#), (2, vec!["escape character".to_string()]));
    assert_eq!(expected(r#""\u12G4""#), (5, vec!["hex digit".to_string()]));
}

#[test]
fn missing_colon() {
    assert_eq!(expected(r#"{"a" 1}"#), (5, vec!["':'".to_string()]));
}

#[test]
fn unterminated_string() {
    let (position, labels) = expected("\"abc");
    assert_eq!(position, 4);
    assert!(labels.contains(&"'\"'".to_string()), "labels: {labels:?}");
}
