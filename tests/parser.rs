#[macro_use]
mod common;

use std::fs;
use std::time::Instant;

use bytesize::ByteSize;
use rstest::rstest;

use dsjson::errors::{Details, Expected, Stage};
use dsjson::lexer::TokenKind;
use dsjson::{parse_bytes, parse_str, EscapePolicy, JsonValue, Parser, ParserOptions};

#[test]
fn should_parse_basic_test_files() {
    for f in fs::read_dir(relative_file!("fixtures/json/valid")).unwrap() {
        let path = f.unwrap().path();
        if path.is_file() {
            let bytes = fs::read(&path).unwrap();
            let start = Instant::now();
            let parsed = parse_bytes(&bytes);
            if parsed.is_err() {
                println!("Parse of {:?} failed with {:?}", &path, &parsed);
            }
            assert!(parsed.is_ok());
            println!(
                "Parsed {} in {:?} [{:?}]",
                ByteSize(bytes.len() as u64),
                start.elapsed(),
                path,
            );
        }
    }
}

#[test]
fn should_successfully_bail_on_invalid_files() {
    for f in fs::read_dir(relative_file!("fixtures/json/invalid")).unwrap() {
        let path = f.unwrap().path();
        if path.is_file() {
            let bytes = fs::read(&path).unwrap();
            let parsed = parse_bytes(&bytes);
            println!("Parse result for {:?} = {:?}", &path, parsed);
            assert!(parsed.is_err());
        }
    }
}

#[test]
fn should_parse_the_blog_entries_fixture() {
    let source = source_from_relative_file!("fixtures/json/valid/blog_entries.json");
    let value = parse_str(&source).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    let second = &entries[1];
    assert_eq!(second.get("id"), Some(&JsonValue::Number(2.0)));
    assert_eq!(second.get("rating"), Some(&JsonValue::Number(-0.25)));
    assert_eq!(
        second.get("title").and_then(JsonValue::as_str),
        Some(r#"Escapes: \"quoted\", back\\slash and tab\t"#)
    );
    assert!(second.get("author").unwrap().get("handle").unwrap().is_null());
    let comments = second.get("comments").unwrap();
    assert_eq!(comments.index(1).unwrap().get("text"), Some(&JsonValue::String("")));
}

#[test]
fn should_parse_unicode_and_the_empty_key() {
    let source = source_from_relative_file!("fixtures/json/valid/unicode.json");
    let value = parse_str(&source).unwrap();
    assert_eq!(value.get("greeting").and_then(JsonValue::as_str), Some("héllo wörld"));
    assert_eq!(value.get("emoji").and_then(JsonValue::as_str), Some("🚀"));
    assert_eq!(value.get("").and_then(JsonValue::as_str), Some("empty key"));
}

#[test]
fn should_retrieve_every_property_after_growth() {
    let source = source_from_relative_file!("fixtures/json/valid/many_properties.json");
    let value = parse_str(&source).unwrap();
    let table = value.as_object().unwrap();
    assert_eq!(table.len(), 200);
    assert!(table.capacity() >= 200 * 4 / 3);
    for i in 0..200 {
        let item = table.get(&format!("key_{i:03}")).unwrap();
        assert_eq!(item.get("index").and_then(JsonValue::as_f64), Some(f64::from(i)));
        assert_eq!(item.get("even").and_then(JsonValue::as_bool), Some(i % 2 == 0));
    }
}

#[rstest]
#[case("{}", 0)]
#[case(r#"{"a": {}}"#, 1)]
#[case(r#" { "a" : 1 , "b" : [ ] } "#, 2)]
fn should_parse_objects(#[case] source: &str, #[case] len: usize) {
    let value = parse_str(source).unwrap();
    assert_eq!(value.as_object().unwrap().len(), len);
}

#[rstest]
#[case("[]", vec![])]
#[case("[1,2,3]", vec![1.0, 2.0, 3.0])]
#[case("[ -1.5 ,\n\t0 ]", vec![-1.5, 0.0])]
fn should_parse_arrays_in_order(#[case] source: &str, #[case] expected: Vec<f64>) {
    let value = parse_str(source).unwrap();
    let numbers: Vec<f64> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(JsonValue::as_f64)
        .collect();
    assert_eq!(numbers, expected);
}

#[rstest]
#[case(r#"{"a":1,}"#, Details::TrailingComma(TokenKind::CurlyClose), 7)]
#[case("[1,2,]", Details::TrailingComma(TokenKind::SquareClose), 5)]
#[case("", Details::UnexpectedToken { expected: Expected::Value, found: TokenKind::Eof }, 0)]
#[case("}", Details::UnexpectedToken { expected: Expected::Value, found: TokenKind::CurlyClose }, 0)]
#[case("{,}", Details::UnexpectedToken { expected: Expected::PropertyKey, found: TokenKind::Comma }, 1)]
#[case(r#"{"a"}"#, Details::UnexpectedToken { expected: Expected::Colon, found: TokenKind::CurlyClose }, 4)]
#[case(r#"{"a":1 "b":2}"#, Details::UnexpectedToken { expected: Expected::CommaOrCloseBrace, found: TokenKind::String }, 7)]
#[case("[1 2]", Details::UnexpectedToken { expected: Expected::CommaOrCloseBracket, found: TokenKind::Number }, 3)]
#[case("[1", Details::UnexpectedToken { expected: Expected::CommaOrCloseBracket, found: TokenKind::Eof }, 2)]
#[case(r#"{"a":"#, Details::UnexpectedToken { expected: Expected::Value, found: TokenKind::Eof }, 5)]
#[case("[1e5]", Details::UnexpectedToken { expected: Expected::CommaOrCloseBracket, found: TokenKind::Unknown }, 2)]
#[case("[truex]", Details::UnexpectedToken { expected: Expected::Value, found: TokenKind::Unknown }, 1)]
#[case("123.", Details::BrokenNumber, 0)]
#[case("[-]", Details::BrokenNumber, 1)]
#[case(r#"["abc"#, Details::UnterminatedString, 1)]
#[case(r#"{"abc"#, Details::UnterminatedString, 1)]
#[case(r#""ab\qcd""#, Details::InvalidEscapeSequence, 0)]
fn should_report_why_a_parse_failed(
    #[case] source: &str,
    #[case] details: Details,
    #[case] offset: usize,
) {
    let err = parse_str(source).unwrap_err();
    assert_eq!(err.details, details, "source: {source}");
    assert_eq!(err.coords.map(|c| c.absolute), Some(offset), "source: {source}");
}

#[test]
fn should_classify_error_stages() {
    assert_eq!(parse_str("[1,]").unwrap_err().stage, Stage::Parser);
    assert_eq!(parse_str("1.").unwrap_err().stage, Stage::Lexer);
    assert_eq!(parse_str(r#""\q""#).unwrap_err().stage, Stage::Lexer);
}

#[test]
fn should_be_deterministic_for_bad_escapes() {
    let source = r#"["ab\qcd"]"#;
    let first = parse_str(source);
    for _ in 0..10 {
        assert_eq!(parse_str(source), first);
    }
    let tolerant = ParserOptions::default().with_escape_policy(EscapePolicy::Tolerate);
    let value = Parser::with_options(source, tolerant).parse_document().unwrap();
    assert_eq!(value.index(0), Some(&JsonValue::String(r"ab\qcd")));
}

#[test]
fn should_give_structurally_equal_trees_for_equivalent_documents() {
    let compact = parse_str(r#"{"a":[1,{"b":true}],"c":null}"#).unwrap();
    let spaced = parse_str("{ \"c\" : null ,\n \"a\" : [ 1 , { \"b\" : true } ] }").unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn should_step_through_a_document_manually() {
    let mut parser = Parser::new("[true] [false]");
    parser.advance_token();
    assert_eq!(parser.current().0.kind, TokenKind::SquareOpen);
    let first = parser.parse_value().unwrap();
    assert_eq!(parser.current().0.kind, TokenKind::SquareOpen);
    let second = parser.parse_value().unwrap();
    assert_eq!(parser.current().0.kind, TokenKind::Eof);
    assert_eq!(first.index(0).and_then(JsonValue::as_bool), Some(true));
    assert_eq!(second.index(0).and_then(JsonValue::as_bool), Some(false));
}
