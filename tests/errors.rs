// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tests of rejected inputs: the diagnostic strings, byte for byte,
//! and the best-effort contract.

#![deny(unused)]

use conventional_commits::{CommitMessage, Dialect, ParseErrorKind, Parser};

#[macro_use]
mod common;

// (expectations here are whole formatted strings so that a change to the
//  column scheme cannot slip through unnoticed)
fn check(input: &[u8], expected: &str) {
    let err = CommitMessage::parse(input).unwrap_err();
    assert_eq!(err.to_string(), expected, "input: {:?}", input);
    assert!(err.col() <= input.len());
}

#[test]
fn empty_input() {
    check(b"", "empty input: col=00");
}

#[test]
fn illegal_type() {
    check(b"chore: x", "illegal 'c' character in commit message type: col=00");
    check(b"fixing: y", "illegal 'i' character in commit message type: col=03");

    let err = Parser::new().dialect(Dialect::Conventional).parse(b"zoo: hi").unwrap_err();
    assert_eq!(err.to_string(), "illegal 'z' character in commit message type: col=00");
    assert_eq!(err.kind(), &ParseErrorKind::Type('z'));
}

#[test]
fn incomplete_type() {
    check(b"f", "incomplete commit message type after 'f' character: col=01");
    check(b"fe", "incomplete commit message type after 'e' character: col=02");
    check(b"fea", "incomplete commit message type after 'a' character: col=03");
}

#[test]
fn early_exit() {
    check(b"fix", "early exit after 'x' character: col=03");
    check(b"feat", "early exit after 't' character: col=04");
    check(b"fix(api)", "early exit after ')' character: col=08");
    check(b"fix!", "early exit after '!' character: col=04");

    let err = Parser::new().dialect(Dialect::FreeForm).parse(b"mytype").unwrap_err();
    assert_eq!(err.to_string(), "early exit after 'e' character: col=06");
}

#[test]
fn missing_colon() {
    check(b"fix!?: x", "expecting colon (':') character, got '?' character: col=04");
    check(b"fix(a)b: x", "expecting colon (':') character, got 'b' character: col=06");
}

#[test]
fn illegal_scope() {
    check(b"fix(): x", "illegal ')' character in scope: col=04");
    check(b"fix(a(b): x", "illegal '(' character in scope: col=05");
    check(b"fix(a\nb): x", "illegal '\n' character in scope: col=05");
}

#[test]
fn incomplete_scope() {
    check(
        b"fix(scope",
        "expecting closing parentheses (')') character, got early exit after 'e' character: col=09",
    );
}

#[test]
fn description_must_begin_with_a_space() {
    check(b"feat:x", "expecting at least one white-space (' ') character, got 'x' character: col=05");
    check(b"feat:\nx", "expecting at least one white-space (' ') character, got '\n' character: col=05");
}

#[test]
fn description_missing_at_end_of_input() {
    check(b"fix:", "expecting a description text (without newlines) after ':' character: col=04");
    check(b"feat: ", "expecting a description text (without newlines) after ' ' character: col=06");
    check(b"fix:   ", "expecting a description text (without newlines) after ' ' character: col=07");
}

#[test]
fn newline_where_description_expected() {
    check(b"feat: \n", "illegal newline: col=07");
    check(b"feat:  \nrest", "illegal newline: col=08");
}

#[test]
fn missing_blank_line() {
    check(b"fix: x\nbody", "missing a blank line: col=07");
}

#[test]
fn malformed_trailer_after_a_committed_footer() {
    // no rewind to body once a footer exists
    check(b"fix: x\n\nRefs: 1\nRefs %2", "illegal '%' character in trailer: col=21");
    check(b"fix: x\n\nRefs: 1\nRefs", "incomplete footer trailer after 's' character: col=20");
    check(b"fix: x\n\nRefs: 1\nAcked-by: ", "incomplete footer trailer after ' ' character: col=26");
}

#[test]
fn best_effort_needs_the_minimal_prefix() {
    let parser = Parser::new().dialect(Dialect::Conventional).best_effort(true);
    let err = parser.parse(b"zoo: hi").unwrap_err();
    assert_matches!(None, err.partial());
}

#[test]
fn best_effort_returns_the_partial_message() {
    let parser = Parser::new().best_effort(true);

    let err = parser.parse(b"fix: delouse\nmissing blank").unwrap_err();
    assert_eq!(err.to_string(), "missing a blank line: col=13");
    let partial = err.into_partial().unwrap();
    assert_eq!(partial.kind, "fix");
    assert_eq!(partial.description, "delouse");
    assert!(partial.minimal());

    // everything recognized before the failure is in there
    let err = parser.parse(b"fix: x\n\nRefs: 1\nRefs").unwrap_err();
    let partial = err.into_partial().unwrap();
    assert_eq!(partial.footers["refs"], vec!["1".to_string()]);
}

#[test]
fn partial_messages_require_opting_in() {
    let err = Parser::new().parse(b"fix: delouse\nmissing blank").unwrap_err();
    assert_matches!(None, err.partial());
    assert_matches!(None, err.into_partial());
}
