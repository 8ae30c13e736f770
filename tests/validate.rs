// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Tests of `RawCommitMessage::validate`, which is one of the two
// major ways to construct a `CommitMessage`.
#![deny(unused)]

use conventional_commits::{Footers, RawCommitMessage, ValidationError};

#[macro_use]
mod common;

fn boring_message() -> RawCommitMessage {
    RawCommitMessage {
        kind: "fix".into(),
        scope: None,
        exclamation: false,
        description: "a perfectly fine description".into(),
        body: String::new(),
        footers: Footers::new(),
    }
}

#[test]
fn boring_is_fine() {
    assert_matches!(Ok(_), boring_message().validate());
}

#[test]
fn empty_type() {
    let mut msg = boring_message();
    msg.kind = String::new();
    assert_matches!(
        Err(ValidationError::EmptyType),
        msg.validate(),
    );
}

#[test]
fn empty_description() {
    let mut msg = boring_message();
    msg.description = String::new();
    assert_matches!(
        Err(ValidationError::EmptyDescription),
        msg.validate(),
    );
}

#[test]
fn newline_in_description() {
    let mut msg = boring_message();
    msg.description = "lol\nrite".into();
    assert_matches!(
        Err(ValidationError::NewlineInDescription),
        msg.clone().validate(),
    );

    // carriage returns, on the other hand, are nobody's business
    msg.description = "lol\rrite".into();
    assert_matches!(Ok(_), msg.validate());
}

#[test]
fn bad_scopes() {
    let mut msg = boring_message();

    msg.scope = Some(String::new());
    assert_matches!(
        Err(ValidationError::EmptyScope),
        msg.clone().validate(),
    );

    msg.scope = Some("api(v2".into());
    assert_matches!(
        Err(ValidationError::ParenInScope),
        msg.clone().validate(),
    );

    msg.scope = Some("api)v2".into());
    assert_matches!(
        Err(ValidationError::ParenInScope),
        msg.validate(),
    );
}

#[test]
fn bad_footer_keys() {
    for key in &["Refs", "breaking change", "", "sp aced"] {
        let mut msg = boring_message();
        msg.footers.insert(key.to_string(), vec!["1".into()]);
        assert_matches!(
            Err(ValidationError::BadFooterKey(_)),
            msg.validate(),
        );
    }

    // the canonicalized breaking-change key is an ordinary token
    let mut msg = boring_message();
    msg.footers.insert("breaking-change".into(), vec!["drops v1".into()]);
    assert_matches!(Ok(_), msg.validate());
}

#[test]
fn empty_footer_values() {
    let mut msg = boring_message();
    msg.footers.insert("refs".into(), vec!["1".into(), String::new()]);
    assert_matches!(
        Err(ValidationError::EmptyFooterValue(_)),
        msg.validate(),
    );
}

#[test]
fn minimal_predicate() {
    let mut msg = boring_message();
    assert!(msg.minimal());

    msg.kind = String::new();
    assert!(!msg.minimal());

    msg.kind = "fix".into();
    msg.description = String::new();
    assert!(!msg.minimal());
}
