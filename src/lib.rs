// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc(html_root_url = "https://docs.rs/conventional-commits/0.1.0")]

//! Library for parsing and writing [Conventional Commits] messages.
//!
//! See the [`Parser`] and [`CommitMessage`] types for more details.
//!
//! ```rust
//! use conventional_commits::{Parser, Dialect};
//!
//! const EXAMPLE: &'static [u8] = b"\
//! feat(api)!: add an endpoint
//!
//! Explanation goes here.
//!
//! Reviewed-by: Alice
//! Refs #42
//! ";
//!
//! let msg = Parser::new()
//!     .dialect(Dialect::Conventional)
//!     .parse(EXAMPLE)
//!     .unwrap();
//!
//! // get a RawCommitMessage object with public fields you can freely
//! // match on and manipulate
//! let mut msg = msg.into_raw();
//! assert_eq!(msg.kind, "feat");
//! assert_eq!(msg.scope.as_deref(), Some("api"));
//! assert!(msg.exclamation);
//! assert_eq!(msg.description, "add an endpoint");
//! assert_eq!(msg.body, "Explanation goes here.");
//! assert_eq!(msg.footers["reviewed-by"], vec!["Alice".to_string()]);
//! assert_eq!(msg.footers["refs"], vec!["42".to_string()]);
//!
//! msg.description = "add the /things endpoint".into();
//!
//! // turn the RawCommitMessage back into a CommitMessage
//! let msg = msg.validate().unwrap();
//!
//! // CommitMessage implements Display
//! assert_eq!(
//!     format!("{}", msg),
//!     "\
//! feat(api)!: add the /things endpoint
//!
//! Explanation goes here.
//!
//! reviewed-by: Alice
//! refs: 42",
//! );
//! ```
//!
//! [Conventional Commits]: https://www.conventionalcommits.org/en/v1.0.0/
//! [`Parser`]: struct.Parser.html
//! [`CommitMessage`]: struct.CommitMessage.html

pub extern crate failure;

#[macro_use]
mod util;
mod parse;
mod types;
mod write;
pub mod builder;

pub use crate::types::{CommitMessage, Dialect, Footers, RawCommitMessage};
pub use crate::types::ValidationError;
pub use crate::parse::{ParseError, ParseErrorKind, Parser};
pub use crate::builder::Builder;
