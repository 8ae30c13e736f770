// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{CommitMessage, Dialect, Footers, RawCommitMessage};

use tracing::{debug, error, info};

pub use self::error::{ParseError, ParseErrorKind};
mod error {
    use super::*;
    use failure::Fail;
    use std::fmt;

    /// The first syntactic violation found in a commit message.
    #[derive(Debug, Fail)]
    pub struct ParseError {
        pub(crate) kind: ParseErrorKind,
        // (NOTE: this is the byte position exactly as the recognizer
        //        supplied it; the Display impl zero-pads it to two digits
        //        by convention)
        pub(crate) col: usize,
        pub(crate) partial: Option<RawCommitMessage>,
    }

    impl fmt::Display for ParseError {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}: col={:02}", self.kind, self.col)
        }
    }

    impl ParseError {
        pub(crate) fn new(kind: ParseErrorKind, col: usize) -> ParseError
        { ParseError { kind, col, partial: None } }

        /// What went wrong.
        pub fn kind(&self) -> &ParseErrorKind { &self.kind }

        /// Byte position of the offense. For errors raised at the end of
        /// input this is one past the last consumed byte.
        pub fn col(&self) -> usize { self.col }

        /// The partially recognized message, when parsing ran under
        /// best-effort mode and at least the type and description were
        /// recognized before the failure.
        pub fn partial(&self) -> Option<&RawCommitMessage> { self.partial.as_ref() }

        /// Consuming form of `partial`.
        pub fn into_partial(self) -> Option<RawCommitMessage> { self.partial }
    }

    /// The ways a commit message can go wrong, sans position.
    #[derive(Debug, Clone, PartialEq, Fail)]
    pub enum ParseErrorKind {
        #[fail(display = "empty input")]
        Empty,
        #[fail(display = "illegal '{}' character in commit message type", _0)]
        Type(char),
        #[fail(display = "incomplete commit message type after '{}' character", _0)]
        TypeIncomplete(char),
        #[fail(display = "expecting colon (':') character, got '{}' character", _0)]
        Colon(char),
        #[fail(display = "illegal '{}' character in scope", _0)]
        Scope(char),
        #[fail(display = "expecting closing parentheses (')') character, got early exit after '{}' character", _0)]
        ScopeIncomplete(char),
        #[fail(display = "early exit after '{}' character", _0)]
        Early(char),
        #[fail(display = "expecting at least one white-space (' ') character, got '{}' character", _0)]
        DescriptionInit(char),
        #[fail(display = "expecting a description text (without newlines) after '{}' character", _0)]
        Description(char),
        #[fail(display = "illegal newline")]
        Newline,
        #[fail(display = "missing a blank line")]
        MissingBlankLine,
        #[fail(display = "illegal '{}' character in trailer", _0)]
        Trailer(char),
        #[fail(display = "incomplete footer trailer after '{}' character", _0)]
        TrailerIncomplete(char),
    }
}

const TYPES_MINIMAL: &[&str] = &["fix", "feat"];
const TYPES_CONVENTIONAL: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix",
    "perf", "refactor", "revert", "style", "test",
];

// 7-bit ASCII lexical classes; bytes above 0x7e never match.
fn is_printable(b: u8) -> bool { b >= 0x20 && b <= 0x7e }
fn is_alnum(b: u8) -> bool { b.is_ascii_alphanumeric() }

// Case-insensitive incremental probes against a keyword table.
fn kw_continues(keywords: &[&str], matched: &[u8], b: u8) -> bool {
    keywords.iter().any(|kw| {
        let kw = kw.as_bytes();
        kw.len() > matched.len()
            && kw[..matched.len()].eq_ignore_ascii_case(matched)
            && kw[matched.len()].eq_ignore_ascii_case(&b)
    })
}

fn kw_complete(keywords: &[&str], matched: &[u8]) -> bool {
    keywords.iter().any(|kw| kw.as_bytes().eq_ignore_ascii_case(matched))
}

/// Parses Conventional Commits messages.
///
/// A `Parser` is configured once through its chainable setters and may be
/// reused for any number of [`parse`] calls; every call starts from a
/// clean slate.
///
/// ```rust
/// use conventional_commits::{Parser, Dialect};
///
/// let parser = Parser::new().dialect(Dialect::Conventional);
/// let msg = parser.parse(b"docs(readme): fix badge").unwrap();
/// assert_eq!(msg.raw().kind, "docs");
/// assert_eq!(msg.raw().scope.as_deref(), Some("readme"));
/// ```
///
/// [`parse`]: #method.parse
#[derive(Debug, Clone, Default)]
pub struct Parser {
    dialect: Dialect,
    best_effort: bool,
}

impl Parser {
    /// A parser with the default options: minimal dialect, no best-effort.
    pub fn new() -> Parser { Parser::default() }

    /// Choose the vocabulary commit types are matched against.
    pub fn dialect(mut self, dialect: Dialect) -> Parser
    { self.dialect = dialect; self }

    /// When enabled, a failed parse that still recognized the minimum
    /// viable prefix (type and description) hands the partial message
    /// back through [`ParseError::partial`].
    ///
    /// [`ParseError::partial`]: struct.ParseError.html#method.partial
    pub fn best_effort(mut self, enabled: bool) -> Parser
    { self.best_effort = enabled; self }

    /// Parses one commit message from a fully materialized buffer.
    ///
    /// Only `\n` (0x0a) is a newline; `\r` is an ordinary byte and no
    /// CRLF translation is performed. Bytes outside ASCII are carried
    /// into the output through lossy UTF-8 conversion.
    ///
    /// At most one diagnostic is produced per call: the first fatal one,
    /// carrying the byte position at which it was detected.
    pub fn parse(&self, input: &[u8]) -> Result<CommitMessage, ParseError> {
        debug!(bytes = input.len(), dialect = ?self.dialect, "parsing commit message");

        let mut machine = Machine::new(input, self.dialect);
        match machine.run() {
            Ok(()) => Ok({
                machine.msg.validate()
                    .expect("an invariant was not checked during parsing (this is a bug!)")
            }),
            Err(mut err) => {
                error!(col = err.col(), %err, "parse failed");
                if self.best_effort && machine.msg.minimal() {
                    info!("best effort: returning partial message");
                    err.partial = Some(machine.msg);
                }
                Err(err)
            }
        }
    }
}

impl CommitMessage {
    /// Parses a commit message with the default [`Parser`] options.
    ///
    /// [`Parser`]: struct.Parser.html
    pub fn parse(input: &[u8]) -> Result<CommitMessage, ParseError>
    { Parser::new().parse(input) }
}

// Why a speculative trailer recognition stopped, before deciding whether
// it rewinds to body text or hardens into a trailer diagnostic.
enum TrailerFail {
    /// Offending byte at this position.
    At(usize),
    /// The input ended mid-trailer.
    Eof,
}

// The two live states of the cyclic part of the machine.
enum Tail { Trailers, Body }

// The recognizer proper. One per parse call, so every field starts reset.
struct Machine<'a> {
    data: &'a [u8],
    /// Cursor of the byte under consideration.
    p: usize,
    /// One past the last byte. The input is fully materialized, so this
    /// doubles as eof.
    pe: usize,
    /// Mark for the start of the current lexeme.
    pb: usize,
    /// Newlines consumed since the last body emission. They are restored
    /// in front of the next fragment, so a failed trailer attempt loses
    /// nothing.
    count_newlines: usize,
    /// Position of the most recent newline, for the rewind.
    last_newline: usize,
    /// Lowercased, canonicalized key of the trailer whose value is being
    /// collected.
    current_footer_key: String,
    dialect: Dialect,
    msg: RawCommitMessage,
}

impl<'a> Machine<'a> {
    fn new(data: &'a [u8], dialect: Dialect) -> Machine<'a> {
        Machine {
            data,
            p: 0,
            pe: data.len(),
            pb: 0,
            count_newlines: 0,
            last_newline: 0,
            current_footer_key: String::new(),
            dialect,
            msg: RawCommitMessage {
                kind: String::new(),
                scope: None,
                exclamation: false,
                description: String::new(),
                body: String::new(),
                footers: Footers::new(),
            },
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        if self.data.is_empty() {
            return Err(ParseError::new(ParseErrorKind::Empty, 0));
        }

        match self.dialect {
            Dialect::Minimal => self.keyword_type(TYPES_MINIMAL)?,
            Dialect::Conventional => self.keyword_type(TYPES_CONVENTIONAL)?,
            Dialect::FreeForm => self.free_form_type()?,
        }
        self.header_rest()?;
        self.description()?;

        // the header alone is a complete message
        if self.p == self.pe { return Ok(()); }
        self.p += 1; // the description's newline
        if self.p == self.pe { return Ok(()); }

        // a blank line stands between the header and everything else
        if self.data[self.p] != b'\n' {
            return Err(self.fail(ParseErrorKind::MissingBlankLine));
        }
        self.p += 1;
        if self.p == self.pe { return Ok(()); }

        self.tail()
    }

    // ---------------------------------------------------------------
    // header

    fn keyword_type(&mut self, keywords: &[&str]) -> Result<(), ParseError> {
        let start = self.p;
        loop {
            if self.p == self.pe {
                let matched = &self.data[start..self.p];
                return Err(if kw_complete(keywords, matched) {
                    self.fail(ParseErrorKind::Early(self.prev_char()))
                } else {
                    self.fail(ParseErrorKind::TypeIncomplete(self.prev_char()))
                });
            }
            let b = self.data[self.p];
            if kw_continues(keywords, &self.data[start..self.p], b) {
                self.p += 1;
                continue;
            }
            match b {
                b'(' | b'!' | b':' if kw_complete(keywords, &self.data[start..self.p]) => {
                    self.msg.kind = self.lossy(start, self.p);
                    return Ok(());
                }
                _ => return Err(self.fail(ParseErrorKind::Type(b as char))),
            }
        }
    }

    fn free_form_type(&mut self) -> Result<(), ParseError> {
        let start = self.p;
        loop {
            if self.p == self.pe {
                return Err(self.fail(ParseErrorKind::Early(self.prev_char())));
            }
            match self.data[self.p] {
                b'(' | b'!' | b':' => {
                    if self.p == start {
                        return Err(self.fail(ParseErrorKind::Type(self.data[self.p] as char)));
                    }
                    self.msg.kind = self.lossy(start, self.p);
                    return Ok(());
                }
                b if is_printable(b) => self.p += 1,
                b => return Err(self.fail(ParseErrorKind::Type(b as char))),
            }
        }
    }

    // `( SCOPE )`? `!`? `:`, with the cursor left just past the colon.
    fn header_rest(&mut self) -> Result<(), ParseError> {
        if self.data[self.p] == b'(' {
            self.p += 1;
            let start = self.p;
            loop {
                if self.p == self.pe {
                    return Err(self.fail(ParseErrorKind::ScopeIncomplete(self.prev_char())));
                }
                match self.data[self.p] {
                    b')' if self.p > start => break,
                    b if is_printable(b) && b != b'(' && b != b')' => self.p += 1,
                    b => return Err(self.fail(ParseErrorKind::Scope(b as char))),
                }
            }
            self.msg.scope = Some(self.lossy(start, self.p));
            self.p += 1; // ')'
            if self.p == self.pe {
                return Err(self.fail(ParseErrorKind::Early(self.prev_char())));
            }
        }

        if self.data[self.p] == b'!' {
            self.msg.exclamation = true;
            self.p += 1;
            if self.p == self.pe {
                return Err(self.fail(ParseErrorKind::Early(self.prev_char())));
            }
        }

        match self.data[self.p] {
            b':' => { self.p += 1; Ok(()) }
            b => Err(self.fail(ParseErrorKind::Colon(b as char))),
        }
    }

    fn description(&mut self) -> Result<(), ParseError> {
        // exactly one mandatory space after the colon...
        match self.peek() {
            None => return Err(self.fail(ParseErrorKind::Description(self.prev_char()))),
            Some(b' ') => self.p += 1,
            Some(b) => return Err(self.fail(ParseErrorKind::DescriptionInit(b as char))),
        }
        // ...further ones are permitted, and dropped
        while self.p < self.pe && self.data[self.p] == b' ' {
            self.p += 1;
        }
        match self.peek() {
            None => return Err(self.fail(ParseErrorKind::Description(self.prev_char()))),
            Some(b'\n') => {
                // the diagnostic points at the byte after the newline
                self.p += 1;
                return Err(self.fail(ParseErrorKind::Newline));
            }
            Some(_) => {}
        }

        self.pb = self.p;
        while self.p < self.pe && self.data[self.p] != b'\n' {
            self.p += 1;
        }
        self.msg.description = self.lossy(self.pb, self.p);
        Ok(())
    }

    // ---------------------------------------------------------------
    // body and footers

    // Alternates between speculative trailer recognition and the body
    // accumulator. A failed attempt rewinds into body text while no
    // footer has been committed; afterwards it is a hard error.
    fn tail(&mut self) -> Result<(), ParseError> {
        let mut state = Tail::Trailers;
        loop {
            match state {
                Tail::Trailers => {
                    // newlines here separate trailers, or body paragraphs
                    // if the attempt below fails; count them for the rewind
                    while self.p < self.pe && self.data[self.p] == b'\n' {
                        self.count_newlines += 1;
                        self.last_newline = self.p;
                        self.p += 1;
                    }
                    if self.p == self.pe {
                        return Ok(());
                    }
                    self.pb = self.p;
                    match self.trailer() {
                        Ok(()) => {}
                        Err(fail) => {
                            if !self.msg.footers.is_empty() {
                                return Err(self.trailer_error(fail));
                            }
                            // Rewind: the speculatively consumed bytes are
                            // body text after all. Newlines already counted
                            // must not be re-read.
                            self.p = self.pb;
                            if self.count_newlines > 0 {
                                self.pb = self.last_newline + 1;
                            }
                            state = Tail::Body;
                        }
                    }
                }
                Tail::Body => {
                    loop {
                        if self.p == self.pe {
                            if self.pb < self.p {
                                self.emit_body(self.pb, self.p);
                            }
                            return Ok(());
                        }
                        if self.data[self.p] == b'\n' {
                            // a lone newline: line break within a paragraph
                            if self.pb < self.p {
                                self.emit_body(self.pb, self.p);
                            }
                            self.count_newlines += 1;
                            self.last_newline = self.p;
                            self.p += 1;
                            self.pb = self.p;
                            continue;
                        }
                        // blank-line lookahead: a paragraph break hands
                        // control back to the trailer machine
                        if self.p + 2 < self.pe
                            && self.data[self.p + 1] == b'\n'
                            && self.data[self.p + 2] == b'\n'
                        {
                            self.emit_body(self.pb, self.p + 1);
                            self.p += 1;
                            state = Tail::Trailers;
                            break;
                        }
                        self.p += 1;
                    }
                }
            }
        }
    }

    // One trailer: `TOKEN ': ' VALUE`, `TOKEN ' #' VALUE`, or the literal
    // `BREAKING CHANGE ': ' VALUE`. The cursor is left on the value's
    // terminating newline (or at eof).
    fn trailer(&mut self) -> Result<(), TrailerFail> {
        let token_start = self.p;
        self.alnum_run()?;
        while self.p < self.pe && self.data[self.p] == b'-' {
            self.p += 1;
            self.alnum_run()?;
        }
        let mut token_end = self.p;

        match self.peek() {
            None => return Err(TrailerFail::Eof),
            Some(b':') => self.colon_sep()?,
            Some(b' ') => {
                let breaking = &self.data[token_start..token_end] == b"BREAKING";
                match self.byte_at(self.p + 1) {
                    None => return Err(TrailerFail::Eof),
                    Some(b'#') => self.p += 2,
                    // a space may extend exactly one token: the
                    // case-sensitive `BREAKING CHANGE` literal
                    Some(_) if breaking => {
                        self.p += 1;
                        self.literal(b"CHANGE")?;
                        token_end = self.p;
                        self.colon_sep()?;
                    }
                    Some(_) => return Err(TrailerFail::At(self.p + 1)),
                }
            }
            Some(_) => return Err(TrailerFail::At(self.p)),
        }

        self.current_footer_key = {
            let token = &self.data[token_start..token_end];
            let key: String = token.iter().map(|&b| b.to_ascii_lowercase() as char).collect();
            match key.as_str() {
                "breaking change" => "breaking-change".to_string(),
                _ => key,
            }
        };

        let value_start = self.p;
        while self.p < self.pe && is_printable(self.data[self.p]) {
            self.p += 1;
        }
        if self.p == value_start {
            return Err(match self.peek() {
                None => TrailerFail::Eof,
                Some(_) => TrailerFail::At(self.p),
            });
        }
        if let Some(b) = self.peek() {
            if b != b'\n' {
                return Err(TrailerFail::At(self.p));
            }
        }

        let value = self.lossy(value_start, self.p);
        let key = std::mem::replace(&mut self.current_footer_key, String::new());
        self.msg.footers.entry(key).or_insert_with(Vec::new).push(value);
        Ok(())
    }

    fn alnum_run(&mut self) -> Result<(), TrailerFail> {
        match self.peek() {
            None => return Err(TrailerFail::Eof),
            Some(b) if !is_alnum(b) => return Err(TrailerFail::At(self.p)),
            Some(_) => {}
        }
        while self.p < self.pe && is_alnum(self.data[self.p]) {
            self.p += 1;
        }
        Ok(())
    }

    // `:` followed by one or more separator spaces.
    fn colon_sep(&mut self) -> Result<(), TrailerFail> {
        match self.peek() {
            None => return Err(TrailerFail::Eof),
            Some(b':') => self.p += 1,
            Some(_) => return Err(TrailerFail::At(self.p)),
        }
        match self.peek() {
            None => return Err(TrailerFail::Eof),
            Some(b' ') => {
                while self.p < self.pe && self.data[self.p] == b' ' {
                    self.p += 1;
                }
            }
            Some(_) => return Err(TrailerFail::At(self.p)),
        }
        Ok(())
    }

    fn literal(&mut self, lit: &[u8]) -> Result<(), TrailerFail> {
        for &want in lit {
            match self.peek() {
                None => return Err(TrailerFail::Eof),
                Some(b) if b != want => return Err(TrailerFail::At(self.p)),
                Some(_) => self.p += 1,
            }
        }
        Ok(())
    }

    // Emits data[start..end] as body text, restoring the newlines
    // consumed since the previous emission.
    fn emit_body(&mut self, start: usize, end: usize) {
        for _ in 0..self.count_newlines {
            self.msg.body.push('\n');
        }
        self.count_newlines = 0;
        let fragment = self.lossy(start, end);
        self.msg.body.push_str(&fragment);
    }

    fn trailer_error(&self, fail: TrailerFail) -> ParseError {
        match fail {
            TrailerFail::At(col) => {
                ParseError::new(ParseErrorKind::Trailer(self.data[col] as char), col)
            }
            TrailerFail::Eof => ParseError::new(
                ParseErrorKind::TrailerIncomplete(self.data[self.pe - 1] as char),
                self.pe,
            ),
        }
    }

    // ---------------------------------------------------------------
    // little helpers

    fn fail(&self, kind: ParseErrorKind) -> ParseError
    { ParseError::new(kind, self.p) }

    fn peek(&self) -> Option<u8> { self.byte_at(self.p) }

    fn byte_at(&self, i: usize) -> Option<u8>
    { if i < self.pe { Some(self.data[i]) } else { None } }

    // The last consumed byte, for diagnostics raised at the end of input.
    fn prev_char(&self) -> char { self.data[self.p - 1] as char }

    fn lossy(&self, start: usize, end: usize) -> String
    { String::from_utf8_lossy(&self.data[start..end]).into_owned() }
}
