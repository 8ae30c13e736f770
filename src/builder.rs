// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CommitMessage construction through the builder pattern.

use crate::{CommitMessage, Footers, RawCommitMessage, ValidationError};

/// Allows construction of [`CommitMessage`]/[`RawCommitMessage`] via the
/// builder pattern.
///
/// # Overview
///
/// Builder is the most straightforward way to construct a
/// [`CommitMessage`] or [`RawCommitMessage`] object from data in memory.
///
/// ```rust
/// use conventional_commits::Builder;
///
/// let msg = Builder::new()
///     .kind("feat")
///     .scope("api")
///     .exclamation(true)
///     .description("add an endpoint")
///     .body("Explanation goes here.")
///     .footer("reviewed-by", "Alice")
///     .build().unwrap(); // or .build_raw();
/// ```
///
/// # Panics
///
/// ## Contract violations
///
/// Generally speaking, invalid data provided to the Builder will at worst
/// produce a [`ValidationError`], and even then, it will only do so when
/// building a [`CommitMessage`]. (building a [`RawCommitMessage`] performs
/// no validation)
///
/// However, egregious misuse of the Builder API may make it impossible to
/// construct even a [`RawCommitMessage`]. In this case, the build methods
/// will panic. In particular: **[`kind`] and [`description`] must be set.**
///
/// ## Poisoning
///
/// Calling [`build_raw`] or [`build`] "consumes" the `Builder` in a manner
/// which causes **all future method calls** to panic at runtime.
/// If you wish to reuse a `Builder`, you must clone it before calling
/// one of these methods.
///
/// [`ValidationError`]: ../enum.ValidationError.html
/// [`CommitMessage`]: ../struct.CommitMessage.html
/// [`RawCommitMessage`]: ../struct.RawCommitMessage.html
/// [`kind`]: #method.kind
/// [`description`]: #method.description
/// [`build_raw`]: #method.build_raw
/// [`build`]: #method.build
#[derive(Debug, Clone)]
pub struct Builder(Option<Data>);

#[derive(Debug, Clone)]
struct Data {
    kind: Kind,
    scope: Option<String>,
    exclamation: bool,
    description: Description,
    body: String,
    footers: Footers,
}

// NOTE: Custom enums are used to let `None` variants have names more
//       evocative of their meaning:
//
// * A variant called `Missing` should cause a panic.

#[derive(Debug, Clone)]
enum Kind {
    Missing,
    This(String),
}

#[derive(Debug, Clone)]
enum Description {
    Missing,
    This(String),
}

impl Default for Builder {
    fn default() -> Builder
    { Builder(Some(Data {
        kind: Kind::Missing,
        scope: None,
        exclamation: false,
        description: Description::Missing,
        body: String::new(),
        footers: Footers::new(),
    }))}
}

const ALREADY_CONSUMED_MSG: &'static str = "\
    Attempted to use a Builder that has already been consumed! \
    You should clone it before calling the build method.";

impl Builder {
    // panics on poison
    fn as_mut(&mut self) -> &mut Data
    { self.0.as_mut().expect(ALREADY_CONSUMED_MSG) }

    // consume the builder, leaving behind a poison value
    fn take(&mut self) -> Data
    { self.0.take().expect(ALREADY_CONSUMED_MSG) }
}

/// # Initialization
impl Builder {
    /// Alias for [`Default`]`::default`.
    ///
    /// [`Default`]: https://doc.rust-lang.org/std/default/trait.Default.html
    pub fn new() -> Builder
    { Default::default() }
}

/// # Setting the header
impl Builder {
    /// Set the commit type.
    ///
    /// **This field is required.** The [`build_raw`] and [`build`] methods
    /// will panic unless this method has been called.
    ///
    /// [`build_raw`]: #method.build_raw
    /// [`build`]: #method.build
    pub fn kind<S: Into<String>>(&mut self, s: S) -> &mut Self
    { self.as_mut().kind = Kind::This(s.into()); self }

    /// Set the scope. There is no way to unset it; clone the builder
    /// before setting one if you need both forms.
    pub fn scope<S: Into<String>>(&mut self, s: S) -> &mut Self
    { self.as_mut().scope = Some(s.into()); self }

    /// Set the breaking-change `!` marker. Defaults to `false`.
    pub fn exclamation(&mut self, b: bool) -> &mut Self
    { self.as_mut().exclamation = b; self }

    /// Set the description.
    ///
    /// **This field is required.** The [`build_raw`] and [`build`] methods
    /// will panic unless this method has been called.
    ///
    /// [`build_raw`]: #method.build_raw
    /// [`build`]: #method.build
    pub fn description<S: Into<String>>(&mut self, s: S) -> &mut Self
    { self.as_mut().description = Description::This(s.into()); self }
}

/// # Setting the free-form parts
impl Builder {
    /// Set the body. Defaults to the empty string, meaning no body.
    pub fn body<S: Into<String>>(&mut self, s: S) -> &mut Self
    { self.as_mut().body = s.into(); self }

    /// Append one footer value.
    ///
    /// Repeated calls with the same key accumulate values in call order.
    /// The key is recorded verbatim; [`build`] will reject keys that are
    /// not lowercase alnum-dash tokens.
    ///
    /// [`build`]: #method.build
    pub fn footer<K, V>(&mut self, key: K, value: V) -> &mut Self
    where K: Into<String>, V: Into<String>,
    {
        self.as_mut().footers
            .entry(key.into())
            .or_insert_with(Vec::new)
            .push(value.into());
        self
    }
}

/// # Building
impl Builder {
    /// Build a [`RawCommitMessage`].
    ///
    /// No validation is performed beyond the required-field panics
    /// documented on the type.
    ///
    /// [`RawCommitMessage`]: ../struct.RawCommitMessage.html
    pub fn build_raw(&mut self) -> RawCommitMessage {
        let Data { kind, scope, exclamation, description, body, footers } = self.take();

        let kind = match kind {
            Kind::This(s) => s,
            Kind::Missing => panic!("Attempted to build a commit message with no type!"),
        };
        let description = match description {
            Description::This(s) => s,
            Description::Missing => panic!("Attempted to build a commit message with no description!"),
        };

        RawCommitMessage { kind, scope, exclamation, description, body, footers }
    }

    /// Build a [`CommitMessage`], checking all of its invariants.
    ///
    /// [`CommitMessage`]: ../struct.CommitMessage.html
    pub fn build(&mut self) -> Result<CommitMessage, ValidationError>
    { self.build_raw().validate() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footers_accumulate_in_call_order() {
        let raw = Builder::new()
            .kind("fix")
            .description("x")
            .footer("refs", "1")
            .footer("reviewed-by", "Alice")
            .footer("refs", "2")
            .build_raw();

        let keys: Vec<_> = raw.footers.keys().cloned().collect();
        assert_eq!(keys, vec!["refs".to_string(), "reviewed-by".to_string()]);
        assert_eq!(raw.footers["refs"], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    #[should_panic(expected = "no type")]
    fn missing_kind_panics() {
        let _ = Builder::new().description("x").build_raw();
    }

    #[test]
    #[should_panic(expected = "already been consumed")]
    fn poisoned_builder_panics() {
        let mut b = Builder::new();
        b.kind("fix").description("x");
        let _ = b.build_raw();
        let _ = b.build_raw();
    }
}
