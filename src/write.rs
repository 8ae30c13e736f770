// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use crate::{CommitMessage, RawCommitMessage};

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    { display(f, self) }
}

fn display(w: &mut fmt::Formatter, msg: &CommitMessage) -> fmt::Result {
    let &CommitMessage(RawCommitMessage {
        ref kind, ref scope, exclamation,
        ref description, ref body, ref footers,
    }) = msg;

    assert!(!kind.is_empty(), "BUG");
    assert!(!description.contains("\n"), "BUG");

    write!(w, "{}", kind)?;
    if let Some(scope) = scope.as_ref() {
        write!(w, "({})", scope)?;
    }
    if exclamation {
        write!(w, "!")?;
    }
    write!(w, ": {}", description)?;

    if !body.is_empty() {
        write!(w, "\n\n{}", body)?;
    }

    if !footers.is_empty() {
        write!(w, "\n\n")?;
        let lines = footers.iter().flat_map(|(key, values)| {
            values.iter().map(move |value| format!("{}: {}", key, value))
        });
        write_sep(&mut *w, "\n", lines)?;
    }

    Ok(())
}

fn write_sep<W, Xs>(mut w: W, sep: &str, xs: Xs) -> fmt::Result
where
    W: fmt::Write,
    Xs: IntoIterator,
    Xs::Item: fmt::Display,
{
    let mut xs = xs.into_iter();
    if let Some(x) = xs.next() {
        write!(&mut w, "{}", x)?;
    }
    for x in xs {
        write!(&mut w, "{}{}", sep, x)?;
    }
    Ok(())
}
