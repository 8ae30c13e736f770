// Copyright 2018 Michael Lamparski
// Part of the conventional-commits crate.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// general bail! and ensure! macros that don't constrain the type to failure::Error
macro_rules! g_bail { ($e:expr $(,)*) => { return Err($e.into()); }; }
macro_rules! g_ensure { ($cond:expr, $e:expr $(,)*) => { if !$cond { g_bail!($e); } }; }
