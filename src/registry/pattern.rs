//! Pattern dialect rewriting.
//!
//! Courier definitions are written in a PCRE-flavoured dialect. Before
//! compiling with the `regex` crate two mechanical rewrites are applied:
//!
//! 1. `(?<Name>` becomes `(?P<Name>`. The `regex` crate accepts both
//!    spellings, so this is a pass-through kept for definitions written
//!    against engines that only know the `P` form. Lookbehind openers
//!    `(?<=` and `(?<!` are left alone.
//! 2. `^(?!` becomes `^(`. Negative look-ahead is unsupported; removing it
//!    inverts the pattern, and prepend rules compensate by acting when the
//!    rewritten pattern does *not* match. `^(?!9[1-5]).+` ("prepend unless the
//!    serial starts with 91-95") therefore becomes `^(9[1-5]).+` with
//!    unchanged meaning.

use std::borrow::Cow;

use regex::Regex;

use crate::core::definition::PatternSource;

const NAMED_GROUP: &str = "(?<";
const NEGATIVE_LOOKAHEAD_AT_START: &str = "^(?!";

/// Apply both dialect rewrites
#[must_use]
pub fn rewrite(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains(NAMED_GROUP) && !pattern.contains(NEGATIVE_LOOKAHEAD_AT_START) {
        return Cow::Borrowed(pattern);
    }

    let named = rewrite_named_groups(pattern);
    Cow::Owned(named.replace(NEGATIVE_LOOKAHEAD_AT_START, "^("))
}

fn rewrite_named_groups(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(pos) = rest.find(NAMED_GROUP) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + NAMED_GROUP.len()..];
        if after.starts_with(['=', '!']) {
            out.push_str(NAMED_GROUP);
        } else {
            out.push_str("(?P<");
        }
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Rewrite and compile a definition pattern
///
/// # Errors
///
/// Returns the `regex` error if the rewritten pattern does not compile.
pub fn compile(source: &PatternSource) -> Result<Regex, regex::Error> {
    let joined = source.joined();
    Regex::new(&rewrite(&joined))
}
