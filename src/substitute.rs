//! Reference-token substitution.
//!
//! A reference token is a variable name delimited by `%` or `!` sigils,
//! with either sigil accepted on either side (`%x%`, `!x!`, `%x!`, `!x%`).
//! Tokens naming a mapped variable are replaced wholesale, sigils included;
//! unknown names are left verbatim.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!%](\w+)[!%]").unwrap());

/// Replace every resolvable reference token in `text` with its mapped value.
///
/// One left-to-right pass over the buffer: replacements use only the map
/// snapshot passed in, never values produced earlier in the same pass.
/// Returns the new buffer and whether anything changed.
pub fn substitute(text: &str, vars: &HashMap<String, String>) -> (String, bool) {
    let result = RE_REFERENCE.replace_all(text, |caps: &Captures| {
        match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    });
    let changed = result != text;
    (result.into_owned(), changed)
}
