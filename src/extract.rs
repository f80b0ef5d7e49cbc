//! Assignment harvesting from obfuscated batch text.
//!
//! Scans the whole buffer (not line-anchored) for `set`-style assignment
//! statements and collects them into a name→value map. The assignment verb
//! is frequently disguised, so only the trailing `et` is required — `get`,
//! `net` and friends all count.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Quoted form: `set "var=value"` — value may contain whitespace.
static RE_QUOTED_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)[a-z]et\s+"([^"=]+)=([^"]*)""#).unwrap());
/// Unquoted form: `set var=value` — value stops at whitespace or `&`.
static RE_UNQUOTED_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)[a-z]et\s+([^"=\s]+)=([^\s&]*)"#).unwrap());

/// Harvest all assignment statements into a name→value map.
///
/// Quoted matches are collected first, then unquoted; within each pass
/// matches are taken in scan order, and a later match for the same name
/// overwrites the earlier one. Text that matches neither form contributes
/// nothing — there is no failure mode.
pub fn assignments(text: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for re in [&*RE_QUOTED_SET, &*RE_UNQUOTED_SET] {
        for cap in re.captures_iter(text) {
            vars.insert(cap[1].trim().to_string(), cap[2].trim().to_string());
        }
    }
    vars
}
