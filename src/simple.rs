//! Single-pass deobfuscation for the plain `name = value` dialect.
//!
//! Unlike the iterative engine, this dialect is line-oriented: every line
//! matching `name = value` is removed from the buffer and contributes a
//! mapping entry, then one substitution sweep replaces `%name%` tokens.
//! No iteration, no `!` sigils, no FOR-loop awareness.

use regex::Regex;
use std::sync::LazyLock;

static RE_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*=\s*(.*)$").unwrap());

/// Extract `name = value` lines, drop them from the buffer, and perform one
/// substitution pass over what remains.
///
/// Values are trimmed of whitespace and then of surrounding single/double
/// quotes. Pairs keep first-occurrence order; a repeated name updates its
/// stored value in place. Substitution applies each pair in that order.
pub fn deobfuscate_simple(text: &str) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        match RE_KEY_VALUE.captures(line) {
            Some(cap) => {
                let name = cap[1].to_string();
                let value = cap[2]
                    .trim()
                    .trim_matches(|c| c == '\'' || c == '"')
                    .to_string();
                match pairs.iter_mut().find(|(n, _)| *n == name) {
                    Some(entry) => entry.1 = value,
                    None => pairs.push((name, value)),
                }
            }
            None => kept.push(line),
        }
    }

    let mut result = kept.join("\n");
    for (name, value) in &pairs {
        result = result.replace(&format!("%{name}%"), value);
    }
    result
}
