//! FOR-loop binding extraction.
//!
//! Obfuscators like to launder values through `for` constructs instead of
//! plain assignments. Two idioms are recognized:
//!
//! - **Two-hop copy** — `(for %g in ("s") do @set "TARGET=%~g")` binds a
//!   decoy loop variable and copies its value into the real target.
//! - **Multi-pair** — `(for %g in ("A=1" "B=2") do @set %~g)` enumerates
//!   several `name=value` pairs consumed by one indirect `set`.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_LOOP_COPY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\(for\s+%([a-z]+)\s+in\s+\("?([^"]*)"?\)\s+do\s+@set\s+"([a-z]+)=%~[a-z]+"\s?\)"#)
        .unwrap()
});
static RE_MULTI_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\(for\s+%[a-z]+\s+in\s+\(([^)]+)\)\s+do\s+@set\s+%~[a-z]+\)"#).unwrap()
});
static RE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"=]+)=([^"]*)""#).unwrap());

/// Extract two-hop loop copies: both the loop variable and the target
/// variable map to the same literal value, surrounding quotes stripped.
pub fn loop_copies(text: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for cap in RE_LOOP_COPY.captures_iter(text) {
        let value = cap[2].trim_matches('"').to_string();
        vars.insert(cap[1].to_string(), value.clone());
        vars.insert(cap[3].to_string(), value);
    }
    vars
}

/// Extract every quoted `name=value` pair from multi-assignment loops.
/// Duplicate names across pairs use last-occurrence-wins.
pub fn multi_assignments(text: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for cap in RE_MULTI_LOOP.captures_iter(text) {
        for pair in RE_PAIR.captures_iter(&cap[1]) {
            vars.insert(pair[1].trim().to_string(), pair[2].trim().to_string());
        }
    }
    vars
}
