//! Cosmetic post-processing of deobfuscated output.
//!
//! Two independent transforms, both applied after the fixed-point engine
//! and neither affecting it: stripping residual assignment statements,
//! and reflowing overlong `&&` command chains for readability.

use regex::Regex;
use std::sync::LazyLock;

/// Residual quoted assignment followed by its `&&` separator.
static RE_ASSIGN_STMT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s*[a-z]et\s+"[^"]+"\s*&&\s*"#).unwrap());
static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*&&\s*").unwrap());

/// Lines longer than this that contain a separator get split.
const MAX_LINE: usize = 120;

/// Remove residual `set "..."` statements, collapsing their separators.
pub fn strip_assignments(text: &str) -> String {
    RE_ASSIGN_STMT.replace_all(text, "").to_string()
}

/// Normalize `&&` spacing and split overlong chains, one statement per
/// line: the first fragment keeps its trailing ` &&`, continuation
/// fragments are indented two spaces, and all but the last keep theirs.
pub fn reflow(text: &str) -> String {
    let normalized = RE_SEPARATOR.replace_all(text, " && ");
    let mut lines = Vec::new();
    for line in normalized.split('\n') {
        if line.len() > MAX_LINE && line.contains(" && ") {
            let parts: Vec<&str> = line.split(" && ").collect();
            let last = parts.len() - 1;
            for (i, part) in parts.iter().enumerate() {
                if i == 0 {
                    lines.push(format!("{part} &&"));
                } else if i == last {
                    lines.push(format!("  {part}"));
                } else {
                    lines.push(format!("  {part} &&"));
                }
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines.join("\n")
}
