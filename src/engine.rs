//! Fixed-point deobfuscation driver.
//!
//! Each round rebuilds the variable map from the current buffer (plain
//! assignments first, then the FOR-loop extractors, which may overwrite
//! base names with derived values) and runs one substitution pass. The
//! loop stops when no variables are found, when substitution changes
//! nothing, or when the round budget runs out — the budget is the only
//! guard against values that re-introduce their own reference tokens.

use crate::{extract, loops, substitute};
use std::collections::HashMap;

/// Round budget used by [`deobfuscate`] callers that take the default.
pub const DEFAULT_MAX_ROUNDS: usize = 50;

/// Why the driver stopped. Budget exhaustion is a diagnostic, not an error:
/// the best-effort buffer is still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No assignment statements found — nothing to do.
    NoVariables,
    /// A substitution pass changed nothing.
    FixedPoint,
    /// `max_rounds` reached before a fixed point.
    Budget,
}

/// Per-round progress snapshot handed to the observer.
pub struct RoundReport<'a> {
    pub round: usize,
    pub vars: &'a HashMap<String, String>,
    pub lines_changed: usize,
}

/// Result of a full deobfuscation run.
pub struct Deobfuscation {
    pub text: String,
    /// Completed rounds that changed the buffer.
    pub rounds: usize,
    pub termination: Termination,
}

/// Run the iterative engine and return the final buffer.
pub fn deobfuscate(text: &str, max_rounds: usize) -> String {
    deobfuscate_with(text, max_rounds, |_| {}).text
}

/// Run the iterative engine, invoking `observer` once per round that
/// changed the buffer. The engine itself performs no I/O.
pub fn deobfuscate_with(
    text: &str,
    max_rounds: usize,
    mut observer: impl FnMut(&RoundReport),
) -> Deobfuscation {
    let mut current = text.to_string();
    let mut round = 0;

    while round < max_rounds {
        round += 1;

        let mut vars = extract::assignments(&current);
        vars.extend(loops::loop_copies(&current));
        vars.extend(loops::multi_assignments(&current));

        if vars.is_empty() {
            return Deobfuscation {
                text: current,
                rounds: round - 1,
                termination: Termination::NoVariables,
            };
        }

        let (next, changed) = substitute::substitute(&current, &vars);
        if !changed {
            return Deobfuscation {
                text: current,
                rounds: round - 1,
                termination: Termination::FixedPoint,
            };
        }

        let lines_changed = current
            .split('\n')
            .zip(next.split('\n'))
            .filter(|(before, after)| before != after)
            .count();
        observer(&RoundReport {
            round,
            vars: &vars,
            lines_changed,
        });

        current = next;
    }

    Deobfuscation {
        text: current,
        rounds: max_rounds,
        termination: Termination::Budget,
    }
}
