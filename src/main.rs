//! Batch script deobfuscator for layered variable substitution.
//!
//! Reverses the common obfuscation scheme of hiding a command behind
//! chains of `set` assignments and indirect `%var%`/`!var!` references:
//!
//! 1. **Extract** — harvest `set` statements and FOR-loop bindings into a map
//! 2. **Substitute** — replace reference tokens, repeated to a fixed point
//! 3. **Cleanup** (optional) — strip residual assignments, reflow long chains
//!
//! A `--simple` mode handles the plain line-oriented `name = value` dialect
//! with a single substitution pass instead.

mod cleanup;
mod engine;
mod extract;
mod loops;
mod simple;
mod substitute;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deobf", about = "Batch script deobfuscator with layered substitution")]
struct Cli {
    /// Input file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Maximum number of deobfuscation rounds
    #[arg(short = 'm', long = "max-rounds", default_value_t = engine::DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    /// Output the raw result without separator normalization or line splitting
    #[arg(short = 'r', long)]
    raw: bool,

    /// Show per-round progress on stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Keep variable assignment statements in the output
    #[arg(short = 'k', long = "keep-vars")]
    keep_vars: bool,

    /// Single-pass `name = value` substitution (INF/SCT dialect)
    #[arg(short = 's', long)]
    simple: bool,
}

/// Pipeline configuration for [`run`].
struct RunConfig {
    max_rounds: usize,
    raw: bool,
    verbose: bool,
    keep_vars: bool,
    simple: bool,
}

/// Core deobfuscation pipeline — extracted for testability.
fn run(source: &str, config: &RunConfig) -> String {
    if config.simple {
        return simple::deobfuscate_simple(source);
    }

    let result = if config.verbose {
        engine::deobfuscate_with(source, config.max_rounds, report_round)
    } else {
        engine::deobfuscate_with(source, config.max_rounds, |_| {})
    };
    if config.verbose {
        report_termination(&result);
    }

    let mut text = result.text;
    if !config.keep_vars {
        text = cleanup::strip_assignments(&text);
    }
    if !config.raw {
        text = cleanup::reflow(&text);
    }
    text
}

/// Sample size for the per-round variable preview.
const PREVIEW_VARS: usize = 5;

fn report_round(report: &engine::RoundReport) {
    eprintln!(
        "Round {}: found {} variables",
        report.round,
        report.vars.len()
    );
    // Sort for a deterministic preview — the map itself is unordered
    let mut entries: Vec<(&String, &String)> = report.vars.iter().collect();
    entries.sort();
    for (name, value) in entries.iter().take(PREVIEW_VARS) {
        eprintln!("  {name} = {value}");
    }
    if entries.len() > PREVIEW_VARS {
        eprintln!("  ... and {} more", entries.len() - PREVIEW_VARS);
    }
    eprintln!("  changed {} lines", report.lines_changed);
}

fn report_termination(result: &engine::Deobfuscation) {
    match result.termination {
        engine::Termination::NoVariables => {
            eprintln!("No variables found, nothing to do")
        }
        engine::Termination::FixedPoint => {
            eprintln!("Fixed point reached after {} rounds", result.rounds)
        }
        engine::Termination::Budget => {
            eprintln!(
                "Round budget ({}) exhausted before a fixed point",
                result.rounds
            )
        }
    }
}

/// Read input bytes and decode lossily — obfuscated scripts are routinely
/// littered with bytes that are not valid UTF-8.
fn read_source(file: Option<&PathBuf>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = read_source(cli.file.as_ref())?;
    let config = RunConfig {
        max_rounds: cli.max_rounds,
        raw: cli.raw,
        verbose: cli.verbose,
        keep_vars: cli.keep_vars,
        simple: cli.simple,
    };
    println!("{}", run(&source, &config));

    Ok(())
}
