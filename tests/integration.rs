use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_deobf")))
}

fn deobf_file(input: &str, extra_args: &[&str]) -> String {
    let mut infile = NamedTempFile::new().unwrap();
    infile.write_all(input.as_bytes()).unwrap();

    let output = cmd()
        .arg(infile.path())
        .args(extra_args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn cli_resolves_simple_assignment() {
    let result = deobf_file(r#"set "FOO=bar" && echo %FOO%"#, &[]);
    assert_eq!(result.trim_end(), "echo bar");
}

#[test]
fn cli_reads_stdin() {
    cmd()
        .write_stdin(r#"set "FOO=bar" && echo %FOO%"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("echo bar"));
}

#[test]
fn cli_two_hop_loop() {
    let input = "(for %g in (\"s\") do @set \"TARGET=%~g\")\necho %TARGET%\n";
    let result = deobf_file(input, &[]);
    assert!(result.contains("echo s"), "Got: {result}");
}

#[test]
fn cli_multi_pair_loop() {
    let input = "(for %g in (\"A=1\" \"B=2\") do @set %~g)\necho %A%-%B%\n";
    let result = deobf_file(input, &[]);
    assert!(result.contains("echo 1-2"), "Got: {result}");
}

#[test]
fn cli_keep_vars() {
    let result = deobf_file(r#"set "FOO=bar" && echo %FOO%"#, &["-k"]);
    assert!(result.contains(r#"set "FOO=bar""#), "Got: {result}");
    assert!(result.contains("echo bar"), "Got: {result}");
}

#[test]
fn cli_raw_skips_reflow() {
    let result = deobf_file("echo a&&echo b", &["-r"]);
    assert_eq!(result.trim_end(), "echo a&&echo b");
}

#[test]
fn cli_reflow_splits_long_chains() {
    let parts: Vec<String> = (0..6).map(|i| format!("command --flag value{i}")).collect();
    let input = parts.join(" && ");
    let result = deobf_file(&input, &[]);
    let lines: Vec<&str> = result.trim_end().split('\n').collect();
    assert_eq!(lines.len(), parts.len(), "Got: {result}");
    assert!(lines[0].ends_with(" &&"), "Got: {result}");
    assert!(lines[1].starts_with("  "), "Got: {result}");
}

#[test]
fn cli_max_rounds_caps_cycles() {
    // Self-referential value — only the round budget stops it
    cmd()
        .write_stdin(r#"set "LOOP=%LOOP%x""#)
        .args(["-m", "2", "-k", "-r"])
        .assert()
        .success()
        .stdout(predicate::str::contains("%LOOP%xxx"));
}

#[test]
fn cli_verbose_trace_on_stderr() {
    cmd()
        .write_stdin(r#"set "FOO=bar" && echo %FOO%"#)
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Round 1: found 1 variables"))
        .stderr(predicate::str::contains("FOO = bar"))
        .stderr(predicate::str::contains("Fixed point reached"))
        .stdout(predicate::str::contains("echo bar"));
}

#[test]
fn cli_verbose_caps_preview() {
    let input = "(for %g in (\"A=1\" \"B=2\" \"C=3\" \"D=4\" \"E=5\" \"F=6\" \"G=7\") do @set %~g)\n%A%%B%%C%%D%%E%%F%%G%\n";
    cmd()
        .write_stdin(input)
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("... and "));
}

#[test]
fn cli_simple_dialect() {
    let input = "cmd = \"calc.exe\"\nstart %cmd%\n";
    let result = deobf_file(input, &["-s"]);
    assert_eq!(result.trim_end(), "start calc.exe");
}

#[test]
fn cli_empty_stdin() {
    cmd().write_stdin("").assert().success().stdout("\n");
}

#[test]
fn cli_missing_input() {
    cmd()
        .arg("/tmp/nonexistent_deobf_test_xyz.cmd")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn cli_clean_input_passes_through() {
    let result = deobf_file("echo hello\necho world\n", &["-r"]);
    assert_eq!(result.trim_end(), "echo hello\necho world");
}
