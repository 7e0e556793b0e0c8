//! Integration tests for the xmlquery binary
//!
//! Runs the built executable with XML on stdin and checks stdout, stderr
//! and the exit status.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const XML: &str = r#"<root>
  <item id="1">first</item>
  <item id="2"><sub>second</sub></item>
</root>"#;

fn xmlquery(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_xmlquery"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start xmlquery");

    // The process may exit before reading stdin (usage errors, help)
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());

    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_query_prints_one_line_per_match() {
    let output = xmlquery(&["-expr", "//item"], XML);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<item id=\"1\">first</item>\n<item id=\"2\"><sub>second</sub></item>\n"
    );
}

#[test]
fn test_piped_output_is_not_colored() {
    let output = xmlquery(&["-expr", "//sub"], XML);
    assert!(!stdout(&output).contains('\x1b'));
}

#[test]
fn test_color_flag_forces_color() {
    let output = xmlquery(&["-expr", "//sub", "-color"], XML);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\x1b[35m<sub\x1b[0m\x1b[0m\x1b[35m>\x1b[0msecond\x1b[35m</sub>\x1b[39m\n"
    );
}

#[test]
fn test_contents_only_and_no_children() {
    let output = xmlquery(&["-expr", "//item[@id='2']", "-contents-only"], XML);
    assert_eq!(stdout(&output), "<sub>second</sub>\n");

    let output = xmlquery(&["-expr", "//item[@id='2']", "-no-children"], XML);
    assert_eq!(stdout(&output), "<item id=\"2\"></item>\n");
}

#[test]
fn test_attribute_values() {
    let output = xmlquery(&["-expr", "//item/@id", "-contents-only"], XML);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1\n2\n");
}

#[test]
fn test_prefixed_expression() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="urn:media">
  <title>News</title>
  <media:thumbnail url="a.png"/>
</feed>"#;
    let output = xmlquery(&["-expr", "/feed/title | //media:thumbnail"], xml);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "<title>News</title>\n<media:thumbnail url=\"a.png\"></media:thumbnail>\n"
    );
}

#[test]
fn test_double_dash_flags_work_too() {
    let output = xmlquery(&["--expr=//sub", "--no-color"], XML);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "<sub>second</sub>\n");
}

#[test]
fn test_help_exits_successfully() {
    let output = xmlquery(&["-help"], "");

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("--expr"));
}

#[test]
fn test_missing_expression_is_a_usage_error() {
    let output = xmlquery(&[], XML);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("no expression specified\n\n"), "stderr: {}", err);
    assert!(err.contains("--expr"));
}

#[test]
fn test_conflicting_color_flags() {
    let output = xmlquery(&["-expr", "//item", "-color", "-no-color"], XML);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("cannot use -color and -no-color together"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_malformed_input_fails() {
    let output = xmlquery(&["-expr", "//item"], "<root><item></root>");

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("error: parse XML: "));
}

#[test]
fn test_invalid_expression_fails() {
    let output = xmlquery(&["-expr", "//item["], XML);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("error: execute query: "));
}

#[test]
fn test_verbose_reports_on_stderr() {
    let output = xmlquery(&["-expr", "//item", "-verbose"], XML);

    assert!(output.status.success());
    assert!(stderr(&output).contains("matched 2 item(s)"));
    assert_eq!(stdout(&output).lines().count(), 2);
}
