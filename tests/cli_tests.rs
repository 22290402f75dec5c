//! CLI integration tests.
//!
//! Tests the jsonitem CLI commands by invoking the binary as a subprocess.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsonitem"))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn jsonitem: {}", e));
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// check
// ============================================================================

#[test]
fn cli_check_valid_document() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ok.json", br#"{"a":1,"b":[true,null,"x"]}"#);

    let (code, stdout, _stderr) = run(&["check", arg(&path)]);
    assert_eq!(code, 0, "Expected success exit code");
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn cli_check_reports_syntax_error_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.json", b"{\n  \"a\": 1,\n  \"b\": [1,2,]\n}");

    let (code, _stdout, stderr) = run(&["check", arg(&path)]);
    assert_eq!(code, 1, "Expected failure exit code");
    assert!(stderr.contains("SyntaxError"), "Expected error name: {}", stderr);
    assert!(stderr.contains("line 3"), "Expected line number: {}", stderr);
}

#[test]
fn cli_check_comments_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "commented.json", b"# settings\n{\"a\": 1}\n");

    let (code, _stdout, _stderr) = run(&["check", arg(&path)]);
    assert_eq!(code, 1, "Comments are rejected by default");

    let (code, stdout, _stderr) = run(&["check", "--comments", arg(&path)]);
    assert_eq!(code, 0, "Expected success with --comments");
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn cli_check_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let (code, _stdout, stderr) = run(&["check", arg(&missing)]);
    assert_eq!(code, 1, "Expected failure exit code");
    assert!(stderr.contains("IOFailure"), "Expected I/O error: {}", stderr);
}

// ============================================================================
// format
// ============================================================================

#[test]
fn cli_format_pretty_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.json", br#"{"a":[1,{}]}"#);

    let (code, stdout, _stderr) = run(&["format", arg(&path)]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\n  \"a\": [\n    1,\n    {}\n  ]\n}\n");
}

#[test]
fn cli_format_compact() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.json", b"{ \"z\" : 1 ,\n \"a\" : 2.5 }");

    let (code, stdout, _stderr) = run(&["format", "--compact", arg(&path)]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#"{"z":1,"a":2.50000000}"#);
}

// ============================================================================
// encode / decode
// ============================================================================

#[test]
fn cli_encode_decode_object() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "doc.json", br#"{"name":"demo","list":[1,2,3]}"#);
    let blob = dir.path().join("doc.bin");

    let (code, _stdout, stderr) = run(&["encode", arg(&input), arg(&blob)]);
    assert_eq!(code, 0, "encode failed: {}", stderr);
    let bytes = fs::read(&blob).unwrap();
    assert_eq!(
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize,
        bytes.len()
    );

    let (code, stdout, _stderr) = run(&["decode", arg(&blob)]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#"{"name":"demo","list":[1,2,3]}"#);
}

#[test]
fn cli_encode_decode_array() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "list.json", br#"[true,{"k":null}]"#);
    let blob = dir.path().join("list.bin");

    let (code, _stdout, _stderr) = run(&["encode", arg(&input), arg(&blob)]);
    assert_eq!(code, 0);

    let (code, stdout, _stderr) = run(&["decode", "--array", "--pretty", arg(&blob)]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "[\n  true,\n  {\n    \"k\": null\n  }\n]\n");
}

#[test]
fn cli_encode_scalar_root_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "scalar.json", b"42");
    let blob = dir.path().join("scalar.bin");

    let (code, _stdout, stderr) = run(&["encode", arg(&input), arg(&blob)]);
    assert_eq!(code, 1);
    assert!(stderr.contains("TypeMismatch"), "Expected type error: {}", stderr);
    assert!(!blob.exists());
}

#[test]
fn cli_decode_corrupt_blob() {
    let dir = TempDir::new().unwrap();
    let blob = write_file(&dir, "bad.bin", &[0x20, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);

    let (code, _stdout, stderr) = run(&["decode", arg(&blob)]);
    assert_eq!(code, 1);
    assert!(stderr.contains("CorruptData"), "Expected corrupt data: {}", stderr);
}

// ============================================================================
// conformance
// ============================================================================

#[test]
fn cli_conformance_bundled_corpus() {
    let corpus = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/vectors/corpus.json");

    let (code, stdout, _stderr) = run(&["conformance", corpus]);
    assert_eq!(code, 0, "Expected every vector to pass: {}", stdout);
    assert!(stdout.contains("0 failed"), "Expected summary: {}", stdout);
}

#[test]
fn cli_conformance_failing_vector() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(
        &dir,
        "corpus.json",
        br#"{
            "manifest": {"format_version": "1"},
            "vectors": [
                {"id": "good", "op": "parse", "input": {"text": "[1]"}, "expected": {"ok": "[1]"}},
                {"id": "bad", "op": "parse", "input": {"text": "[1]"}, "expected": {"ok": "[2]"}}
            ]
        }"#,
    );

    let (code, stdout, stderr) = run(&["conformance", arg(&corpus)]);
    assert_eq!(code, 1);
    assert!(stdout.contains("bad:"), "Expected failing id: {}", stdout);
    assert!(stdout.contains("1 passed, 1 failed"), "Expected summary: {}", stdout);
    assert!(stderr.contains("conformance failed"), "Expected error: {}", stderr);
}

// ============================================================================
// argument handling
// ============================================================================

#[test]
fn cli_unknown_subcommand() {
    let (code, _stdout, _stderr) = run(&["digest"]);
    assert_eq!(code, 2, "clap usage errors exit with 2");
}

#[test]
fn cli_missing_argument() {
    let (code, _stdout, stderr) = run(&["encode", "only-input.json"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage"), "Expected usage text: {}", stderr);
}
