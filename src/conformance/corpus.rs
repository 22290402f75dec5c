//! Corpus-based conformance testing.
//!
//! A corpus is a JSON file of test vectors. Each vector names an operation,
//! its input, and the expected outcome: either `{"ok": ...}` or
//! `{"err": {"name": "SyntaxError", "line": 3}}` (the `line` is optional and
//! only checked for syntax errors).
//!
//! | op        | input                                   | ok value              |
//! |-----------|-----------------------------------------|-----------------------|
//! | `parse`   | `text`, optional `comments`             | compact text          |
//! | `pretty`  | `text`                                  | indented text         |
//! | `escape`  | `raw`                                   | quoted literal        |
//! | `encode`  | `text` (object or array)                | hex blob              |
//! | `decode`  | `hex`, `kind` (`object`/`array`)        | compact text          |
//! | `merge`   | `dst`, `src` (objects)                  | compact text          |
//! | `hash_eq` | `a`, `b`                                | bool (hashes equal)   |

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{ConformanceError, ConformanceResult};
use crate::binary;
use crate::error::{ErrorCode, JsonResult};
use crate::json::{self, Item, Limits, Object};

/// Corpus metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A corpus containing test vectors.
#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Clone, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g. "parse", "encode").
    pub op: String,
    /// Input parameters for the operation.
    pub input: Value,
    /// Expected result (success or error).
    pub expected: Value,
}

/// Result of running a single test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result.
        actual: String,
    },
    /// Test was skipped (operation not known).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    fn malformed(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that were skipped.
    pub skipped: usize,
    /// Number of malformed vectors.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Skip { .. } => self.skipped += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Total number of vectors run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Returns true if nothing failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }

    /// Failures and errors, in corpus order.
    pub fn problems(&self) -> impl Iterator<Item = &(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Fail { .. } | TestResult::Error { .. }))
    }
}

/// Executes the vectors of one corpus.
#[derive(Debug, Clone)]
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load a corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConformanceError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Load a corpus from its JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus =
            serde_json::from_str(content).map_err(|e| ConformanceError::Format(e.to_string()))?;
        Ok(Self { corpus })
    }

    /// Corpus metadata.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run every vector and tally the results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();
        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            log::debug!("{}: {:?}", vector.id, result);
            results.record(&vector.id, result);
        }
        results
    }
}

/// Run one vector.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let outcome = match vector.op.as_str() {
        "parse" => run_parse(&vector.input),
        "pretty" => run_pretty(&vector.input),
        "escape" => run_escape(&vector.input),
        "encode" => run_encode(&vector.input),
        "decode" => run_decode(&vector.input),
        "merge" => run_merge(&vector.input),
        "hash_eq" => run_hash_eq(&vector.input),
        _ => {
            return TestResult::Skip {
                reason: format!("unknown operation: {}", vector.op),
            }
        }
    };
    match outcome {
        Ok(actual) => compare(&vector.expected, actual),
        Err(message) => TestResult::malformed(message),
    }
}

/// Outcome of an operation: `Err` only when the vector input is malformed.
type Outcome = Result<JsonResult<Value>, String>;

fn run_parse(input: &Value) -> Outcome {
    let text = field_str(input, "text")?;
    let limits = if input.get("comments").and_then(Value::as_bool).unwrap_or(false) {
        Limits::with_comments()
    } else {
        Limits::strict()
    };
    Ok(json::parse_with_limits(text, limits).map(|item| Value::from(item.to_compact_string())))
}

fn run_pretty(input: &Value) -> Outcome {
    let text = field_str(input, "text")?;
    Ok(json::parse(text).map(|item| Value::from(item.to_pretty_string())))
}

fn run_escape(input: &Value) -> Outcome {
    let raw = field_str(input, "raw")?;
    Ok(Ok(Value::from(json::escape_str(raw))))
}

fn run_encode(input: &Value) -> Outcome {
    let text = field_str(input, "text")?;
    Ok(json::parse(text).and_then(|item| {
        let blob = match item {
            Item::Array(a) => binary::encode_array(&a)?,
            Item::Object(o) => binary::encode_object(&o)?,
            other => {
                return Err(ErrorCode::TypeMismatch {
                    expected: json::ItemType::Object,
                    found: other.item_type(),
                })
            }
        };
        Ok(Value::from(hex::encode(blob)))
    }))
}

fn run_decode(input: &Value) -> Outcome {
    let blob = hex::decode(field_str(input, "hex")?).map_err(|e| format!("invalid hex: {e}"))?;
    let decoded = match field_str(input, "kind")? {
        "array" => binary::decode_array(&blob).map(|a| a.to_compact_string()),
        "object" => binary::decode_object(&blob).map(|o| o.to_compact_string()),
        other => return Err(format!("unknown kind '{other}'")),
    };
    Ok(decoded.map(Value::from))
}

fn run_merge(input: &Value) -> Outcome {
    let dst = field_str(input, "dst")?;
    let src = field_str(input, "src")?;
    Ok(Object::parse(dst).and_then(|mut dst| {
        let src = Object::parse(src)?;
        dst.merge(&src);
        Ok(Value::from(dst.to_compact_string()))
    }))
}

fn run_hash_eq(input: &Value) -> Outcome {
    let a = field_str(input, "a")?;
    let b = field_str(input, "b")?;
    Ok(json::parse(a).and_then(|a| {
        let b = json::parse(b)?;
        Ok(Value::from(a.structural_hash() == b.structural_hash()))
    }))
}

fn field_str<'a>(input: &'a Value, name: &str) -> Result<&'a str, String> {
    input
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing '{name}' in input"))
}

/// Compare an operation's outcome against the vector's `expected`.
fn compare(expected: &Value, actual: JsonResult<Value>) -> TestResult {
    match (expected.get("ok"), expected.get("err"), actual) {
        (Some(ok), None, Ok(value)) => {
            if *ok == value {
                TestResult::Pass
            } else {
                TestResult::Fail {
                    expected: ok.to_string(),
                    actual: value.to_string(),
                }
            }
        }
        (Some(ok), None, Err(e)) => TestResult::Fail {
            expected: format!("ok: {ok}"),
            actual: format!("err: {} ({e})", e.name()),
        },
        (None, Some(err), Ok(value)) => TestResult::Fail {
            expected: format!("err: {err}"),
            actual: format!("ok: {value}"),
        },
        (None, Some(err), Err(e)) => compare_error(err, &e),
        _ => TestResult::malformed("expected must hold exactly one of 'ok' or 'err'"),
    }
}

fn compare_error(err: &Value, actual: &ErrorCode) -> TestResult {
    let Some(name) = err.get("name").and_then(Value::as_str) else {
        return TestResult::malformed("'err' must carry a 'name'");
    };
    if name != actual.name() {
        return TestResult::Fail {
            expected: name.to_string(),
            actual: format!("{} ({actual})", actual.name()),
        };
    }
    match (err.get("line").and_then(Value::as_u64), actual) {
        (Some(line), ErrorCode::SyntaxError { line: got, .. }) if line != *got as u64 => {
            TestResult::Fail {
                expected: format!("{name} at line {line}"),
                actual: actual.to_string(),
            }
        }
        _ => TestResult::Pass,
    }
}
