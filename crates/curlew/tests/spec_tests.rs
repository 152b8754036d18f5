//! Fixture-driven integration tests
//!
//! Every file in tests/fixtures/ is a suite of cases: a template, the data to
//! render it with, the mode, and either the expected output or the kind of
//! error that must be raised.

use curlew::{render_with_config, CurlewError, RenderConfig};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TestFile {
    #[allow(dead_code)]
    description: String,
    tests: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    template: String,
    #[serde(default = "empty_object")]
    data: Value,
    #[serde(default = "strict_by_default")]
    strict: bool,
    expected: Option<String>,
    error: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

fn strict_by_default() -> bool {
    true
}

fn load_test_file(filename: &str) -> TestFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename);

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", filename, e))
}

fn run_test_case(case: &TestCase, filename: &str) {
    let config = RenderConfig {
        strict_var_mode: case.strict,
    };
    let result = render_with_config(&case.template, case.data.clone(), config);

    match (&result, &case.expected, &case.error) {
        (Ok(output), Some(expected), None) => {
            assert_eq!(
                output, expected,
                "\n[{}] Test '{}' failed:\n  Template: {:?}\n  Data: {}",
                filename, case.name, case.template, case.data
            );
        }
        (Err(e), None, Some(expected_kind)) => {
            assert_eq!(
                &format!("{:?}", e.kind()),
                expected_kind,
                "\n[{}] Test '{}' raised the wrong kind of error: {}",
                filename,
                case.name,
                e
            );
        }
        (Ok(output), None, Some(expected_kind)) => {
            panic!(
                "\n[{}] Test '{}' should have failed with a {} error but succeeded:\n  Template: {:?}\n  Output: {:?}",
                filename, case.name, expected_kind, case.template, output
            );
        }
        (Err(e), Some(expected), None) => {
            panic!(
                "\n[{}] Test '{}' failed with unexpected error:\n  Template: {:?}\n  Expected: {:?}\n  Error: {}",
                filename, case.name, case.template, expected, e
            );
        }
        _ => panic!(
            "[{}] Test '{}' must set exactly one of 'expected' and 'error'",
            filename, case.name
        ),
    }
}

fn run_test_suite(filename: &str) {
    let suite = load_test_file(filename);
    assert!(!suite.tests.is_empty(), "{filename} has no test cases");

    for case in &suite.tests {
        run_test_case(case, filename);
    }
    eprintln!("{}: {} tests passed", filename, suite.tests.len());
}

#[test]
fn test_basic() {
    run_test_suite("basic.json");
}

#[test]
fn test_comments() {
    run_test_suite("comments.json");
}

#[test]
fn test_loops() {
    run_test_suite("loops.json");
}

#[test]
fn test_conditionals() {
    run_test_suite("conditionals.json");
}

#[test]
fn test_errors() {
    run_test_suite("errors.json");
}

#[test]
fn test_normalization() {
    run_test_suite("normalization.json");
}

#[test]
fn test_rendering_twice_is_identical() {
    let suite = load_test_file("loops.json");
    for case in suite.tests.iter().filter(|case| case.expected.is_some()) {
        let config = RenderConfig {
            strict_var_mode: case.strict,
        };
        let tmpl = curlew::Curlew::new(&case.template, case.data.clone(), config)
            .unwrap_or_else(|e: CurlewError| panic!("[{}] {}", case.name, e));
        assert_eq!(tmpl.render().unwrap(), tmpl.render().unwrap(), "{}", case.name);
    }
}
