//! Error messages, locations and source excerpts.

use curlew::{render, BlockKind, Curlew, CurlewError, ErrorKind, ParseError, RenderConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn unmatched_open_message() {
    let err = render("Hello {{name", json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: unmatched opening delimiter '{{' at line 1, column 7 near `Hello {{name`"
    );
}

#[test]
fn mismatched_close_message() {
    let err = render("{{#loop items as item}}{{/if}}", json!({"items": []})).unwrap_err();
    assert!(matches!(
        err,
        CurlewError::Syntax(ParseError::MismatchedClose {
            expected: BlockKind::Loop,
            found: BlockKind::If,
            ..
        })
    ));
    assert_eq!(
        err.to_string(),
        "Syntax error: closing '/if' does not match the open 'loop' block at line 1, column 24 near `...loop items as item}}{{/if}}`"
    );
}

#[test]
fn unclosed_blocks_are_named() {
    let err = render("{{#if a}}\n{{#loop xs as x}}\nbody", json!({})).unwrap_err();
    match err {
        CurlewError::Syntax(ParseError::UnclosedDirective { open, at }) => {
            assert_eq!(open, vec![BlockKind::If, BlockKind::Loop]);
            assert_eq!(at.location.line, 2);
            assert_eq!(at.location.column, 1);
        }
        other => panic!("expected UnclosedDirective, got {other:?}"),
    }
}

#[test]
fn malformed_loop_message() {
    let err = render("{{#loop items}}{{/loop}}", json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: malformed directive '#loop items' (expected `#loop <path> as <alias>`) at line 1, column 1 near `{{#loop items}}{{/lo...`"
    );
}

#[test]
fn syntax_error_location_on_later_line() {
    let err = render("one\ntwo\n  {{/if}}", json!({})).unwrap_err();
    let context = err.context().unwrap();
    assert_eq!(context.location.line, 3);
    assert_eq!(context.location.column, 3);
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

// ============================================================================
// Render errors
// ============================================================================

#[test]
fn missing_variable_message() {
    let err = render("Hello {{name}}!", json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing variable 'name' at line 1, column 7 near `Hello {{name}}!`"
    );
}

#[test]
fn missing_property_names_the_object() {
    let err = render("{{ user.email }}", json!({"user": {"name": "A"}})).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Missing property 'email' on {"name":"A"} at line 1, column 1 near `{{ user.email }}`"#
    );
}

#[test]
fn missing_first_segment_names_the_scope() {
    let err = render("{{ nobody.x }}", json!({"a": 1})).unwrap_err();
    assert!(matches!(
        err,
        CurlewError::MissingProperty { ref key, ref target, .. } if key == "nobody" && target == "scope {a}"
    ));
}

#[test]
fn null_property_message() {
    let err = render("{{ a.b.c }}", json!({"a": {"b": null}})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot read property 'c' of null 'a.b' at line 1, column 1 near `{{ a.b.c }}`"
    );
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn not_iterable_message() {
    let err = render("{{#loop n as x}}{{/loop}}", json!({"n": 5})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'n' is not iterable (found number) at line 1, column 1 near `{{#loop n as x}}{{/l...`"
    );
}

#[test]
fn unsupported_type_message() {
    let err = render("{{ xs }}", json!({"xs": [1]})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot output array value of 'xs' at line 1, column 1 near `{{ xs }}`"
    );
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn error_inside_loop_points_at_inner_directive() {
    let err = render(
        "{{#loop xs as x}}\n{{ x.name }}\n{{/loop}}",
        json!({"xs": [{"name": "a"}, {}]}),
    )
    .unwrap_err();
    assert!(matches!(err, CurlewError::MissingProperty { ref key, .. } if key == "name"));
    let context = err.context().unwrap();
    assert_eq!(context.location.line, 2);
    assert_eq!(context.location.column, 1);
}

#[test]
fn invalid_context_message() {
    let err = Curlew::new("x", json!("text"), RenderConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Template data must be an object, got string");
    assert!(err.context().is_none());
}

#[test]
fn lenient_mode_never_raises_render_errors() {
    let template = "{{a}}{{b.c}}{{#loop d as x}}{{x}}{{/loop}}{{#if e.f}}y{{/if}}{{g}}";
    let result = Curlew::new(
        template,
        json!({"b": null, "d": 3, "g": {"k": true}}),
        RenderConfig::lenient(),
    )
    .and_then(|tmpl| tmpl.render());
    assert_eq!(result.unwrap(), r#"{"k":true}"#);
}
