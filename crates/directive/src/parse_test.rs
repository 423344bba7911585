//! Tests for directive token parsing
//!
//! Covers the concrete resolution scenarios, rejection paths, and the
//! canonical-text idempotence property.

use pictor_imaging::ImageFormat;

use crate::{parse_token, DirectiveError, ParamValue};

fn num(directive: &crate::ParsedDirective, key: &str) -> f64 {
    directive.params.get(key).and_then(ParamValue::as_f64).unwrap()
}

fn text<'a>(directive: &'a crate::ParsedDirective, key: &str) -> &'a str {
    directive.params.get(key).and_then(ParamValue::as_str).unwrap()
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_resize_resolves_supplied_and_defaults() {
    let d = parse_token("resize-w:200,h:100,f:cover", ImageFormat::Jpg).unwrap();

    assert_eq!(d.operation, "resize");
    assert_eq!(num(&d, "w"), 200.0);
    assert_eq!(num(&d, "h"), 100.0);
    assert_eq!(text(&d, "f"), "cover");
    // defaults
    assert_eq!(text(&d, "p"), "center");
    assert_eq!(text(&d, "b"), "000000");
    assert_eq!(d.params.get("we"), Some(&ParamValue::Bool(false)));
}

#[test]
fn test_param_set_equals_schema_set() {
    let d = parse_token("resize-w:200", ImageFormat::Jpg).unwrap();
    let mut keys: Vec<_> = d.params.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["b", "f", "h", "p", "w", "we"]);
}

#[test]
fn test_bare_operation_uses_all_defaults() {
    let d = parse_token("trim", ImageFormat::Png).unwrap();
    assert_eq!(num(&d, "t"), 10.0);
}

#[test]
fn test_valueless_key_falls_back_to_default() {
    let d = parse_token("resize-w", ImageFormat::Jpg).unwrap();
    assert_eq!(num(&d, "w"), 0.0);
}

#[test]
fn test_repeated_key_last_wins() {
    let d = parse_token("trim-t:1,t:2", ImageFormat::Jpg).unwrap();
    assert_eq!(num(&d, "t"), 2.0);
}

#[test]
fn test_second_colon_is_discarded() {
    let d = parse_token("jpg-cs:4:2:0", ImageFormat::Jpg).unwrap();
    assert_eq!(text(&d, "cs"), "4");
}

// =============================================================================
// Rejection
// =============================================================================

#[test]
fn test_unknown_operation() {
    assert!(matches!(
        parse_token("emboss-s:3", ImageFormat::Jpg),
        Err(DirectiveError::UnknownOperation { .. })
    ));
}

#[test]
fn test_format_restriction_rejects_not_skips() {
    assert!(matches!(
        parse_token("jpg-q:80", ImageFormat::Png),
        Err(DirectiveError::FormatRestricted { op: "jpg", .. })
    ));
    assert!(matches!(
        parse_token("png-q:80", ImageFormat::Jpg),
        Err(DirectiveError::FormatRestricted { op: "png", .. })
    ));
}

#[test]
fn test_format_restriction_allows_matching_source() {
    assert!(parse_token("jpg-q:80", ImageFormat::Jpg).is_ok());
    assert!(parse_token("jpg-q:80", ImageFormat::Jpeg).is_ok());
    assert!(parse_token("png-q:80", ImageFormat::Png).is_ok());
}

#[test]
fn test_invalid_number_rejects_whole_directive() {
    assert!(matches!(
        parse_token("resize-w:abc", ImageFormat::Jpg),
        Err(DirectiveError::InvalidValue { key: "w", .. })
    ));
}

#[test]
fn test_invalid_enum_member() {
    assert!(matches!(
        parse_token("resize-f:stretch", ImageFormat::Jpg),
        Err(DirectiveError::InvalidValue { key: "f", .. })
    ));
}

#[test]
fn test_invalid_color() {
    assert!(matches!(
        parse_token("tint-c:red", ImageFormat::Jpg),
        Err(DirectiveError::InvalidValue { key: "c", .. })
    ));
}

#[test]
fn test_too_many_pairs_before_filling() {
    assert!(matches!(
        parse_token("trim-t:1,x:2", ImageFormat::Jpg),
        Err(DirectiveError::TooManyParams { .. })
    ));
}

#[test]
fn test_unknown_key_rejected_after_filling() {
    // one pair against a one-parameter schema passes the first count check,
    // but the unknown key inflates the resolved set past the schema
    assert!(matches!(
        parse_token("trim-x:5", ImageFormat::Jpg),
        Err(DirectiveError::TooManyParams { .. })
    ));
}

#[test]
fn test_params_on_parameterless_operation_rejected() {
    assert!(matches!(
        parse_token("flip-x:1", ImageFormat::Jpg),
        Err(DirectiveError::TooManyParams { .. })
    ));
}

// =============================================================================
// Canonical-text idempotence
// =============================================================================

#[test]
fn test_canonical_text_round_trips() {
    for token in [
        "resize-w:200,h:100,f:cover",
        "resize",
        "rotate-a:90",
        "extend-t:1,l:2,b:3,r:4,bc:ff00aa",
        "jpg-q:70",
        "modulate",
    ] {
        let first = parse_token(token, ImageFormat::Jpg).unwrap();
        let second = parse_token(&first.canonical_text(), ImageFormat::Jpg).unwrap();
        assert_eq!(first, second, "token '{token}' did not round-trip");
    }
}

#[test]
fn test_canonical_text_of_parameterless_op_is_bare_name() {
    let d = parse_token("flip", ImageFormat::Jpg).unwrap();
    assert_eq!(d.canonical_text(), "flip");
}

#[test]
fn test_canonical_text_orders_params_by_schema() {
    let d = parse_token("resize-w:200", ImageFormat::Jpg).unwrap();
    assert_eq!(
        d.canonical_text(),
        "resize-h:0,w:200,f:cover,p:center,b:000000,we:false"
    );
}
