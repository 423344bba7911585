//! Tests for parameter value validators

use crate::{ParamKind, ParamValue};

// =============================================================================
// Number
// =============================================================================

#[test]
fn test_number_coerces_integers() {
    assert_eq!(ParamKind::Number.coerce("200"), Some(ParamValue::Num(200.0)));
    assert_eq!(ParamKind::Number.coerce("-90"), Some(ParamValue::Num(-90.0)));
}

#[test]
fn test_number_coerces_fractions() {
    assert_eq!(ParamKind::Number.coerce("0.5"), Some(ParamValue::Num(0.5)));
}

#[test]
fn test_number_rejects_non_numeric() {
    assert_eq!(ParamKind::Number.coerce("abc"), None);
    assert_eq!(ParamKind::Number.coerce(""), None);
    assert_eq!(ParamKind::Number.coerce("12px"), None);
}

// =============================================================================
// Color
// =============================================================================

#[test]
fn test_color_accepts_six_hex_digits() {
    assert_eq!(
        ParamKind::Color.coerce("ff00aa"),
        Some(ParamValue::str("ff00aa"))
    );
}

#[test]
fn test_color_accepts_eight_hex_digits() {
    assert!(ParamKind::Color.coerce("ff00aa80").is_some());
}

#[test]
fn test_color_rejects_wrong_length() {
    assert_eq!(ParamKind::Color.coerce("fff"), None);
    assert_eq!(ParamKind::Color.coerce("ff00aa8"), None);
    assert_eq!(ParamKind::Color.coerce(""), None);
}

#[test]
fn test_color_rejects_uppercase_and_non_hex() {
    assert_eq!(ParamKind::Color.coerce("FF00AA"), None);
    assert_eq!(ParamKind::Color.coerce("gggggg"), None);
    assert_eq!(ParamKind::Color.coerce("#ff00a"), None);
}

// =============================================================================
// Enum
// =============================================================================

const FITS: &[&str] = &["cover", "contain", "fill"];

#[test]
fn test_enum_membership() {
    assert!(ParamKind::Enum(FITS).coerce("cover").is_some());
    assert_eq!(ParamKind::Enum(FITS).coerce("stretch"), None);
    assert_eq!(ParamKind::Enum(FITS).coerce("Cover"), None);
}

// =============================================================================
// Boolean
// =============================================================================

#[test]
fn test_boolean_literals() {
    assert_eq!(
        ParamKind::Boolean.coerce("true"),
        Some(ParamValue::Bool(true))
    );
    assert_eq!(
        ParamKind::Boolean.coerce("false"),
        Some(ParamValue::Bool(false))
    );
    assert_eq!(ParamKind::Boolean.coerce("1"), Some(ParamValue::Bool(true)));
    assert_eq!(ParamKind::Boolean.coerce("0"), Some(ParamValue::Bool(false)));
}

#[test]
fn test_boolean_rejects_everything_else() {
    assert_eq!(ParamKind::Boolean.coerce("yes"), None);
    assert_eq!(ParamKind::Boolean.coerce("TRUE"), None);
    assert_eq!(ParamKind::Boolean.coerce(""), None);
}

// =============================================================================
// Defaults go through check()
// =============================================================================

#[test]
fn test_check_matches_typed_defaults() {
    assert!(ParamKind::Number.check(&ParamValue::Num(0.5)));
    assert!(ParamKind::Boolean.check(&ParamValue::Bool(false)));
    assert!(ParamKind::Color.check(&ParamValue::str("000000")));
    assert!(!ParamKind::Color.check(&ParamValue::str("nothex")));
    assert!(!ParamKind::Number.check(&ParamValue::str("5")));
}

// =============================================================================
// Canonical form
// =============================================================================

#[test]
fn test_canonical_whole_numbers_have_no_fraction() {
    assert_eq!(ParamValue::Num(200.0).canonical(), "200");
    assert_eq!(ParamValue::Num(0.5).canonical(), "0.5");
    assert_eq!(ParamValue::Bool(false).canonical(), "false");
    assert_eq!(ParamValue::str("cover").canonical(), "cover");
}
