//! Tests for config parsing and validation

use std::str::FromStr;

use crate::{validate_config, Config, ConfigError};

const BASE: &str = r#"
[[origins]]
stage = "prod"
origin = "s3://assets-prod.s3.amazonaws.com"
intercept_prefixes = ["/media"]

[[directories]]
prefix = "/media/"
namespace = "media"
interceptors = ["dimension_shorthand", "quality_shorthand"]
"#;

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_minimal_config() {
    let config = Config::from_str(BASE).unwrap();
    assert_eq!(config.origins.len(), 1);
    assert_eq!(config.directories.len(), 1);
    assert_eq!(config.directories[0].namespace, "media");
}

#[test]
fn test_defaults_for_missing_sections() {
    let config = Config::from_str(BASE).unwrap();
    assert_eq!(config.encode.initial_quality, 80);
    assert_eq!(config.encode.quality_step, 10);
    assert_eq!(config.encode.max_payload_bytes, 5_242_880);
    assert_eq!(config.encode.max_attempts, 8);
}

#[test]
fn test_bucket_derived_from_origin() {
    let config = Config::from_str(BASE).unwrap();
    assert_eq!(config.origins[0].bucket(), "assets-prod");
    assert!(config.is_valid_bucket("assets-prod"));
    assert!(!config.is_valid_bucket("assets-other"));
}

#[test]
fn test_bucket_from_domain() {
    assert_eq!(
        crate::bucket_from_domain("assets-prod.s3.amazonaws.com"),
        "assets-prod"
    );
    assert_eq!(crate::bucket_from_domain("weird.example.com"), "weird.example.com");
}

#[test]
fn test_origin_lookup_by_stage() {
    let config = Config::from_str(BASE).unwrap();
    assert!(config.origin_for_stage("prod").is_some());
    assert!(config.origin_for_stage("staging").is_none());
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_valid_config_passes() {
    let config = Config::from_str(BASE).unwrap();
    validate_config(&config).unwrap();
}

#[test]
fn test_no_origins_rejected() {
    let config = Config::from_str("[[directories]]\nprefix = \"/m/\"\nnamespace = \"m\"").unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::NoOrigins)
    ));
}

#[test]
fn test_origin_without_prefixes_rejected() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://a.s3.amazonaws.com"
"#;
    let config = Config::from_str(raw).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::EmptyInterceptPrefixes { .. })
    ));
}

#[test]
fn test_duplicate_bucket_rejected() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://a.s3.amazonaws.com"
intercept_prefixes = ["/media"]

[[origins]]
stage = "staging"
origin = "s3://a.s3.amazonaws.com"
intercept_prefixes = ["/media"]
"#;
    let config = Config::from_str(raw).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::DuplicateBucket { .. })
    ));
}

#[test]
fn test_unknown_interceptor_rejected() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://a.s3.amazonaws.com"
intercept_prefixes = ["/media"]

[[directories]]
prefix = "/media/"
namespace = "media"
interceptors = ["nope"]
"#;
    let config = Config::from_str(raw).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::UnknownInterceptor { .. })
    ));
}

#[test]
fn test_shadowed_prefix_rejected() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://a.s3.amazonaws.com"
intercept_prefixes = ["/media"]

[[directories]]
prefix = "/img/"
namespace = "img"

[[directories]]
prefix = "/img/thumbs/"
namespace = "thumbs"
"#;
    let config = Config::from_str(raw).unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::ShadowedPrefix { .. })
    ));
}

#[test]
fn test_specific_prefix_before_broad_is_allowed() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://a.s3.amazonaws.com"
intercept_prefixes = ["/media"]

[[directories]]
prefix = "/img/thumbs/"
namespace = "thumbs"

[[directories]]
prefix = "/img/"
namespace = "img"
"#;
    let config = Config::from_str(raw).unwrap();
    validate_config(&config).unwrap();
}
