//! Tests for the route resolver and its per-bucket index cache

use std::str::FromStr;

use pictor_config::Config;

use crate::{InterceptorRegistry, RouteResolver};

fn config(raw: &str) -> Config {
    Config::from_str(raw).unwrap()
}

fn resolver(config: &Config) -> RouteResolver {
    RouteResolver::new(config, &InterceptorRegistry::builtin()).unwrap()
}

const TWO_DIRECTORIES: &str = r#"
[[origins]]
stage = "prod"
origin = "s3://assets.s3.amazonaws.com"
intercept_prefixes = ["/"]

[[directories]]
prefix = "/media/"
namespace = "media"
interceptors = ["dimension_shorthand", "quality_shorthand"]

[[directories]]
prefix = "/catalog/"
namespace = "catalog"
"#;

#[test]
fn test_resolve_matching_prefix() {
    let config = config(TWO_DIRECTORIES);
    let resolver = resolver(&config);
    let origin = config.origin_for_bucket("assets").unwrap();

    let matched = resolver.resolve(origin, "/media/w:100/photo.jpg").unwrap();
    assert_eq!(matched.matched_prefix, "/media/");
    assert_eq!(matched.rule.namespace, "media");
    assert_eq!(matched.rule.interceptors.len(), 2);

    let matched = resolver.resolve(origin, "/catalog/original/a.png").unwrap();
    assert_eq!(matched.rule.namespace, "catalog");
    assert!(matched.rule.interceptors.is_empty());
}

#[test]
fn test_resolve_unmatched_path_is_none() {
    let config = config(TWO_DIRECTORIES);
    let resolver = resolver(&config);
    let origin = config.origin_for_bucket("assets").unwrap();

    assert!(resolver.resolve(origin, "/uploads/photo.jpg").is_none());
}

#[test]
fn test_index_is_prefix_cross_product() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://assets.s3.amazonaws.com"
intercept_prefixes = ["/", "/legacy"]

[[directories]]
prefix = "/media/"
namespace = "media"

[[directories]]
prefix = "/catalog/"
namespace = "catalog"
"#;
    let config = config(raw);
    let resolver = resolver(&config);
    let origin = config.origin_for_bucket("assets").unwrap();

    assert_eq!(resolver.index_len(origin), 4);

    // joined prefixes match under both intercept roots
    let matched = resolver.resolve(origin, "/legacy/media/x.jpg").unwrap();
    assert_eq!(matched.matched_prefix, "/legacy/media/");
    let matched = resolver.resolve(origin, "/media/x.jpg").unwrap();
    assert_eq!(matched.matched_prefix, "/media/");
}

#[test]
fn test_first_match_wins_in_configuration_order() {
    // both joined prefixes match the path; the earlier directory wins
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://assets.s3.amazonaws.com"
intercept_prefixes = ["/"]

[[directories]]
prefix = "/media/thumbs/"
namespace = "thumbs"

[[directories]]
prefix = "/media/"
namespace = "media"
"#;
    let config = config(raw);
    let resolver = resolver(&config);
    let origin = config.origin_for_bucket("assets").unwrap();

    let matched = resolver
        .resolve(origin, "/media/thumbs/w:50/photo.jpg")
        .unwrap();
    assert_eq!(matched.rule.namespace, "thumbs");

    let matched = resolver.resolve(origin, "/media/w:50/photo.jpg").unwrap();
    assert_eq!(matched.rule.namespace, "media");
}

#[test]
fn test_index_cached_per_bucket() {
    let config = config(TWO_DIRECTORIES);
    let resolver = resolver(&config);
    let origin = config.origin_for_bucket("assets").unwrap();

    // repeated resolution reuses the same built index
    assert_eq!(resolver.index_len(origin), 2);
    assert_eq!(resolver.index_len(origin), 2);
    assert!(resolver.resolve(origin, "/media/original/a.jpg").is_some());
}

#[test]
fn test_unknown_interceptor_fails_construction() {
    let raw = r#"
[[origins]]
stage = "prod"
origin = "s3://assets.s3.amazonaws.com"
intercept_prefixes = ["/"]

[[directories]]
prefix = "/media/"
namespace = "media"
"#;
    let mut config = config(raw);
    config.directories[0].interceptors = vec!["missing".to_string()];
    assert!(RouteResolver::new(&config, &InterceptorRegistry::builtin()).is_err());
}
