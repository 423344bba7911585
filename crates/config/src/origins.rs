//! Origin definitions
//!
//! One origin per deployment stage. The bucket identity used for routing is
//! derived from the origin locator the same way the edge derives it from the
//! request's origin domain: strip the scheme and the storage-service suffix.

use serde::Deserialize;

/// S3 domain suffix stripped when deriving the bucket identity
const ORIGIN_DOMAIN_SUFFIX: &str = ".s3.amazonaws.com";

/// One configured origin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OriginConfig {
    /// Deployment stage name (e.g. "prod", "staging")
    pub stage: String,

    /// Origin locator, e.g. `s3://assets-prod.s3.amazonaws.com`
    pub origin: String,

    /// Path prefixes this origin intercepts (joined with every directory
    /// rule to build the intercept index)
    #[serde(default)]
    pub intercept_prefixes: Vec<String>,
}

impl OriginConfig {
    /// Bucket identity: the origin locator with the `s3://` scheme and the
    /// storage domain suffix stripped
    pub fn bucket(&self) -> &str {
        let s = self.origin.strip_prefix("s3://").unwrap_or(&self.origin);
        s.strip_suffix(ORIGIN_DOMAIN_SUFFIX).unwrap_or(s)
    }
}

/// Derive a bucket identity from a request origin domain name
///
/// `assets-prod.s3.amazonaws.com` → `assets-prod`. Domains without the
/// storage suffix come back unchanged; config lookup rejects them.
pub fn bucket_from_domain(domain: &str) -> &str {
    domain.strip_suffix(ORIGIN_DOMAIN_SUFFIX).unwrap_or(domain)
}
