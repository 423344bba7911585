//! Edge event envelope
//!
//! The transport hands the handler a request/response pair: the request as
//! the client sent it, and the response the origin produced (a 404 when the
//! derived asset is not cached yet). The handler mutates the response in
//! place and hands it back; header keys are kept lowercase throughout.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;

/// Cache lifetime attached to every cacheable response
pub const CACHE_CONTROL_LONG_LIVED: &str = "max-age=31536000";

/// Wildcard CORS headers attached to every response
pub const CORS_ALLOW_ALL: &[(&str, &str)] = &[
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "*"),
    ("access-control-allow-headers", "*"),
];

/// How a response body is encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// Plain text body
    Text,
    /// Base64-encoded binary body
    Base64,
}

/// The client request as seen at the edge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRequest {
    /// Request path, percent-encoded as received
    pub uri: String,

    /// Domain name of the origin the request was routed to
    pub origin_domain: Option<String>,
}

/// The response being shaped for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeResponse {
    /// HTTP status code
    pub status: u16,

    /// Status reason phrase
    pub status_description: String,

    /// Response headers, lowercase keys
    pub headers: BTreeMap<String, String>,

    /// Response body, if any
    pub body: Option<String>,

    /// Encoding of `body`
    pub body_encoding: Option<BodyEncoding>,
}

impl Default for EdgeResponse {
    fn default() -> Self {
        Self {
            status: 200,
            status_description: "OK".to_string(),
            headers: BTreeMap::new(),
            body: None,
            body_encoding: None,
        }
    }
}

impl EdgeResponse {
    /// A 404 response as the origin produces it for a missing object
    pub fn not_found() -> Self {
        Self {
            status: 404,
            status_description: "Not Found".to_string(),
            ..Self::default()
        }
    }

    /// Read a header by its lowercase name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Set a header, replacing any existing value
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Set a header only if it is not already present
    pub fn ensure_header(&mut self, name: &str, value: &str) {
        self.headers
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    /// Attach the wildcard CORS headers
    pub fn add_cors_headers(&mut self) {
        for (name, value) in CORS_ALLOW_ALL {
            self.set_header(name, value);
        }
    }

    /// Replace status and body with a text payload
    pub fn update(&mut self, status: u16, description: &str, body: &str, content_type: &str) {
        self.status = status;
        self.status_description = description.to_string();
        self.body = Some(body.to_string());
        self.body_encoding = Some(BodyEncoding::Text);
        self.set_header("content-type", content_type);
    }

    /// Replace status and body with a binary payload, base64-encoded for
    /// the transport
    pub fn update_binary(&mut self, status: u16, description: &str, body: &Bytes, content_type: &str) {
        self.status = status;
        self.status_description = description.to_string();
        self.body = Some(BASE64.encode(body));
        self.body_encoding = Some(BodyEncoding::Base64);
        self.set_header("content-type", content_type);
    }
}

/// One request/response pair delivered to the handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEvent {
    /// The client request
    pub request: EdgeRequest,

    /// The origin's response, mutated in place by the handler
    pub response: EdgeResponse,
}

impl EdgeEvent {
    /// Pair a request with the origin's response
    pub fn new(request: EdgeRequest, response: EdgeResponse) -> Self {
        Self { request, response }
    }
}
