//! Pictor - Edge
//!
//! Per-request coordinator in front of the origin store. A request arrives
//! as a transport event carrying the request URI and the origin's response;
//! when the origin missed (404), the handler compiles the URI's directive
//! segment into a transform chain, fetches the source object (fanning out
//! across alternate formats for derived targets), drives the adaptive
//! encode loop, and produces exactly one well-formed response.
//!
//! # State machine
//!
//! ```text
//! cache hit ──────────────────────────→ pass through (+ cache-control)
//! miss, bad bucket / bad extension ───→ client error
//! miss, directive does not compile ───→ not found
//! miss, valid chain ──→ fetch ──→ encode ──→ 200 (content-type + cache-control)
//!                        │           └─ abort ──→ pass through / not found
//!                        └─ missing ──→ not found
//! ```
//!
//! Nothing escapes the handler as a fault: every failure is converted to a
//! response at this boundary.

mod encode;
mod error;
mod event;
mod fetch;
mod handler;

pub use encode::{adaptive_encode, passthrough_heuristic, EncodeOutcome};
pub use error::{EdgeError, Result, SetupError};
pub use event::{
    BodyEncoding, EdgeEvent, EdgeRequest, EdgeResponse, CACHE_CONTROL_LONG_LIVED, CORS_ALLOW_ALL,
};
pub use fetch::{fetch_first, probe_keys, PROBE_FORMATS};
pub use handler::EdgeHandler;
