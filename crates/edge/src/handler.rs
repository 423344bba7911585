//! Edge request handler
//!
//! The handler owns the static collaborators (config, resolver, store,
//! engine) and runs the full state machine for one event: cache-hit
//! passthrough, request classification, route resolution, chain
//! compilation, origin fetch, adaptive encode, and response shaping.
//! `handle` is infallible by construction; every error path ends in a
//! well-formed response.

use std::sync::Arc;

use tracing::{debug, warn};

use pictor_config::{bucket_from_domain, validate_config, Config};
use pictor_directive::verify_registry;
use pictor_imaging::{ImageEngine, ImageFormat};
use pictor_pipeline::{compile, TransformChain};
use pictor_routing::{InterceptorRegistry, RouteResolver};
use pictor_storage::ObjectStore;

use crate::encode::{adaptive_encode, EncodeOutcome};
use crate::event::{EdgeEvent, EdgeResponse, CACHE_CONTROL_LONG_LIVED};
use crate::fetch::{fetch_first, probe_keys};
use crate::{EdgeError, Result, SetupError};

#[cfg(test)]
#[path = "handler_test.rs"]
mod tests;

/// What rendering produced for a cache-miss request
enum RenderOutcome {
    /// A derived payload to serve
    Rendered {
        bytes: bytes::Bytes,
        format: ImageFormat,
    },

    /// Leave the origin's response untouched (no origin domain on the
    /// request, or the encode collapsed to the stored original)
    Skip,
}

/// Stateless-per-request orchestrator over the static collaborators
pub struct EdgeHandler {
    config: Config,
    resolver: RouteResolver,
    store: Arc<dyn ObjectStore>,
    engine: Arc<dyn ImageEngine>,
}

impl EdgeHandler {
    /// Build a handler, verifying config and registry consistency up front
    ///
    /// # Errors
    /// Returns `SetupError` when the config fails validation, a directory
    /// rule names an unknown interceptor, or the operation registry is
    /// prefix-ambiguous.
    pub fn new(
        config: Config,
        store: Arc<dyn ObjectStore>,
        engine: Arc<dyn ImageEngine>,
    ) -> std::result::Result<Self, SetupError> {
        verify_registry()?;
        validate_config(&config)?;
        let resolver = RouteResolver::new(&config, &InterceptorRegistry::builtin())?;
        Ok(Self {
            config,
            resolver,
            store,
            engine,
        })
    }

    /// Process one event and return the response to serve
    ///
    /// A non-404 origin response is a cache hit and passes through with
    /// CORS and cache-control attached. A 404 triggers rendering; render
    /// failures replace the response body, render skips leave it as the
    /// origin produced it.
    pub async fn handle(&self, event: EdgeEvent) -> EdgeResponse {
        let EdgeEvent {
            request,
            mut response,
        } = event;
        response.add_cors_headers();

        if response.status != 404 {
            response.ensure_header("cache-control", CACHE_CONTROL_LONG_LIVED);
            return response;
        }

        match self.render(&request.uri, request.origin_domain.as_deref()).await {
            Ok(RenderOutcome::Rendered { bytes, format }) => {
                response.update_binary(200, "OK", &bytes, &format.content_type());
                response.set_header("cache-control", CACHE_CONTROL_LONG_LIVED);
            }
            Ok(RenderOutcome::Skip) => {}
            Err(err) => {
                warn!(uri = request.uri.as_str(), error = %err, "render failed");
                response.update(err.status(), err.status_description(), &err.body(), "text/plain");
            }
        }
        response
    }

    /// Run classification, compilation, fetch, and encode for one miss
    async fn render(&self, uri: &str, origin_domain: Option<&str>) -> Result<RenderOutcome> {
        // requests that never passed through a configured origin carry no
        // domain; their 404 is final
        let Some(domain) = origin_domain else {
            return Ok(RenderOutcome::Skip);
        };

        let bucket = bucket_from_domain(domain);
        let origin = self
            .config
            .origin_for_bucket(bucket)
            .ok_or_else(|| EdgeError::InvalidBucket {
                bucket: bucket.to_string(),
            })?;

        let extension = uri.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        let format =
            ImageFormat::from_extension(&extension).ok_or(EdgeError::UnsupportedFormat {
                extension,
            })?;

        let route = self
            .resolver
            .resolve(origin, uri)
            .ok_or_else(|| EdgeError::NoRoute {
                path: uri.to_string(),
            })?;

        let chain = compile(&route, uri, format)?;
        debug!(
            bucket = bucket,
            key = chain.storage_key.as_str(),
            steps = chain.len(),
            "rendering derived asset"
        );

        let source = self.fetch_source(bucket, &chain, format).await?;
        match adaptive_encode(
            self.engine.as_ref(),
            &source,
            &chain,
            format,
            &self.config.encode,
        )
        .await?
        {
            EncodeOutcome::Encoded(bytes) => Ok(RenderOutcome::Rendered { bytes, format }),
            EncodeOutcome::Passthrough => Ok(RenderOutcome::Skip),
        }
    }

    /// Fetch the chain's source object, fanning out for derived formats
    async fn fetch_source(
        &self,
        bucket: &str,
        chain: &TransformChain,
        format: ImageFormat,
    ) -> Result<bytes::Bytes> {
        let keys = if format.is_derived() {
            probe_keys(&chain.storage_key)
        } else {
            vec![chain.storage_key.clone()]
        };

        let object = fetch_first(Arc::clone(&self.store), bucket, keys).await?;
        if object.content_length == 0 {
            return Err(EdgeError::SourceNotFound {
                key: chain.storage_key.clone(),
            });
        }
        Ok(object.body)
    }
}
