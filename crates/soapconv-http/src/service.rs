//! The converter HTTP service implementing hyper's `Service` trait.
//!
//! [`ConverterHttpService`] handles, in order:
//!
//! 1. Health check interception (`GET /health`, `GET /_health`)
//! 2. CORS preflight requests (`OPTIONS`)
//! 3. Routing via [`router::resolve`](crate::router::resolve)
//! 4. Body collection, bounded by `max_body_size`
//! 5. Operation dispatch to the [`ConverterHandler`]
//! 6. Common response headers (`x-request-id`, `server`, CORS)

use std::convert::Infallible;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use tracing::{debug, info, warn};
use uuid::Uuid;

use soapconv_model::error::ConverterError;

use crate::body::ConverterResponseBody;
use crate::dispatch::{ConverterHandler, dispatch_operation};
use crate::response::{CONTENT_TYPE_JSON, error_to_response};
use crate::router::{self, normalize_path};

/// Default request body limit: 10 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

const HEALTH_BODY: &str = r#"{"status":"running","service":"soapconv"}"#;

/// Configuration for the converter HTTP service.
#[derive(Debug, Clone)]
pub struct ConverterHttpConfig {
    /// Largest accepted request body in bytes.
    pub max_body_size: usize,
}

impl Default for ConverterHttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Hyper `Service` implementation for the converter.
#[derive(Debug)]
pub struct ConverterHttpService<H: ConverterHandler> {
    handler: Arc<H>,
    config: Arc<ConverterHttpConfig>,
}

impl<H: ConverterHandler> ConverterHttpService<H> {
    /// Create a new `ConverterHttpService`.
    pub fn new(handler: Arc<H>, config: ConverterHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: ConverterHandler> Clone for ConverterHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: ConverterHandler> hyper::service::Service<http::Request<Incoming>>
    for ConverterHttpService<H>
{
    type Response = http::Response<ConverterResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, handler.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single request through the converter pipeline.
async fn process_request<B, H>(
    req: http::Request<B>,
    handler: &H,
    config: &ConverterHttpConfig,
    request_id: &str,
) -> http::Response<ConverterResponseBody>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
    H: ConverterHandler,
{
    let (parts, incoming) = req.into_parts();
    debug!(method = %parts.method, uri = %parts.uri, request_id, "processing request");

    // 1. Health check interception.
    if is_health_check(&parts.method, parts.uri.path()) {
        return health_check_response();
    }

    // 2. CORS preflight.
    if parts.method == http::Method::OPTIONS {
        return cors_preflight_response();
    }

    // 3. Route.
    let ctx = match router::resolve(&parts.method, &parts.uri) {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!(
                method = %parts.method, uri = %parts.uri, error = %err, request_id,
                "failed to route request"
            );
            return error_to_response(&err);
        }
    };
    info!(operation = %ctx.operation, request_id, "routed request");

    // 4. Collect body.
    let body = match collect_body(incoming, config.max_body_size).await {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, request_id, "failed to collect request body");
            return error_to_response(&err);
        }
    };

    // 5. Dispatch to handler.
    match dispatch_operation(handler, ctx, body).await {
        Ok(response) => response,
        Err(err) => {
            debug!(
                operation = %ctx.operation, error = %err, request_id,
                "operation returned error"
            );
            error_to_response(&err)
        }
    }
}

/// Collect the body into a single buffer, failing once it exceeds `limit`.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, ConverterError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ConverterError::payload_too_large(limit))
        }
        Err(err) => Err(ConverterError::internal_error(format!(
            "Failed to read request body: {err}"
        ))),
    }
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && matches!(normalize_path(path), "/health" | "/_health")
}

/// Produce a health check response.
fn health_check_response() -> http::Response<ConverterResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(ConverterResponseBody::from_static(HEALTH_BODY))
        .expect("static health response should be valid")
}

/// Produce a CORS preflight response.
fn cors_preflight_response() -> http::Response<ConverterResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("access-control-allow-methods", "GET, POST, OPTIONS")
        .header("access-control-allow-headers", "*, Content-Type")
        .header("access-control-max-age", "86400")
        .body(ConverterResponseBody::empty())
        .expect("static CORS response should be valid")
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<ConverterResponseBody>,
    request_id: &str,
) -> http::Response<ConverterResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }

    headers.insert("server", http::HeaderValue::from_static("soapconv"));

    headers.insert(
        "access-control-allow-origin",
        http::HeaderValue::from_static("*"),
    );
    headers.insert(
        "access-control-expose-headers",
        http::HeaderValue::from_static("x-request-id"),
    );

    response
}
