//! Converter handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use soapconv_model::error::ConverterError;

use crate::body::ConverterResponseBody;
use crate::router::RoutingContext;

/// Future returned by [`ConverterHandler::handle_operation`].
pub type HandlerFuture = Pin<
    Box<dyn Future<Output = Result<http::Response<ConverterResponseBody>, ConverterError>> + Send>,
>;

/// Trait that the conversion logic must implement.
///
/// The handler receives the routed operation and the raw request body, and
/// returns a complete HTTP response. Common headers are added by the service.
pub trait ConverterHandler: Send + Sync + 'static {
    /// Handle a converter operation and produce an HTTP response.
    fn handle_operation(&self, ctx: RoutingContext, body: Bytes) -> HandlerFuture;
}

/// Dispatch a converter operation to the handler.
pub async fn dispatch_operation<H: ConverterHandler>(
    handler: &H,
    ctx: RoutingContext,
    body: Bytes,
) -> Result<http::Response<ConverterResponseBody>, ConverterError> {
    tracing::debug!(operation = %ctx.operation, format = %ctx.format, "dispatching operation");
    handler.handle_operation(ctx, body).await
}

/// Default handler that returns an error for all operations.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl ConverterHandler for NotImplementedHandler {
    fn handle_operation(&self, ctx: RoutingContext, _body: Bytes) -> HandlerFuture {
        Box::pin(async move {
            Err(ConverterError::internal_error(format!(
                "Operation {} is not implemented",
                ctx.operation
            )))
        })
    }
}
