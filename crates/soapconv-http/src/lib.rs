//! HTTP service layer for the SOAP converter.
//!
//! - **Router**: maps method and path to a [`ConverterOperation`](soapconv_model::ConverterOperation)
//! - **Handler trait**: the boundary between HTTP and the conversion logic
//! - **Service**: hyper `Service` with health checks, CORS and body limits
//! - **Response helpers**: JSON/XML success and error response formatting

pub mod body;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::ConverterResponseBody;
pub use dispatch::{ConverterHandler, HandlerFuture, NotImplementedHandler};
pub use router::RoutingContext;
pub use service::{ConverterHttpConfig, ConverterHttpService};
