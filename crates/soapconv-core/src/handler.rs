//! Handler implementation bridging HTTP to the converter.

use std::sync::Arc;

use bytes::Bytes;

use soapconv_http::body::ConverterResponseBody;
use soapconv_http::dispatch::{ConverterHandler, HandlerFuture};
use soapconv_http::response::{json_response, xml_response};
use soapconv_http::router::RoutingContext;
use soapconv_model::error::ConverterError;
use soapconv_model::operations::ConverterOperation;
use soapconv_model::output::ConvertSoapOutput;

use crate::provider::SoapConverter;

/// Handler that bridges the HTTP layer to the converter provider.
#[derive(Debug)]
pub struct SoapConverterHandler {
    provider: Arc<SoapConverter>,
}

impl SoapConverterHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<SoapConverter>) -> Self {
        Self { provider }
    }
}

impl ConverterHandler for SoapConverterHandler {
    fn handle_operation(&self, ctx: RoutingContext, body: Bytes) -> HandlerFuture {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { dispatch(provider.as_ref(), ctx, &body) })
    }
}

/// Dispatch an operation to the matching provider method.
fn dispatch(
    provider: &SoapConverter,
    ctx: RoutingContext,
    body: &[u8],
) -> Result<http::Response<ConverterResponseBody>, ConverterError> {
    match ctx.operation {
        ConverterOperation::Describe => serialize(&provider.describe()),
        ConverterOperation::ConvertSoap => match provider.handle_convert_soap(body, ctx.format)? {
            ConvertSoapOutput::Json(tree) => serialize(&tree),
            ConvertSoapOutput::Xml(xml) => Ok(xml_response(xml)),
        },
        ConverterOperation::ExtractSoapBody => serialize(&provider.handle_extract(body)?),
        ConverterOperation::ConvertRest => Ok(xml_response(provider.handle_convert_rest(body)?)),
        ConverterOperation::ConvertRestCustom => {
            Ok(xml_response(provider.handle_convert_rest_custom(body)?))
        }
    }
}

/// Serialize an output value into a JSON HTTP response.
fn serialize<T: serde::Serialize>(
    output: &T,
) -> Result<http::Response<ConverterResponseBody>, ConverterError> {
    let json = serde_json::to_vec(output).map_err(|e| {
        ConverterError::internal_error(format!("Failed to serialize response: {e}"))
    })?;
    Ok(json_response(json))
}
