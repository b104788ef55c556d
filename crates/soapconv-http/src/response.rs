//! Response serialization and error formatting.

use soapconv_model::error::ConverterError;

use crate::body::ConverterResponseBody;

/// Content type for JSON responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for XML responses.
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// Serialize a converter error into a JSON response body.
///
/// ```json
/// {"error": "ParseError", "detail": "malformed XML: ..."}
/// ```
#[must_use]
pub fn error_to_json(error: &ConverterError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "error": error.code.as_str(),
        "detail": error.message,
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Convert a `ConverterError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &ConverterError) -> http::Response<ConverterResponseBody> {
    http::Response::builder()
        .status(error.status_code)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(ConverterResponseBody::from_bytes(error_to_json(error)))
        .expect("valid error response")
}

/// Build a 200 response from JSON bytes.
#[must_use]
pub fn json_response(json: Vec<u8>) -> http::Response<ConverterResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(ConverterResponseBody::from_bytes(json))
        .expect("valid JSON response")
}

/// Build a 200 response from XML bytes.
#[must_use]
pub fn xml_response(xml: Vec<u8>) -> http::Response<ConverterResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE_XML)
        .body(ConverterResponseBody::from_bytes(xml))
        .expect("valid XML response")
}
