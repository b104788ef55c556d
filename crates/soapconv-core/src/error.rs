//! Mapping codec errors onto converter errors.

use soapconv_model::error::ConverterError;
use soapconv_xml::XmlError;

/// Convert an XML codec error into a converter error.
///
/// Errors raised while reading input become `ParseError` (400); errors raised
/// while rendering a tree become `SerializeError` (500).
#[must_use]
pub fn xml_error_to_converter(e: XmlError) -> ConverterError {
    let message = e.to_string();
    if e.is_parse_error() {
        ConverterError::parse_error(message).with_source(e)
    } else {
        ConverterError::serialize_error(message).with_source(e)
    }
}

/// Convert a JSON decoding error into a validation error.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn json_error_to_converter(e: serde_json::Error) -> ConverterError {
    ConverterError::validation(format!("Invalid request body: {e}"))
}
