//! Converter request router.
//!
//! Routes are a fixed table of `(method, path)` pairs, one per
//! [`ConverterOperation`]. A trailing slash is ignored, so `/soap/` routes
//! like `/soap`. The `format` query parameter is only read for
//! `POST /soap`.

use soapconv_model::error::ConverterError;
use soapconv_model::input::OutputFormat;
use soapconv_model::operations::ConverterOperation;

/// The result of routing an HTTP request to a converter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingContext {
    /// The identified operation.
    pub operation: ConverterOperation,
    /// Requested output format. Always the default outside `ConvertSoap`.
    pub format: OutputFormat,
}

/// Resolve a converter operation from the request method and URI.
///
/// # Errors
///
/// Returns `NotFound` for an unknown path, `MethodNotAllowed` for a known path
/// with the wrong method, and `ValidationError` for an invalid `format`.
pub fn resolve(method: &http::Method, uri: &http::Uri) -> Result<RoutingContext, ConverterError> {
    let path = normalize_path(uri.path());

    let mut candidates = ConverterOperation::ALL
        .into_iter()
        .filter(|op| op.path() == path)
        .peekable();
    if candidates.peek().is_none() {
        return Err(ConverterError::not_found(uri.path()));
    }

    let operation = candidates
        .find(|op| op.method() == method)
        .ok_or_else(|| ConverterError::method_not_allowed(method, path))?;

    let format = match operation {
        ConverterOperation::ConvertSoap => parse_format(uri.query())?,
        _ => OutputFormat::default(),
    };

    Ok(RoutingContext { operation, format })
}

/// Strip a trailing slash, keeping the root path intact.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Read the `format` query parameter. The last occurrence wins.
fn parse_format(query: Option<&str>) -> Result<OutputFormat, ConverterError> {
    let Some(query) = query else {
        return Ok(OutputFormat::default());
    };

    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "format")
        .last()
        .map_or(Ok(OutputFormat::default()), |(_, value)| value.parse())
}
