//! Converter error types.
//!
//! Errors are rendered as `{"error": "<Code>", "detail": "<message>"}` with the
//! HTTP status carried by the error.

use std::fmt;

/// Well-known converter error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ConverterErrorCode {
    /// The request body is absent or empty where one is required.
    EmptyBody,
    /// The XML input is not well-formed.
    ParseError,
    /// The tree cannot be rendered as XML.
    SerializeError,
    /// The JSON body or query string has the wrong shape.
    #[default]
    ValidationError,
    /// No route matches the request path.
    NotFound,
    /// The route exists but not for this method.
    MethodNotAllowed,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// Internal server error.
    InternalError,
}

impl ConverterErrorCode {
    /// Returns the error code string used in the `error` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyBody => "EmptyBody",
            Self::ParseError => "ParseError",
            Self::SerializeError => "SerializeError",
            Self::ValidationError => "ValidationError",
            Self::NotFound => "NotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::EmptyBody | Self::ParseError => http::StatusCode::BAD_REQUEST,
            Self::ValidationError => http::StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => http::StatusCode::PAYLOAD_TOO_LARGE,
            Self::SerializeError | Self::InternalError => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ConverterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A converter error response.
#[derive(Debug)]
pub struct ConverterError {
    /// The error code.
    pub code: ConverterErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConverterError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for ConverterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ConverterError {
    /// Create a new `ConverterError` from an error code.
    #[must_use]
    pub fn new(code: ConverterErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `ConverterError` with a custom message.
    #[must_use]
    pub fn with_message(code: ConverterErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// Empty request body.
    #[must_use]
    pub fn empty_body() -> Self {
        Self::with_message(ConverterErrorCode::EmptyBody, "Request body is empty")
    }

    /// Malformed XML input.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::with_message(ConverterErrorCode::ParseError, message)
    }

    /// Tree cannot be serialized to XML.
    #[must_use]
    pub fn serialize_error(message: impl Into<String>) -> Self {
        Self::with_message(ConverterErrorCode::SerializeError, message)
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ConverterErrorCode::ValidationError, message)
    }

    /// No route for the path.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::with_message(ConverterErrorCode::NotFound, format!("Not found: {path}"))
    }

    /// Route exists, method does not.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method, path: &str) -> Self {
        Self::with_message(
            ConverterErrorCode::MethodNotAllowed,
            format!("Method {method} not allowed for {path}"),
        )
    }

    /// Body exceeds the configured limit.
    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self::with_message(
            ConverterErrorCode::PayloadTooLarge,
            format!("Request body exceeds the limit of {limit} bytes"),
        )
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(ConverterErrorCode::InternalError, message)
    }
}
