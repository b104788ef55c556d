//! Converter operation enum.

use std::fmt;

/// All operations exposed by the converter service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterOperation {
    /// Describe the service and its endpoints.
    Describe,
    /// Convert a SOAP/XML document to JSON (or normalized XML).
    ConvertSoap,
    /// Extract the body of a SOAP envelope as JSON.
    ExtractSoapBody,
    /// Wrap JSON data in a SOAP envelope with the default root element.
    ConvertRest,
    /// Wrap JSON data in a SOAP envelope with a caller-chosen root element.
    ConvertRestCustom,
}

impl ConverterOperation {
    /// Every operation, in the order they are described.
    pub const ALL: [Self; 5] = [
        Self::Describe,
        Self::ConvertSoap,
        Self::ExtractSoapBody,
        Self::ConvertRest,
        Self::ConvertRestCustom,
    ];

    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Describe => "Describe",
            Self::ConvertSoap => "ConvertSoap",
            Self::ExtractSoapBody => "ExtractSoapBody",
            Self::ConvertRest => "ConvertRest",
            Self::ConvertRestCustom => "ConvertRestCustom",
        }
    }

    /// The HTTP method the operation is served on.
    #[must_use]
    pub fn method(&self) -> http::Method {
        match self {
            Self::Describe => http::Method::GET,
            _ => http::Method::POST,
        }
    }

    /// The request path the operation is served on.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Describe => "/",
            Self::ConvertSoap => "/soap",
            Self::ExtractSoapBody => "/soap/extract",
            Self::ConvertRest => "/rest",
            Self::ConvertRestCustom => "/rest/custom",
        }
    }

    /// One-line description used by the service description endpoint.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Describe => "Service description",
            Self::ConvertSoap => "Convert SOAP/XML to JSON, or to normalized XML with format=xml",
            Self::ExtractSoapBody => "Extract the SOAP Body contents as JSON",
            Self::ConvertRest => "Convert JSON {\"data\": ...} to a SOAP request",
            Self::ConvertRestCustom => {
                "Convert JSON {\"root_element\": ..., \"data\": ...} to a SOAP request"
            }
        }
    }
}

impl fmt::Display for ConverterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
