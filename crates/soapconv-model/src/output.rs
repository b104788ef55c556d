//! Operation output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use soapconv_xml::TreeValue;

use crate::operations::ConverterOperation;

/// Output of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescription {
    /// Service name.
    pub message: String,
    /// Service version.
    pub version: String,
    /// Request path mapped to a one-line description.
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceDescription {
    /// Describe every operation, plus the health endpoint.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        let mut endpoints: BTreeMap<String, String> = ConverterOperation::ALL
            .iter()
            .map(|op| (op.path().to_owned(), op.description().to_owned()))
            .collect();
        endpoints.insert("/health".to_owned(), "Health check".to_owned());

        Self {
            message: "SOAP Converter".to_owned(),
            version: version.into(),
            endpoints,
        }
    }
}

/// Output of `POST /soap`, in the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertSoapOutput {
    /// The parsed tree, rendered as JSON by the caller.
    Json(TreeValue),
    /// The re-serialized XML document.
    Xml(Vec<u8>),
}
