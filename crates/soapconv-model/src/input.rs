//! Request input types.
//!
//! JSON bodies use `snake_case` field names. `data` decodes straight into the
//! converter's tree, so JSON scalars arrive as element text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soapconv_xml::{TreeMap, TreeValue};

use crate::error::ConverterError;

/// Output representation requested with the `format` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The parsed tree as JSON.
    #[default]
    Json,
    /// The parsed tree re-serialized as pretty-printed XML.
    Xml,
}

impl OutputFormat {
    /// Returns the query parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(ConverterError::validation(format!(
                "Invalid format {other:?}, expected \"json\" or \"xml\""
            ))),
        }
    }
}

/// Input for `POST /rest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConvertInput {
    /// The payload placed inside the body element.
    #[serde(default = "sample_data")]
    pub data: TreeMap,
}

impl Default for RestConvertInput {
    fn default() -> Self {
        Self {
            data: sample_data(),
        }
    }
}

/// The documented sample payload, used when `data` is omitted.
#[must_use]
pub fn sample_data() -> TreeMap {
    let mut data = TreeMap::with_capacity(2);
    data.insert("city".to_owned(), TreeValue::leaf("Moscow"));
    data.insert("temperature".to_owned(), TreeValue::leaf("20"));
    data
}

/// Input for `POST /rest/custom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestCustomInput {
    /// Name of the element wrapping `data` inside the SOAP body.
    pub root_element: String,
    /// The payload placed inside the body element.
    pub data: TreeMap,
}

impl RestCustomInput {
    /// Check the fields serde cannot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `root_element` is blank.
    pub fn validate(&self) -> Result<(), ConverterError> {
        if self.root_element.trim().is_empty() {
            return Err(ConverterError::validation("root_element must not be empty"));
        }
        Ok(())
    }
}
