//! SOAP converter provider implementing every conversion operation.

use std::sync::Arc;

use soapconv_model::error::ConverterError;
use soapconv_model::input::{OutputFormat, RestConvertInput, RestCustomInput};
use soapconv_model::output::{ConvertSoapOutput, ServiceDescription};
use soapconv_xml::{TreeMap, TreeValue, extract_body, from_xml, to_soap_xml, to_xml_with};
use tracing::debug;

use crate::config::ConverterConfig;
use crate::error::{json_error_to_converter, xml_error_to_converter};

/// The converter provider.
///
/// Stateless apart from its configuration; every call builds a fresh tree from
/// the request body and drops it once the result is produced.
///
/// # Examples
///
/// ```
/// use soapconv_core::SoapConverter;
/// use soapconv_core::config::ConverterConfig;
///
/// let converter = SoapConverter::new(ConverterConfig::default());
/// let xml = converter.handle_convert_rest(br#"{"data": {"City": "Moscow"}}"#).unwrap();
/// assert!(String::from_utf8(xml).unwrap().contains("<City>Moscow</City>"));
/// ```
#[derive(Debug)]
pub struct SoapConverter {
    config: Arc<ConverterConfig>,
}

impl SoapConverter {
    /// Create a new converter with the given configuration.
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the provider configuration.
    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Describe the service and its endpoints.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn describe(&self) -> ServiceDescription {
        ServiceDescription::new(env!("CARGO_PKG_VERSION"))
    }

    /// Convert an XML document to its tree, or re-serialize it as normalized XML.
    pub fn handle_convert_soap(
        &self,
        body: &[u8],
        format: OutputFormat,
    ) -> Result<ConvertSoapOutput, ConverterError> {
        let tree = parse_document(body)?;
        match format {
            OutputFormat::Json => Ok(ConvertSoapOutput::Json(tree)),
            OutputFormat::Xml => {
                let xml = to_xml_with(&tree, self.config.serialize_options())
                    .map_err(xml_error_to_converter)?;
                Ok(ConvertSoapOutput::Xml(xml))
            }
        }
    }

    /// Return the SOAP body content of an XML document, or the whole document
    /// when it is not a SOAP envelope.
    #[allow(clippy::unused_self)]
    pub fn handle_extract(&self, body: &[u8]) -> Result<TreeValue, ConverterError> {
        let tree = parse_document(body)?;
        Ok(extract_body(&tree).clone())
    }

    /// Wrap `{"data": ...}` in a SOAP envelope under the default root element.
    pub fn handle_convert_rest(&self, body: &[u8]) -> Result<Vec<u8>, ConverterError> {
        let input: RestConvertInput =
            serde_json::from_slice(body).map_err(json_error_to_converter)?;
        self.envelope(&self.config.default_root_element, input.data)
    }

    /// Wrap `{"root_element": ..., "data": ...}` in a SOAP envelope.
    pub fn handle_convert_rest_custom(&self, body: &[u8]) -> Result<Vec<u8>, ConverterError> {
        let input: RestCustomInput =
            serde_json::from_slice(body).map_err(json_error_to_converter)?;
        input.validate()?;
        self.envelope(&input.root_element, input.data)
    }

    fn envelope(&self, root_element: &str, data: TreeMap) -> Result<Vec<u8>, ConverterError> {
        debug!(root_element, entries = data.len(), "building SOAP envelope");
        to_soap_xml(root_element, data, self.config.serialize_options())
            .map_err(xml_error_to_converter)
    }
}

fn parse_document(body: &[u8]) -> Result<TreeValue, ConverterError> {
    if body.trim_ascii().is_empty() {
        return Err(ConverterError::empty_body());
    }
    debug!(bytes = body.len(), "parsing XML document");
    from_xml(body).map_err(xml_error_to_converter)
}
