//! SOAP 1.1 envelope helpers.

use crate::error::XmlError;
use crate::serialize::{SerializeOptions, to_xml_with};
use crate::tree::{TreeMap, TreeValue};

/// The SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Body element name used when the caller does not pick one.
pub const DEFAULT_ROOT_ELEMENT: &str = "Request";

const ENVELOPE_KEYS: [&str; 2] = ["soap:Envelope", "Envelope"];
const BODY_KEYS: [&str; 2] = ["soap:Body", "Body"];

/// Wrap `data` in a minimal SOAP envelope.
///
/// ```text
/// {"soap:Envelope": {
///     "@xmlns:soap": "http://schemas.xmlsoap.org/soap/envelope/",
///     "soap:Body": {<root_element>: <data>}
/// }}
/// ```
#[must_use]
pub fn build_envelope(root_element: &str, data: TreeMap) -> TreeValue {
    let body = TreeValue::single(root_element, TreeValue::Object(data));

    let mut envelope = TreeMap::with_capacity(2);
    envelope.insert(
        "@xmlns:soap".to_owned(),
        TreeValue::leaf(SOAP_ENVELOPE_NAMESPACE),
    );
    envelope.insert("soap:Body".to_owned(), body);

    TreeValue::single("soap:Envelope", TreeValue::Object(envelope))
}

/// Wrap `data` in a SOAP envelope and serialize it.
///
/// # Errors
///
/// Returns `XmlError` if `root_element` or any key in `data` has no XML
/// representation.
pub fn to_soap_xml(
    root_element: &str,
    data: TreeMap,
    options: SerializeOptions,
) -> Result<Vec<u8>, XmlError> {
    to_xml_with(&build_envelope(root_element, data), options)
}

/// Return the SOAP body content of a parsed document.
///
/// Looks up `soap:Envelope` (then `Envelope`) and inside it `soap:Body` (then
/// `Body`). This never fails: when the document is not a SOAP envelope, or
/// its body is missing or empty, the whole document is returned unchanged.
#[must_use]
pub fn extract_body(document: &TreeValue) -> &TreeValue {
    let Some(envelope) = lookup(document, &ENVELOPE_KEYS) else {
        tracing::debug!("no SOAP envelope found, returning whole document");
        return document;
    };

    match lookup(envelope, &BODY_KEYS) {
        Some(body) if !body.is_empty() => body,
        _ => {
            tracing::debug!("SOAP envelope has no body content, returning whole document");
            document
        }
    }
}

fn lookup<'a>(value: &'a TreeValue, keys: &[&str]) -> Option<&'a TreeValue> {
    keys.iter().find_map(|key| value.get(key))
}
