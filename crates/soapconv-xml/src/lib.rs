//! XML <-> tree codec for soapconv.
//!
//! This crate converts between serialized XML documents and [`TreeValue`], a
//! generic ordered tree that maps one-to-one onto JSON. It also knows the two
//! SOAP 1.1 envelope conventions the service relies on: wrapping a payload in
//! `soap:Envelope`/`soap:Body`, and digging the payload back out.
//!
//! # Key components
//!
//! - [`from_xml`] parses an XML document into a [`TreeValue`]
//! - [`to_xml`] / [`to_xml_with`] render a [`TreeValue`] back to XML
//! - [`build_envelope`] / [`to_soap_xml`] wrap a payload in a SOAP envelope
//! - [`extract_body`] returns the SOAP body content of a parsed document
//!
//! # Tree conventions
//!
//! - Attributes are stored under keys prefixed with `@` (`@xmlns:soap`)
//! - Text mixed with attributes or child elements lives under `#text`
//! - Repeated sibling elements collapse into an array; a single occurrence
//!   is stored unwrapped
//! - Empty elements are stored as an empty leaf (`""`)

pub mod deserialize;
pub mod envelope;
pub mod error;
pub mod serialize;
pub mod tree;

pub use deserialize::from_xml;
pub use envelope::{
    DEFAULT_ROOT_ELEMENT, SOAP_ENVELOPE_NAMESPACE, build_envelope, extract_body, to_soap_xml,
};
pub use error::XmlError;
pub use serialize::{SerializeOptions, to_xml, to_xml_with};
pub use tree::{ATTRIBUTE_PREFIX, TEXT_KEY, TreeMap, TreeValue};
