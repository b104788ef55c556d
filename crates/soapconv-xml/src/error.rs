//! Error type for the XML codec.

use std::io;

/// Errors that can occur while parsing or serializing XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document is not valid UTF-8.
    #[error("invalid UTF-8 in XML document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document contains no content at all.
    #[error("XML document is empty")]
    EmptyDocument,

    /// The document is not well-formed.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The tree has a shape that cannot be rendered as XML.
    #[error("tree cannot be rendered as XML: {0}")]
    InvalidTree(String),

    /// A key is not usable as an XML element or attribute name.
    #[error("invalid XML name: {0:?}")]
    InvalidName(String),
}

impl XmlError {
    /// Returns `true` if the error was raised while reading XML input.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::QuickXml(_)
                | Self::Attribute(_)
                | Self::Utf8(_)
                | Self::EmptyDocument
                | Self::Malformed(_)
        )
    }
}
