//! XML serialization: rendering a [`TreeValue`] as an XML document.
//!
//! This is the mirror of [`crate::deserialize`]:
//!
//! - `@`-prefixed entries become attributes of the enclosing element
//! - the `#text` entry becomes the element's text content
//! - array entries become repeated sibling elements with the same tag
//! - every other entry becomes a single child element
//! - an empty leaf becomes a self-closing element
//!
//! Indentation only affects readability; the output re-parses to the same tree.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::XmlError;
use crate::tree::{ATTRIBUTE_PREFIX, TEXT_KEY, TreeMap, TreeValue};

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Indentation width in spaces; `None` writes the document on one line.
    pub indent: Option<usize>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { indent: Some(2) }
    }
}

impl SerializeOptions {
    /// Options producing a single-line document.
    #[must_use]
    pub fn compact() -> Self {
        Self { indent: None }
    }
}

/// Serialize a tree as a pretty-printed XML document.
///
/// # Errors
///
/// Returns `XmlError` if the tree has no XML representation.
pub fn to_xml(tree: &TreeValue) -> Result<Vec<u8>, XmlError> {
    to_xml_with(tree, SerializeOptions::default())
}

/// Serialize a tree as an XML document using the given options.
///
/// The tree must be an object with exactly one element entry, the document
/// root.
///
/// # Errors
///
/// Returns `XmlError` if the tree has no XML representation.
pub fn to_xml_with(tree: &TreeValue, options: SerializeOptions) -> Result<Vec<u8>, XmlError> {
    let (name, value) = document_root(tree)?;

    let mut buf = Vec::with_capacity(512);
    match options.indent {
        Some(width) => {
            let mut writer = Writer::new_with_indent(&mut buf, b' ', width);
            write_document(&mut writer, name, value)?;
        }
        None => write_document(&mut Writer::new(&mut buf), name, value)?,
    }

    Ok(buf)
}

fn document_root(tree: &TreeValue) -> Result<(&str, &TreeValue), XmlError> {
    let TreeValue::Object(map) = tree else {
        return Err(XmlError::InvalidTree(
            "a document must be an object holding the root element".to_owned(),
        ));
    };

    let mut entries = map.iter();
    let (Some((name, value)), None) = (entries.next(), entries.next()) else {
        return Err(XmlError::InvalidTree(format!(
            "a document must have exactly one root element, found {} entries",
            map.len()
        )));
    };

    if name.starts_with(ATTRIBUTE_PREFIX) || name == TEXT_KEY {
        return Err(XmlError::InvalidTree(format!(
            "the document root must be an element, found {name:?}"
        )));
    }
    if matches!(value, TreeValue::Array(_)) {
        return Err(XmlError::InvalidTree(format!(
            "a document must have exactly one root element, <{name}> is repeated"
        )));
    }

    Ok((name, value))
}

fn write_document<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &TreeValue,
) -> Result<(), XmlError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(writer, name, value)
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &TreeValue,
) -> Result<(), XmlError> {
    validate_name(name)?;
    match value {
        TreeValue::Leaf(text) => write_leaf(writer, name, text),
        TreeValue::Object(map) => write_object(writer, name, map),
        TreeValue::Array(_) => Err(XmlError::InvalidTree(format!(
            "nested array under <{name}> has no XML representation"
        ))),
    }
}

fn write_leaf<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), XmlError> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_object<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    map: &TreeMap,
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(name);
    let mut text: Option<&str> = None;
    let mut children = Vec::with_capacity(map.len());

    for (key, value) in map {
        if let Some(attr) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            validate_name(attr)?;
            let TreeValue::Leaf(attr_value) = value else {
                return Err(XmlError::InvalidTree(format!(
                    "attribute {key:?} of <{name}> must hold text"
                )));
            };
            start.push_attribute((attr, attr_value.as_str()));
        } else if key == TEXT_KEY {
            let TreeValue::Leaf(content) = value else {
                return Err(XmlError::InvalidTree(format!(
                    "{TEXT_KEY:?} of <{name}> must hold text"
                )));
            };
            text = Some(content.as_str()).filter(|t| !t.is_empty());
        } else {
            children.push((key.as_str(), value));
        }
    }

    if text.is_none() && children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(content) = text {
        writer.write_event(Event::Text(BytesText::new(content)))?;
    }
    for (key, value) in children {
        match value {
            TreeValue::Array(items) => {
                for item in items {
                    write_element(writer, key, item)?;
                }
            }
            _ => write_element(writer, key, value)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn validate_name(name: &str) -> Result<(), XmlError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_owned()))
    }
}

/// A practical subset of the XML `Name` production.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deserialize::from_xml;

    fn render(tree: &TreeValue) -> String {
        let xml =
            to_xml_with(tree, SerializeOptions::compact()).expect("serialization should succeed");
        String::from_utf8(xml).expect("valid UTF-8")
    }

    fn parse_json(json: &str) -> TreeValue {
        serde_json::from_str(json).expect("valid JSON")
    }

    #[test]
    fn test_should_write_declaration_and_root() {
        let xml = render(&TreeValue::single("Foo", "1".into()));
        assert_eq!(xml, r#"<?xml version="1.0" encoding="UTF-8"?><Foo>1</Foo>"#);
    }

    #[test]
    fn test_should_write_attributes_text_and_children() {
        let tree = parse_json(r##"{"book": {"@id": "7", "#text": "intro", "title": "Rust"}}"##);
        let xml = render(&tree);
        assert!(
            xml.contains(r#"<book id="7">intro<title>Rust</title></book>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_should_write_arrays_as_repeated_siblings() {
        let tree = parse_json(r#"{"list": {"item": ["a", "b", {"@n": "3"}]}}"#);
        let xml = render(&tree);
        assert!(
            xml.contains(r#"<list><item>a</item><item>b</item><item n="3"/></list>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_should_write_empty_leaf_as_self_closing() {
        let xml = render(&parse_json(r#"{"r": {"a": null, "b": ""}}"#));
        assert!(xml.contains("<r><a/><b/></r>"), "{xml}");
    }

    #[test]
    fn test_should_escape_text_and_attributes() {
        let xml = render(&parse_json(r##"{"m": {"@q": "a\"b", "#text": "1 < 2 & 3"}}"##));
        assert!(xml.contains("1 &lt; 2 &amp; 3"), "{xml}");
        assert!(xml.contains("q=\"a&quot;b\""), "{xml}");
    }

    #[test]
    fn test_should_indent_when_pretty_printing() {
        let tree = parse_json(r#"{"r": {"a": "1", "b": "2"}}"#);
        let xml = String::from_utf8(to_xml(&tree).unwrap()).unwrap();
        assert!(xml.contains("\n  <a>1</a>\n  <b>2</b>\n</r>"), "{xml}");
    }

    #[test]
    fn test_should_round_trip_parsed_documents() {
        let documents = [
            "<a>1</a>",
            r#"<r x="1"><b>t</b><b>u</b><c/><d y="2">text</d></r>"#,
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><m:Get xmlns:m="urn:x"><m:Id>5</m:Id></m:Get></soap:Body></soap:Envelope>"#,
            "<p>hello <b>world</b> again</p>",
            "<r><a><b>1</b><b>2</b></a><a><b>3</b></a></r>",
            "<t>a &amp; b &lt; c</t>",
        ];
        for doc in documents {
            let parsed = from_xml(doc.as_bytes()).unwrap();
            for options in [SerializeOptions::default(), SerializeOptions::compact()] {
                let xml = to_xml_with(&parsed, options).unwrap();
                let reparsed = from_xml(&xml).unwrap();
                assert_eq!(reparsed, parsed, "round trip failed for {doc}");
            }
        }
    }

    #[test]
    fn test_should_reject_non_object_document() {
        let err = to_xml(&TreeValue::leaf("x")).unwrap_err();
        assert!(matches!(err, XmlError::InvalidTree(_)));
    }

    #[test]
    fn test_should_reject_multiple_roots() {
        assert!(to_xml(&parse_json(r#"{"a": "1", "b": "2"}"#)).is_err());
        assert!(to_xml(&parse_json(r#"{"a": ["1", "2"]}"#)).is_err());
        assert!(to_xml(&parse_json("{}")).is_err());
    }

    #[test]
    fn test_should_reject_attribute_as_root() {
        let err = to_xml(&parse_json(r#"{"@a": "1"}"#)).unwrap_err();
        assert!(matches!(err, XmlError::InvalidTree(_)));
    }

    #[test]
    fn test_should_reject_invalid_names() {
        for key in ["1abc", "has space", "", "@"] {
            let tree = TreeValue::single("r", TreeValue::single(key, "v".into()));
            let err = to_xml(&tree).unwrap_err();
            assert!(matches!(err, XmlError::InvalidName(_)), "{key:?}: {err}");
        }
    }

    #[test]
    fn test_should_reject_structured_attribute_value() {
        let err = to_xml(&parse_json(r#"{"r": {"@a": {"b": "c"}}}"#)).unwrap_err();
        assert!(matches!(err, XmlError::InvalidTree(_)));
    }

    #[test]
    fn test_should_reject_nested_arrays() {
        let err = to_xml(&parse_json(r#"{"r": {"a": [["1"], "2"]}}"#)).unwrap_err();
        assert!(matches!(err, XmlError::InvalidTree(_)));
    }

    #[test]
    fn test_should_accept_unicode_and_namespaced_names() {
        assert!(is_valid_name("soap:Body"));
        assert!(is_valid_name("_x-1.2"));
        assert!(is_valid_name("Город"));
        assert!(!is_valid_name("-x"));
        assert!(!is_valid_name("a/b"));
    }
}
