//! XML parsing: building a [`TreeValue`] from an XML document.
//!
//! The document is read as a stream of quick-xml events and each element is
//! built recursively:
//!
//! - attributes become `@`-prefixed entries, in document order
//! - child elements are keyed by their qualified tag name (`soap:Body`)
//! - a tag seen more than once under the same parent turns into an array
//! - text is accumulated across text nodes, CDATA and entity references, then
//!   trimmed; whitespace-only text is dropped
//!
//! Comments, processing instructions, the XML declaration and DOCTYPE are
//! skipped. Documents nested deeper than [`MAX_DEPTH`] elements are rejected.

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};

use crate::error::XmlError;
use crate::tree::{ATTRIBUTE_PREFIX, TEXT_KEY, TreeMap, TreeValue};

/// Maximum element nesting depth accepted by [`from_xml`]. The root element
/// is at depth 1.
pub const MAX_DEPTH: usize = 256;

/// Parse an XML document into a tree.
///
/// The result is an object with exactly one entry: the root element's name
/// mapped to its content.
///
/// # Errors
///
/// Returns `XmlError` if the input is empty, not UTF-8, or not well-formed.
pub fn from_xml(xml: &[u8]) -> Result<TreeValue, XmlError> {
    let text = std::str::from_utf8(xml)?;
    if text.trim().is_empty() {
        return Err(XmlError::EmptyDocument);
    }

    let mut reader = Reader::from_str(text);
    let mut root: Option<(String, TreeValue)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start)?;
                ensure_no_root(root.as_ref(), &name)?;
                let value = read_element(&mut reader, &name, &start, 1)?;
                root = Some((name, value));
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;
                ensure_no_root(root.as_ref(), &name)?;
                let value = empty_element(&start)?;
                root = Some((name, value));
            }
            Event::Text(e) => {
                if !decode_text(&e)?.trim().is_empty() {
                    return Err(XmlError::Malformed(
                        "text content outside of the root element".to_owned(),
                    ));
                }
            }
            Event::CData(_) | Event::GeneralRef(_) => {
                return Err(XmlError::Malformed(
                    "character data outside of the root element".to_owned(),
                ));
            }
            Event::End(_) => {
                return Err(XmlError::Malformed(
                    "closing tag without a matching opening tag".to_owned(),
                ));
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }

    let (name, value) =
        root.ok_or_else(|| XmlError::Malformed("document has no root element".to_owned()))?;
    Ok(TreeValue::single(name, value))
}

fn ensure_no_root(root: Option<&(String, TreeValue)>, name: &str) -> Result<(), XmlError> {
    match root {
        Some((existing, _)) => Err(XmlError::Malformed(format!(
            "multiple root elements: <{existing}> is followed by <{name}>"
        ))),
        None => Ok(()),
    }
}

/// Read the content of an element whose start tag has just been consumed,
/// through its matching end tag. `depth` is the nesting depth of the element.
fn read_element(
    reader: &mut Reader<&[u8]>,
    name: &str,
    start: &BytesStart<'_>,
    depth: usize,
) -> Result<TreeValue, XmlError> {
    let mut entries = read_attributes(start)?;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(child) => {
                let child_name = element_name(&child)?;
                ensure_depth(depth + 1, &child_name)?;
                let value = read_element(reader, &child_name, &child, depth + 1)?;
                insert_child(&mut entries, child_name, value);
            }
            Event::Empty(child) => {
                let child_name = element_name(&child)?;
                ensure_depth(depth + 1, &child_name)?;
                let value = empty_element(&child)?;
                insert_child(&mut entries, child_name, value);
            }
            Event::Text(e) => text.push_str(&decode_text(&e)?),
            Event::CData(e) => text.push_str(std::str::from_utf8(e.as_ref())?),
            Event::GeneralRef(e) => text.push_str(&resolve_reference(&e)?),
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::Malformed(format!(
                    "unexpected end of document inside <{name}>"
                )));
            }
            _ => {}
        }
    }

    Ok(finish_element(entries, &text))
}

fn ensure_depth(depth: usize, name: &str) -> Result<(), XmlError> {
    if depth > MAX_DEPTH {
        return Err(XmlError::Malformed(format!(
            "nesting exceeds {MAX_DEPTH} levels at <{name}>"
        )));
    }
    Ok(())
}

/// Build the value of a self-closing element.
fn empty_element(start: &BytesStart<'_>) -> Result<TreeValue, XmlError> {
    let entries = read_attributes(start)?;
    Ok(finish_element(entries, ""))
}

fn finish_element(mut entries: TreeMap, text: &str) -> TreeValue {
    let text = text.trim();
    if entries.is_empty() {
        return TreeValue::Leaf(text.to_owned());
    }
    if !text.is_empty() {
        entries.insert(TEXT_KEY.to_owned(), TreeValue::Leaf(text.to_owned()));
    }
    TreeValue::Object(entries)
}

/// Add a child under its tag name, collapsing repeated tags into an array.
///
/// Element values are never arrays on their own, so an existing array entry
/// always stems from an earlier repetition.
fn insert_child(entries: &mut TreeMap, name: String, value: TreeValue) {
    match entries.get_mut(&name) {
        Some(TreeValue::Array(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, TreeValue::Array(Vec::with_capacity(2)));
            *existing = TreeValue::Array(vec![first, value]);
        }
        None => {
            entries.insert(name, value);
        }
    }
}

fn read_attributes(start: &BytesStart<'_>) -> Result<TreeMap, XmlError> {
    let mut entries = TreeMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        entries.insert(
            format!("{ATTRIBUTE_PREFIX}{key}"),
            TreeValue::Leaf(value.into_owned()),
        );
    }
    Ok(entries)
}

fn element_name(start: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = start.name();
    Ok(std::str::from_utf8(name.as_ref())?.to_owned())
}

fn decode_text(e: &BytesText<'_>) -> Result<String, XmlError> {
    let decoded = e
        .decode()
        .map_err(|err| XmlError::Malformed(err.to_string()))?;
    let unescaped = quick_xml::escape::unescape(&decoded)
        .map_err(|err| XmlError::Malformed(err.to_string()))?;
    Ok(unescaped.into_owned())
}

/// Resolve a predefined (`&amp;`) or numeric (`&#10;`, `&#x9;`) reference.
fn resolve_reference(e: &BytesRef<'_>) -> Result<String, XmlError> {
    let raw = e
        .decode()
        .map_err(|err| XmlError::Malformed(err.to_string()))?;

    if let Some(resolved) = quick_xml::escape::resolve_xml_entity(&raw) {
        return Ok(resolved.to_owned());
    }

    let Some(number) = raw.strip_prefix('#') else {
        return Err(XmlError::Malformed(format!("unknown entity reference &{raw};")));
    };
    let code = match number.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => number.parse::<u32>(),
    }
    .map_err(|_| XmlError::Malformed(format!("invalid character reference &{raw};")))?;

    char::from_u32(code)
        .map(String::from)
        .ok_or_else(|| XmlError::Malformed(format!("invalid character reference &{raw};")))
}
