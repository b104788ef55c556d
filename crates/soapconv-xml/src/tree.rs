//! The tree value shared by the XML and JSON sides of the converter.
//!
//! A [`TreeValue`] is what an XML element looks like once its structure has been
//! flattened into JSON shapes:
//!
//! ```text
//! <Order id="7">                  {"Order": {
//!   <Item>a</Item>                  "@id": "7",
//!   <Item>b</Item>          <=>     "Item": ["a", "b"],
//!   <Note>rush</Note>               "Note": "rush"
//! </Order>                        }}
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

/// Prefix that marks a key as an XML attribute.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Key holding the text of an element that also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Ordered mapping used for element content. Keys keep first-seen order.
pub type TreeMap = IndexMap<String, TreeValue>;

/// A node of the converter's intermediate tree.
///
/// Equality on [`TreeValue::Object`] compares entries as a mapping, so two
/// objects with the same entries in a different order are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValue {
    /// Text content of an element without attributes or children.
    Leaf(String),
    /// An element with attributes and/or child elements.
    Object(TreeMap),
    /// Repeated sibling elements sharing the same tag, in document order.
    Array(Vec<TreeValue>),
}

impl TreeValue {
    /// Create a leaf from text.
    #[must_use]
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Create an object holding a single entry.
    #[must_use]
    pub fn single(key: impl Into<String>, value: TreeValue) -> Self {
        let mut map = TreeMap::with_capacity(1);
        map.insert(key.into(), value);
        Self::Object(map)
    }

    /// Look up a key when this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// The text of a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            _ => None,
        }
    }

    /// The entries of an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&TreeMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The items of an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[TreeValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for an empty leaf, object or array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(text) => text.is_empty(),
            Self::Object(map) => map.is_empty(),
            Self::Array(items) => items.is_empty(),
        }
    }
}

/// Returns `true` if the key names an attribute.
#[must_use]
pub fn is_attribute_key(key: &str) -> bool {
    key.starts_with(ATTRIBUTE_PREFIX)
}

impl From<&str> for TreeValue {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_owned())
    }
}

impl From<String> for TreeValue {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<TreeMap> for TreeValue {
    fn from(map: TreeMap) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        Self::Array(items)
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(text) => serializer.serialize_str(text),
            Self::Object(map) => map.serialize(serializer),
            Self::Array(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TreeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TreeValueVisitor)
    }
}

/// Maps any self-describing value onto the tree. Scalars become leaves holding
/// their canonical text; `null` becomes an empty leaf.
struct TreeValueVisitor;

impl<'de> Visitor<'de> for TreeValueVisitor {
    type Value = TreeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TreeValue, E> {
        let text = serde_json::Number::from_f64(v).map_or_else(|| v.to_string(), |n| n.to_string());
        Ok(TreeValue::Leaf(text))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<TreeValue, E> {
        Ok(TreeValue::Leaf(String::new()))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<TreeValue, D::Error> {
        TreeValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TreeValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(TreeValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TreeValue, A::Error> {
        let mut map = TreeMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, TreeValue>()? {
            map.insert(key, value);
        }
        Ok(TreeValue::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decode_json_scalars_as_text() {
        let tree: TreeValue = serde_json::from_str(
            r#"{"s": "x", "i": 20, "n": -3, "f": 20.5, "w": 2.0, "b": true, "z": null}"#,
        )
        .unwrap();
        assert_eq!(tree.get("s"), Some(&TreeValue::leaf("x")));
        assert_eq!(tree.get("i"), Some(&TreeValue::leaf("20")));
        assert_eq!(tree.get("n"), Some(&TreeValue::leaf("-3")));
        assert_eq!(tree.get("f"), Some(&TreeValue::leaf("20.5")));
        assert_eq!(tree.get("w"), Some(&TreeValue::leaf("2.0")));
        assert_eq!(tree.get("b"), Some(&TreeValue::leaf("true")));
        assert_eq!(tree.get("z"), Some(&TreeValue::leaf("")));
    }

    #[test]
    fn test_should_preserve_key_order_from_json() {
        let tree: TreeValue = serde_json::from_str(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#)
            .unwrap();
        let keys: Vec<&str> = tree
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_should_decode_arrays() {
        let tree: TreeValue = serde_json::from_str(r#"{"item": [1, {"a": "b"}]}"#).unwrap();
        let items = tree.get("item").and_then(TreeValue::as_array).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], TreeValue::leaf("1"));
        assert_eq!(items[1], TreeValue::single("a", TreeValue::leaf("b")));
    }

    #[test]
    fn test_should_encode_as_plain_json() {
        let mut map = TreeMap::new();
        map.insert("@id".to_owned(), TreeValue::leaf("7"));
        map.insert(
            "Item".to_owned(),
            TreeValue::Array(vec![TreeValue::leaf("a"), TreeValue::leaf("b")]),
        );
        let tree = TreeValue::single("Order", TreeValue::Object(map));

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"Order":{"@id":"7","Item":["a","b"]}}"#);
    }

    #[test]
    fn test_should_compare_objects_ignoring_key_order() {
        let mut left = TreeMap::new();
        left.insert("a".to_owned(), TreeValue::leaf("1"));
        left.insert("b".to_owned(), TreeValue::leaf("2"));
        let mut right = TreeMap::new();
        right.insert("b".to_owned(), TreeValue::leaf("2"));
        right.insert("a".to_owned(), TreeValue::leaf("1"));
        assert_eq!(TreeValue::Object(left), TreeValue::Object(right));
    }

    #[test]
    fn test_should_detect_attribute_keys() {
        assert!(is_attribute_key("@xmlns:soap"));
        assert!(!is_attribute_key("soap:Body"));
        assert!(!is_attribute_key(TEXT_KEY));
    }

    #[test]
    fn test_should_report_emptiness() {
        assert!(TreeValue::leaf("").is_empty());
        assert!(TreeValue::Object(TreeMap::new()).is_empty());
        assert!(TreeValue::Array(Vec::new()).is_empty());
        assert!(!TreeValue::leaf("x").is_empty());
    }
}
