//! Element construction
//!
//! [`ElementMaker`] builds namespaced elements from a tag and a list of
//! heterogeneous children. Children are text, attribute mappings or
//! elements; dynamic values (`serde_json::Value`) are dispatched on their
//! runtime shape and rejected if they are none of those.
//!
//! ```rust
//! use collada_xml::{element, ElementMaker, SchemaVersion};
//!
//! let e = ElementMaker::for_version(SchemaVersion::V1_4_1);
//! let asset = element!(e, "asset", element!(e, "unit", [("meter", "0.01")])?)?;
//! assert_eq!(asset.children[0].get("meter"), Some("0.01"));
//! # Ok::<(), collada_xml::Error>(())
//! ```

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::{is_qualified, NamespaceMap};
use crate::version::SchemaVersion;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};

/// Attribute mapping accepted as a child
pub type AttributeMap = IndexMap<String, String>;

/// One argument to [`ElementMaker::build`]
#[derive(Debug, Clone)]
pub enum Child {
    /// Character data
    Text(String),
    /// Attributes merged into the element, later keys win
    Attributes(AttributeMap),
    /// A child element
    Element(Element),
    /// A dynamic value, dispatched on its shape when the element is built
    Value(JsonValue),
}

impl Child {
    /// Resolve a dynamic value into text or attributes
    fn resolve(self) -> Result<Child> {
        let value = match self {
            Child::Value(value) => value,
            other => return Ok(other),
        };
        match value {
            JsonValue::String(s) => Ok(Child::Text(s)),
            JsonValue::Object(map) if map.values().all(JsonValue::is_string) => {
                let attrs = map
                    .into_iter()
                    .filter_map(|(k, v)| match v {
                        JsonValue::String(s) => Some((k, s)),
                        _ => None,
                    })
                    .collect();
                Ok(Child::Attributes(attrs))
            }
            other => Err(Error::UnsupportedChildType(format!("bad argument: {}", other))),
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&String> for Child {
    fn from(text: &String) -> Self {
        Child::Text(text.clone())
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<AttributeMap> for Child {
    fn from(attrs: AttributeMap) -> Self {
        Child::Attributes(attrs)
    }
}

impl From<HashMap<String, String>> for Child {
    fn from(attrs: HashMap<String, String>) -> Self {
        Child::Attributes(attrs.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for Child {
    fn from(attrs: BTreeMap<String, String>) -> Self {
        Child::Attributes(attrs.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Child {
    fn from(attrs: [(K, V); N]) -> Self {
        Child::Attributes(
            attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<JsonValue> for Child {
    fn from(value: JsonValue) -> Self {
        Child::Value(value)
    }
}

macro_rules! child_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(value: $ty) -> Self {
                    Child::Value(JsonValue::from(value))
                }
            }
        )*
    };
}

child_from_scalar!(i32, i64, u32, u64, f64, bool);

/// Factory for namespaced elements
///
/// Tags that are not already in Clark notation are qualified with the
/// maker's namespace. Every built element carries a copy of the maker's
/// namespace map so that writers can declare it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMaker {
    namespace: Option<String>,
    nsmap: NamespaceMap,
}

impl ElementMaker {
    /// Create a maker for an optional namespace and a prefix map
    pub fn new(namespace: Option<&str>, nsmap: NamespaceMap) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            nsmap,
        }
    }

    /// Maker whose namespace is the default namespace of `version`
    pub fn for_version(version: SchemaVersion) -> Self {
        let mut maker = Self::new(None, NamespaceMap::new());
        maker.set_namespace(version.namespace());
        maker
    }

    /// Maker producing unqualified tags
    pub fn unqualified() -> Self {
        Self::new(None, NamespaceMap::new())
    }

    /// Switch to `uri`, resetting the namespace map to `{None: uri}`
    pub fn set_namespace(&mut self, uri: &str) {
        self.namespace = Some(uri.to_string());
        self.nsmap.clear();
        self.nsmap.insert(None, uri.to_string());
    }

    /// Namespace applied to unqualified tags
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Namespace map attached to built elements
    pub fn nsmap(&self) -> &NamespaceMap {
        &self.nsmap
    }

    /// Tag as it will appear on built elements
    pub fn qualify(&self, tag: &str) -> String {
        match &self.namespace {
            Some(ns) if !is_qualified(tag) => format!("{{{}}}{}", ns, tag),
            _ => tag.to_string(),
        }
    }

    /// Build an element from a tag and children
    pub fn build<I>(&self, tag: &str, children: I) -> Result<Element>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let mut elem = Element::new(self.qualify(tag)).with_nsmap(self.nsmap.clone());
        for child in children {
            let child: Child = child.into();
            match child.resolve()? {
                Child::Attributes(attrs) => elem.attributes.extend(attrs),
                Child::Text(text) => elem.append_text(&text),
                Child::Element(child) => elem.append(child),
                Child::Value(value) => {
                    return Err(Error::UnsupportedChildType(format!("bad argument: {}", value)))
                }
            }
        }
        Ok(elem)
    }

    /// Bind a tag name, for repeated construction of the same element
    pub fn tag<'a>(&'a self, name: &'a str) -> TagMaker<'a> {
        TagMaker { maker: self, name }
    }
}

impl Default for ElementMaker {
    fn default() -> Self {
        Self::for_version(SchemaVersion::default())
    }
}

/// An [`ElementMaker`] with its tag fixed
#[derive(Debug, Clone, Copy)]
pub struct TagMaker<'a> {
    maker: &'a ElementMaker,
    name: &'a str,
}

impl TagMaker<'_> {
    /// Build an element with the bound tag
    pub fn build<I>(&self, children: I) -> Result<Element>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.maker.build(self.name, children)
    }

    /// Build an element with no children
    pub fn empty(&self) -> Result<Element> {
        self.maker.build(self.name, Vec::<Child>::new())
    }
}

/// Build an element with variadic children
///
/// `element!(maker, "tag", child, ...)` converts every child with
/// [`Child::from`] and calls [`ElementMaker::build`].
#[macro_export]
macro_rules! element {
    ($maker:expr, $tag:expr $(, $child:expr)* $(,)?) => {{
        let children: ::std::vec::Vec<$crate::builder::Child> =
            ::std::vec![$($crate::builder::Child::from($child)),*];
        $maker.build($tag, children)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NS_141: &str = "http://www.collada.org/2005/11/COLLADASchema";

    #[test]
    fn test_build_empty_element() {
        let e = ElementMaker::default();
        let foo = element!(e, "foo").unwrap();
        assert_eq!(foo.tag, format!("{{{}}}foo", NS_141));
        assert!(foo.children.is_empty());
        assert!(foo.text.is_none());
        assert_eq!(foo.nsmap.get(&None::<String>).map(String::as_str), Some(NS_141));
    }

    #[test]
    fn test_build_mixed_content() {
        let e = ElementMaker::default();
        let a = element!(e, "a", "hello", element!(e, "b").unwrap(), "world").unwrap();
        assert_eq!(a.text.as_deref(), Some("hello"));
        assert_eq!(a.len(), 1);
        assert_eq!(a.children[0].local_name(), "b");
        assert_eq!(a.children[0].tail.as_deref(), Some("world"));
    }

    #[test]
    fn test_later_attributes_win() {
        let e = ElementMaker::default();
        let a = element!(e, "a", [("id", "x")], [("id", "y")]).unwrap();
        assert_eq!(a.get("id"), Some("y"));
        assert_eq!(a.attributes.len(), 1);
    }

    #[test]
    fn test_number_is_unsupported() {
        let e = ElementMaker::default();
        let err = element!(e, "a", 42).unwrap_err();
        match err {
            Error::UnsupportedChildType(msg) => assert!(msg.contains("42")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_json_values_dispatch_on_shape() {
        let e = ElementMaker::default();
        let a = e
            .build("a", vec![json!("text"), json!({"sid": "s1"})])
            .unwrap();
        assert_eq!(a.text.as_deref(), Some("text"));
        assert_eq!(a.get("sid"), Some("s1"));

        assert!(e.build("a", vec![json!(null)]).is_err());
        assert!(e.build("a", vec![json!([1, 2])]).is_err());
        assert!(e.build("a", vec![json!({"count": 3})]).is_err());
    }

    #[test]
    fn test_json_object_keeps_key_order() {
        let e = ElementMaker::default();
        let a = e
            .build("a", vec![json!({"sid": "s1", "name": "n", "id": "i"})])
            .unwrap();
        let keys: Vec<&str> = a.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["sid", "name", "id"]);
    }

    #[test]
    fn test_qualified_tag_kept() {
        let e = ElementMaker::default();
        let x = element!(e, "{urn:other}x").unwrap();
        assert_eq!(x.tag, "{urn:other}x");
    }

    #[test]
    fn test_unqualified_maker() {
        let e = ElementMaker::unqualified();
        let x = element!(e, "x", "t").unwrap();
        assert_eq!(x.tag, "x");
        assert!(x.nsmap.is_empty());
    }

    #[test]
    fn test_set_namespace_resyncs_nsmap() {
        let mut e = ElementMaker::default();
        e.set_namespace(SchemaVersion::V1_5_0.namespace());
        assert_eq!(e.namespace(), Some(SchemaVersion::V1_5_0.namespace()));
        assert_eq!(e.nsmap().len(), 1);
        assert_eq!(
            e.nsmap().get(&None::<String>).map(String::as_str),
            Some(SchemaVersion::V1_5_0.namespace())
        );
    }

    #[test]
    fn test_tag_maker() {
        let e = ElementMaker::default();
        let float = e.tag("float");
        let a = float.build(["1.0"]).unwrap();
        let b = float.empty().unwrap();
        assert_eq!(a.local_name(), "float");
        assert_eq!(a.text.as_deref(), Some("1.0"));
        assert_eq!(b.tag, a.tag);
    }

    #[test]
    fn test_text_after_several_children() {
        let e = ElementMaker::default();
        let p = element!(
            e,
            "p",
            element!(e, "a").unwrap(),
            element!(e, "b").unwrap(),
            "x",
            "y"
        )
        .unwrap();
        assert!(p.text.is_none());
        assert!(p.children[0].tail.is_none());
        assert_eq!(p.children[1].tail.as_deref(), Some("xy"));
    }
}
