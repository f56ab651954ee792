//! XML element trees
//!
//! The tree keeps text the way ElementTree-style libraries do: `text` is the
//! character data before the first child, and each child's `tail` is the
//! character data that follows its end tag.

use crate::namespaces::{NamespaceMap, QName};
use indexmap::IndexMap;

/// XML Element in the document tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag in Clark notation (`{uri}local`) or a bare local name
    pub tag: String,
    /// Attributes in insertion order, keys may use Clark notation
    pub attributes: IndexMap<String, String>,
    /// Text before the first child
    pub text: Option<String>,
    /// Text after this element's end tag, inside the parent
    pub tail: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Prefix declarations requested for this element
    pub nsmap: NamespaceMap,
}

impl Element {
    /// Create a new element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the namespace map
    pub fn with_nsmap(mut self, nsmap: NamespaceMap) -> Self {
        self.nsmap = nsmap;
        self
    }

    /// Parsed tag name
    pub fn qname(&self) -> QName {
        QName::from_clark(&self.tag)
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        match self.tag.strip_prefix('{').and_then(|rest| rest.split_once('}')) {
            Some((_, local)) => local,
            None => &self.tag,
        }
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.tag
            .strip_prefix('{')
            .and_then(|rest| rest.split_once('}'))
            .map(|(ns, _)| ns)
    }

    /// Get an attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    /// Set an attribute value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append character data after the current last node
    ///
    /// Goes to `text` while there are no children, otherwise to the tail of
    /// the last child.
    pub fn append_text(&mut self, text: &str) {
        let slot = match self.children.last_mut() {
            Some(last) => &mut last.tail,
            None => &mut self.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// Depth-first iterator over this element and all descendants
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

/// An XML document: a root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTree {
    root: Element,
}

impl ElementTree {
    /// Wrap a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Get the root element mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Unwrap the root element
    pub fn into_root(self) -> Element {
        self.root
    }
}

impl From<Element> for ElementTree {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let elem = Element::new("{urn:x}test");
        assert_eq!(elem.local_name(), "test");
        assert_eq!(elem.namespace(), Some("urn:x"));
        assert!(elem.is_empty());
        assert!(elem.text.is_none());
    }

    #[test]
    fn test_unqualified_element() {
        let elem = Element::new("plain");
        assert_eq!(elem.local_name(), "plain");
        assert_eq!(elem.namespace(), None);
        assert_eq!(elem.qname(), QName::local("plain"));
    }

    #[test]
    fn test_append_text_goes_to_tail_after_children() {
        let mut elem = Element::new("a");
        elem.append_text("one");
        elem.append_text("two");
        elem.append(Element::new("b"));
        elem.append_text("three");

        assert_eq!(elem.text.as_deref(), Some("onetwo"));
        assert_eq!(elem.children[0].tail.as_deref(), Some("three"));
    }

    #[test]
    fn test_attributes_keep_order() {
        let mut elem = Element::new("a");
        elem.set("z", "1");
        elem.set("a", "2");
        elem.set("z", "3");
        let keys: Vec<_> = elem.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(elem.get("z"), Some("3"));
    }

    #[test]
    fn test_find_children_and_iter() {
        let mut root = Element::new("root");
        let mut inner = Element::new("child1");
        inner.append(Element::new("leaf"));
        root.append(inner);
        root.append(Element::new("child2"));
        root.append(Element::new("child1"));

        assert_eq!(root.find_children("child1").len(), 2);
        let order: Vec<_> = root.iter().map(|e| e.local_name().to_string()).collect();
        assert_eq!(order, vec!["root", "child1", "leaf", "child2", "child1"]);
    }

    #[test]
    fn test_tree_root_access() {
        let mut tree = ElementTree::from(Element::new("root"));
        tree.root_mut().set("id", "r");
        assert_eq!(tree.root().get("id"), Some("r"));
        assert_eq!(tree.into_root().tag, "root");
    }
}
