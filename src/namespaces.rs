//! XML namespace handling
//!
//! This module provides qualified names in Clark notation (`{uri}local`),
//! the prefix registry used by backends that do not manage prefixes on their
//! own, and the scoped prefix bindings used while writing a tree.

use crate::error::{Error, Result};
use crate::names::validate_prefix;
use indexmap::IndexMap;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Prefix to namespace mapping; the `None` prefix is the default namespace
pub type NamespaceMap = IndexMap<Option<Prefix>, NamespaceUri>;

/// The namespace bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Split a tag in Clark notation
    ///
    /// `{uri}local` yields a namespaced name; anything else is a local name.
    pub fn from_clark(tag: &str) -> Self {
        if let Some(rest) = tag.strip_prefix('{') {
            if let Some((ns, local)) = rest.split_once('}') {
                if ns.is_empty() {
                    return Self::local(local);
                }
                return Self::namespaced(ns, local);
            }
        }
        Self::local(tag)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Whether a tag already carries a `{uri}` wrapper
pub fn is_qualified(tag: &str) -> bool {
    tag.starts_with('{')
}

/// Registry of preferred prefixes per namespace URI
///
/// An empty prefix marks the default (unprefixed) namespace. Registering a
/// prefix or a URI drops any earlier mapping that used either of them.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    prefixes: IndexMap<NamespaceUri, Prefix>,
}

impl NamespaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `uri` for serialization
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) -> Result<()> {
        validate_prefix(prefix)?;
        if uri.is_empty() {
            return Err(Error::Namespace(format!(
                "Cannot register prefix '{}' for an empty namespace",
                prefix
            )));
        }
        self.prefixes.retain(|u, p| u.as_str() != uri && p.as_str() != prefix);
        self.prefixes.insert(uri.to_string(), prefix.to_string());
        Ok(())
    }

    /// Make `uri` the default namespace
    pub fn register_default_namespace(&mut self, uri: &str) -> Result<()> {
        self.register_namespace("", uri)
    }

    /// The prefix registered for `uri` (`""` for the default namespace)
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes.get(uri).map(|p| p.as_str())
    }

    /// The namespace currently registered as default
    pub fn default_namespace(&self) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, p)| p.is_empty())
            .map(|(u, _)| u.as_str())
    }

    /// Number of registered namespaces
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Prefix bindings in effect while an element tree is written
///
/// One frame per open element. `xml` is always bound.
#[derive(Debug)]
pub struct NamespaceScope {
    frames: Vec<Vec<(Option<Prefix>, NamespaceUri)>>,
    next_generated: usize,
}

impl NamespaceScope {
    /// Create a scope with only the implicit `xml` binding
    pub fn new() -> Self {
        Self {
            frames: vec![vec![(Some("xml".to_string()), XML_NAMESPACE.to_string())]],
            next_generated: 0,
        }
    }

    /// Open a frame for a new element
    pub fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Close the innermost frame
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind a prefix in the innermost frame
    pub fn bind(&mut self, prefix: Option<&str>, uri: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push((prefix.map(str::to_string), uri.to_string()));
        }
    }

    /// Namespace currently bound to `prefix`
    pub fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, u)| u.as_str())
    }

    /// The non-empty default namespace in effect, if any
    pub fn default_namespace(&self) -> Option<&str> {
        self.lookup(None).filter(|uri| !uri.is_empty())
    }

    /// A prefix currently bound to `uri` and not shadowed by an inner binding
    ///
    /// Returns `Some(None)` when `uri` is the default namespace and
    /// `allow_default` is set.
    pub fn prefix_for(&self, uri: &str, allow_default: bool) -> Option<Option<Prefix>> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(p, u)| u.as_str() == uri && (allow_default || p.is_some()))
            .find(|(p, _)| self.lookup(p.as_deref()) == Some(uri))
            .map(|(p, _)| p.clone())
    }

    /// Pick the next unused `ns<N>` prefix
    pub fn generate_prefix(&mut self) -> Prefix {
        loop {
            let candidate = format!("ns{}", self.next_generated);
            self.next_generated += 1;
            if self.lookup(Some(candidate.as_str())).is_none() {
                return candidate;
            }
        }
    }
}

impl Default for NamespaceScope {
    fn default() -> Self {
        Self::new()
    }
}
