//! Tree serialization backends
//!
//! A [`Backend`] turns an element tree into bytes. Two implementations exist:
//!
//! - [`QuickXmlBackend`]: built on `quick_xml::Writer`, indents natively and
//!   declares prefixes from element namespace maps (cargo feature `quick-xml`)
//! - [`MinimalBackend`]: hand-written markup, compact output, prefixes taken from a
//!   [`NamespaceRegistry`](crate::namespaces::NamespaceRegistry)
//!
//! [`write_xml`] runs the indentation pass for backends that do not pretty
//! print, then writes the serialized bytes to the output stream.

mod config;
mod escape;
mod indent;
mod minimal;
#[cfg(feature = "quick-xml")]
mod quick;

pub use config::WriterConfig;
pub use indent::indent_tree;
pub use minimal::MinimalBackend;
#[cfg(feature = "quick-xml")]
pub use quick::QuickXmlBackend;

use crate::documents::{Element, ElementTree};
use crate::error::Result;
use crate::namespaces::{NamespaceScope, QName};
use log::{debug, trace};
use std::fmt;
use std::io::Write;

/// Strategy for serializing element trees
pub trait Backend: fmt::Debug + Send + Sync {
    /// Short backend name
    fn name(&self) -> &'static str;

    /// Returns true if the output is already indented
    fn pretty_prints(&self) -> bool;

    /// Make `uri` render without a prefix
    fn register_default_namespace(&mut self, uri: &str) -> Result<()>;

    /// Serialize the tree below `root`
    fn serialize(&self, root: &Element, config: &WriterConfig) -> Result<Vec<u8>>;
}

/// Backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// quick-xml writer
    QuickXml,
    /// Dependency-free writer
    Minimal,
}

impl BackendKind {
    /// The most capable backend compiled into this build
    pub fn detect() -> Self {
        let kind = if cfg!(feature = "quick-xml") {
            BackendKind::QuickXml
        } else {
            BackendKind::Minimal
        };
        debug!("selected {} XML backend", kind.name());
        kind
    }

    /// Backends compiled into this build, most capable first
    pub fn available() -> Vec<BackendKind> {
        [BackendKind::QuickXml, BackendKind::Minimal]
            .into_iter()
            .filter(BackendKind::is_available)
            .collect()
    }

    /// Whether this backend is compiled in
    pub fn is_available(&self) -> bool {
        match self {
            BackendKind::QuickXml => cfg!(feature = "quick-xml"),
            BackendKind::Minimal => true,
        }
    }

    /// Short backend name
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::QuickXml => "quick-xml",
            BackendKind::Minimal => "minimal",
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::detect()
    }
}

/// Create a backend by kind
///
/// Falls back to [`MinimalBackend`] if the requested backend is not compiled in.
pub fn create_backend(kind: BackendKind) -> Box<dyn Backend> {
    match kind {
        #[cfg(feature = "quick-xml")]
        BackendKind::QuickXml => Box::new(QuickXmlBackend::new()),
        #[cfg(not(feature = "quick-xml"))]
        BackendKind::QuickXml => {
            log::warn!("quick-xml backend not compiled in, using the minimal backend");
            Box::new(MinimalBackend::new())
        }
        BackendKind::Minimal => Box::new(MinimalBackend::new()),
    }
}

/// Write `tree` to `out`
///
/// When `backend` does not pretty print, the tree is indented in place
/// first. Errors from `out` are returned unchanged inside [`Error::Io`](crate::Error::Io).
pub fn write_xml<W: Write + ?Sized>(
    tree: &mut ElementTree,
    backend: &dyn Backend,
    config: &WriterConfig,
    out: &mut W,
) -> Result<()> {
    if !backend.pretty_prints() {
        trace!("indenting tree for {} backend", backend.name());
        indent_tree(tree.root_mut(), config.indent_width());
    }
    let bytes = backend.serialize(tree.root(), config)?;
    trace!("writing {} bytes from {} backend", bytes.len(), backend.name());
    out.write_all(&bytes)?;
    Ok(())
}

/// Start tag with prefixes resolved
#[derive(Debug)]
pub(crate) struct StartTag {
    /// Prefixed tag name
    pub name: String,
    /// Namespace declarations followed by the element's attributes
    pub attributes: Vec<(String, String)>,
}

/// Open a scope frame for `elem` and resolve its start tag
///
/// `declarations` are bound first; anything still unbound afterwards gets a
/// generated prefix declared on this element. Callers pop the frame after
/// the end tag.
pub(crate) fn open_element(
    elem: &Element,
    scope: &mut NamespaceScope,
    declarations: &[(Option<String>, String)],
) -> StartTag {
    scope.push();
    let mut attributes = Vec::new();
    let qname = elem.qname();

    for (prefix, uri) in declarations {
        // An unqualified element must not sit in a default namespace.
        if prefix.is_none() && qname.namespace.is_none() {
            continue;
        }
        if scope.lookup(prefix.as_deref()) != Some(uri.as_str()) {
            scope.bind(prefix.as_deref(), uri);
            attributes.push(xmlns_attribute(prefix.as_deref(), uri));
        }
    }

    let name = match &qname.namespace {
        Some(ns) => {
            let prefix = resolve_prefix(scope, ns, true, &mut attributes);
            prefixed(prefix.as_deref(), &qname.local_name)
        }
        None => {
            // Keep unqualified elements out of an inherited default namespace.
            if scope.default_namespace().is_some() {
                scope.bind(None, "");
                attributes.push(xmlns_attribute(None, ""));
            }
            qname.local_name
        }
    };

    let mut own = Vec::with_capacity(elem.attributes.len());
    for (key, value) in &elem.attributes {
        let key_name = QName::from_clark(key);
        let rendered = match &key_name.namespace {
            Some(ns) => {
                let prefix = resolve_prefix(scope, ns, false, &mut attributes);
                prefixed(prefix.as_deref(), &key_name.local_name)
            }
            None => key_name.local_name,
        };
        own.push((rendered, value.clone()));
    }
    attributes.extend(own);

    StartTag { name, attributes }
}

fn resolve_prefix(
    scope: &mut NamespaceScope,
    uri: &str,
    allow_default: bool,
    declarations: &mut Vec<(String, String)>,
) -> Option<String> {
    if let Some(prefix) = scope.prefix_for(uri, allow_default) {
        return prefix;
    }
    let prefix = scope.generate_prefix();
    scope.bind(Some(prefix.as_str()), uri);
    declarations.push(xmlns_attribute(Some(prefix.as_str()), uri));
    Some(prefix)
}

fn xmlns_attribute(prefix: Option<&str>, uri: &str) -> (String, String) {
    match prefix {
        Some(p) => (format!("xmlns:{}", p), uri.to_string()),
        None => ("xmlns".to_string(), uri.to_string()),
    }
}

fn prefixed(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{}:{}", p, local),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::NamespaceMap;

    #[test]
    fn test_detect_prefers_quick_xml() {
        let available = BackendKind::available();
        assert_eq!(available.first().copied(), Some(BackendKind::detect()));
        assert!(available.contains(&BackendKind::Minimal));
        #[cfg(feature = "quick-xml")]
        assert_eq!(BackendKind::detect(), BackendKind::QuickXml);
    }

    #[test]
    fn test_create_backend_names() {
        assert_eq!(create_backend(BackendKind::Minimal).name(), "minimal");
        assert!(!create_backend(BackendKind::Minimal).pretty_prints());
    }

    #[test]
    fn test_open_element_uses_default_namespace() {
        let mut nsmap = NamespaceMap::new();
        nsmap.insert(None, "urn:d".to_string());
        let elem = Element::new("{urn:d}root").with_nsmap(nsmap.clone());
        let decls: Vec<_> = nsmap.into_iter().collect();

        let mut scope = NamespaceScope::new();
        let start = open_element(&elem, &mut scope, &decls);
        assert_eq!(start.name, "root");
        assert_eq!(
            start.attributes,
            vec![("xmlns".to_string(), "urn:d".to_string())]
        );

        // Same declaration on a child is already in scope.
        let child = Element::new("{urn:d}child");
        let start = open_element(&child, &mut scope, &decls);
        assert_eq!(start.name, "child");
        assert!(start.attributes.is_empty());
    }

    #[test]
    fn test_open_element_generates_prefixes() {
        let mut elem = Element::new("{urn:a}root");
        elem.set("{urn:b}flag", "1");
        elem.set("plain", "2");

        let mut scope = NamespaceScope::new();
        let start = open_element(&elem, &mut scope, &[]);
        assert_eq!(start.name, "ns0:root");
        assert_eq!(
            start.attributes,
            vec![
                ("xmlns:ns0".to_string(), "urn:a".to_string()),
                ("xmlns:ns1".to_string(), "urn:b".to_string()),
                ("ns1:flag".to_string(), "1".to_string()),
                ("plain".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_attribute_never_uses_default_namespace() {
        let mut elem = Element::new("{urn:d}root");
        elem.set("{urn:d}id", "x");
        let decls = vec![(None, "urn:d".to_string())];

        let mut scope = NamespaceScope::new();
        let start = open_element(&elem, &mut scope, &decls);
        assert_eq!(start.name, "root");
        assert!(start
            .attributes
            .contains(&("xmlns:ns0".to_string(), "urn:d".to_string())));
        assert!(start
            .attributes
            .contains(&("ns0:id".to_string(), "x".to_string())));
    }

    #[test]
    fn test_unqualified_child_resets_default() {
        let decls = vec![(None, "urn:d".to_string())];
        let mut scope = NamespaceScope::new();
        open_element(&Element::new("{urn:d}root"), &mut scope, &decls);

        let start = open_element(&Element::new("plain"), &mut scope, &[]);
        assert_eq!(start.name, "plain");
        assert_eq!(start.attributes, vec![("xmlns".to_string(), String::new())]);
    }

    #[test]
    fn test_unqualified_element_skips_default_declaration() {
        let decls = vec![(None, "urn:d".to_string())];
        let mut scope = NamespaceScope::new();
        let start = open_element(&Element::new("plain"), &mut scope, &decls);
        assert_eq!(start.name, "plain");
        assert!(start.attributes.is_empty());
        assert_eq!(scope.default_namespace(), None);

        let start = open_element(&Element::new("{urn:d}child"), &mut scope, &decls);
        assert_eq!(start.name, "child");
        assert_eq!(start.attributes, vec![("xmlns".to_string(), "urn:d".to_string())]);
    }

    #[test]
    fn test_xml_attribute_prefix() {
        let mut elem = Element::new("root");
        elem.set("{http://www.w3.org/XML/1998/namespace}lang", "en");
        let mut scope = NamespaceScope::new();
        let start = open_element(&elem, &mut scope, &[]);
        assert_eq!(
            start.attributes,
            vec![("xml:lang".to_string(), "en".to_string())]
        );
    }
}
