//! Fallback writer
//!
//! Writes compact markup. Prefixes come from the backend's registry; every
//! prefixed namespace used in the tree is declared on the root element, and
//! namespaces without a registered prefix get `ns0`, `ns1`, ... The default
//! namespace is declared on the outermost elements that are in it.

use super::escape::{escape_attribute, escape_text};
use super::{open_element, Backend, WriterConfig};
use crate::documents::Element;
use crate::error::Result;
use crate::namespaces::{NamespaceRegistry, NamespaceScope, QName, XML_NAMESPACE};
use indexmap::IndexSet;
use log::debug;

/// Backend that relies on the indentation pass and a prefix registry
#[derive(Debug, Clone, Default)]
pub struct MinimalBackend {
    registry: NamespaceRegistry,
}

impl MinimalBackend {
    /// Create a backend with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preferred prefix for `uri`
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) -> Result<()> {
        self.registry.register_namespace(prefix, uri)
    }

    /// Get the prefix registry
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// Prefixed declarations placed on the root element, and the default
    /// namespace if the tree uses it
    fn root_declarations(&self, root: &Element) -> (Vec<(Option<String>, String)>, Option<String>) {
        let mut used: IndexSet<String> = IndexSet::new();
        for elem in root.iter() {
            let names = std::iter::once(elem.tag.as_str())
                .chain(elem.attributes.keys().map(String::as_str));
            for name in names {
                if let Some(ns) = QName::from_clark(name).namespace {
                    if ns != XML_NAMESPACE {
                        used.insert(ns);
                    }
                }
            }
        }

        let mut default = None;
        let mut declarations = Vec::new();
        let mut generated = 0;
        for uri in used {
            match self.registry.prefix_for(&uri) {
                Some("") => default = Some(uri),
                Some(prefix) => declarations.push((Some(prefix.to_string()), uri)),
                None => {
                    declarations.push((Some(format!("ns{}", generated)), uri));
                    generated += 1;
                }
            }
        }
        (declarations, default)
    }
}

impl Backend for MinimalBackend {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn pretty_prints(&self) -> bool {
        false
    }

    fn register_default_namespace(&mut self, uri: &str) -> Result<()> {
        debug!("minimal backend: default namespace is now {}", uri);
        self.registry.register_default_namespace(uri)
    }

    fn serialize(&self, root: &Element, config: &WriterConfig) -> Result<Vec<u8>> {
        let mut out = String::new();
        if config.xml_declaration() {
            out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        }
        let mut scope = NamespaceScope::new();
        let (declarations, default) = self.root_declarations(root);
        write_element(&mut out, root, &mut scope, declarations, default.as_deref());
        if config.trailing_newline() {
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

fn write_element(
    out: &mut String,
    elem: &Element,
    scope: &mut NamespaceScope,
    mut declarations: Vec<(Option<String>, String)>,
    default: Option<&str>,
) {
    if let Some(uri) = default.filter(|uri| elem.namespace() == Some(*uri)) {
        declarations.insert(0, (None, uri.to_string()));
    }
    let start = open_element(elem, scope, &declarations);
    out.push('<');
    out.push_str(&start.name);
    for (key, value) in &start.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    let text = elem.text.as_deref().filter(|t| !t.is_empty());
    if elem.children.is_empty() && text.is_none() {
        out.push_str(" />");
    } else {
        out.push('>');
        if let Some(text) = text {
            out.push_str(&escape_text(text));
        }
        for child in &elem.children {
            write_element(out, child, scope, Vec::new(), default);
            if let Some(tail) = child.tail.as_deref() {
                out.push_str(&escape_text(tail));
            }
        }
        out.push_str("</");
        out.push_str(&start.name);
        out.push('>');
    }
    scope.pop();
}
