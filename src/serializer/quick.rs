//! quick-xml writer backend
//!
//! Indentation comes from `quick_xml::Writer`; prefixes come from the
//! namespace maps the element builder attaches to every element.

use super::escape::escape_attribute;
use super::{open_element, Backend, WriterConfig};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::NamespaceScope;
use log::debug;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;

/// Backend built on `quick_xml::Writer`
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlBackend;

impl QuickXmlBackend {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }
}

impl Backend for QuickXmlBackend {
    fn name(&self) -> &'static str {
        "quick-xml"
    }

    fn pretty_prints(&self) -> bool {
        true
    }

    fn register_default_namespace(&mut self, uri: &str) -> Result<()> {
        // Elements carry their own nsmap; nothing to record here.
        debug!("quick-xml backend: default namespace {} comes from element nsmaps", uri);
        Ok(())
    }

    fn serialize(&self, root: &Element, config: &WriterConfig) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', config.indent_width());
        if config.xml_declaration() {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(xml_error)?;
        }
        let mut scope = NamespaceScope::new();
        write_element(&mut writer, root, &mut scope)?;

        let mut bytes = writer.into_inner();
        if config.trailing_newline() {
            bytes.push(b'\n');
        }
        Ok(bytes)
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    elem: &Element,
    scope: &mut NamespaceScope,
) -> Result<()> {
    let declarations: Vec<(Option<String>, String)> = elem
        .nsmap
        .iter()
        .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
        .collect();
    let start = open_element(elem, scope, &declarations);

    let mut tag = BytesStart::new(start.name.as_str());
    for (key, value) in &start.attributes {
        // push_attribute((&str, &str)) leaves tab and newline unescaped.
        tag.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    let text = elem.text.as_deref().filter(|t| !t.is_empty());
    if elem.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(tag)).map_err(xml_error)?;
    } else {
        writer.write_event(Event::Start(tag)).map_err(xml_error)?;
        if let Some(text) = text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?;
        }
        for child in &elem.children {
            write_element(writer, child, scope)?;
            if let Some(tail) = child.tail.as_deref().filter(|t| !t.is_empty()) {
                writer
                    .write_event(Event::Text(BytesText::new(tail)))
                    .map_err(xml_error)?;
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(start.name.as_str())))
            .map_err(xml_error)?;
    }
    scope.pop();
    Ok(())
}

fn xml_error(err: quick_xml::Error) -> Error {
    Error::Xml(err.to_string())
}
