//! Character escaping shared by both backends
//!
//! Markup characters go through `quick_xml::escape` when that feature is
//! compiled in. Attribute values additionally get character references for
//! tab, newline and carriage return so that attribute-value normalization
//! does not turn them into spaces when the document is read back.

use std::borrow::Cow;

/// Escape character data (`&`, `<`, `>`)
#[cfg(feature = "quick-xml")]
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(text)
}

/// Escape character data (`&`, `<`, `>`)
#[cfg(not(feature = "quick-xml"))]
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    // Without quick-xml the minimal backend has to escape on its own.
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(feature = "quick-xml")]
fn escape_markup(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

#[cfg(not(feature = "quick-xml"))]
fn escape_markup(value: &str) -> Cow<'_, str> {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escape an attribute value for use between double quotes
pub(crate) fn escape_attribute(value: &str) -> String {
    let markup = escape_markup(value);
    let mut escaped = String::with_capacity(markup.len());
    for c in markup.chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
