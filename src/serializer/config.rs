//! Output configuration

use serde::{Deserialize, Serialize};

/// Configuration for writing element trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Spaces per nesting level
    indent_width: usize,
    /// Whether to start the output with an XML declaration
    xml_declaration: bool,
    /// Whether to end the output with a newline
    trailing_newline: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            xml_declaration: false,
            trailing_newline: true,
        }
    }
}

impl WriterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the indentation width
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Check if an XML declaration is written
    pub fn xml_declaration(&self) -> bool {
        self.xml_declaration
    }

    /// Check if output ends with a newline
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Set indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set whether to write an XML declaration
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Set whether to end the output with a newline
    pub fn with_trailing_newline(mut self, newline: bool) -> Self {
        self.trailing_newline = newline;
        self
    }
}
