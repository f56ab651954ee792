//! Schema version, element builder and backend kept in step
//!
//! An [`XmlContext`] owns the active [`SchemaVersion`], the [`ElementMaker`]
//! for that version's namespace and the serialization backend. Changing the
//! version updates all three before returning.

use crate::builder::{Child, ElementMaker};
use crate::documents::{Element, ElementTree};
use crate::error::Result;
use crate::serializer::{create_backend, write_xml, Backend, BackendKind, WriterConfig};
use crate::version::SchemaVersion;
use log::{debug, warn};
use std::io::Write;

/// Active schema version with the builder and writer that follow it
#[derive(Debug)]
pub struct XmlContext {
    version: SchemaVersion,
    maker: ElementMaker,
    backend: Box<dyn Backend>,
    config: WriterConfig,
}

impl XmlContext {
    /// Context for the default version using the detected backend
    pub fn new() -> Self {
        Self::with_backend(BackendKind::detect())
    }

    /// Context for the default version using a specific backend
    pub fn with_backend(kind: BackendKind) -> Self {
        Self::from_backend(create_backend(kind))
    }

    /// Context around an already constructed backend
    pub fn from_backend(mut backend: Box<dyn Backend>) -> Self {
        let version = SchemaVersion::default();
        if let Err(err) = backend.register_default_namespace(version.namespace()) {
            warn!(
                "{} backend rejected namespace {}: {}",
                backend.name(),
                version.namespace(),
                err
            );
        }
        Self {
            version,
            maker: ElementMaker::for_version(version),
            backend,
            config: WriterConfig::default(),
        }
    }

    /// Set the schema version
    pub fn with_version(mut self, version: SchemaVersion) -> Result<Self> {
        self.set_schema_version(version)?;
        Ok(self)
    }

    /// Set the output configuration
    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Active version string
    pub fn version(&self) -> &'static str {
        self.version.as_str()
    }

    /// Active version
    pub fn schema_version(&self) -> SchemaVersion {
        self.version
    }

    /// Namespace URI of the active version
    pub fn namespace(&self) -> &'static str {
        self.version.namespace()
    }

    /// Switch to the version named `version`
    ///
    /// Unknown versions are rejected with [`Error::InvalidVersion`](crate::Error::InvalidVersion)
    /// and leave the context unchanged.
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        let version: SchemaVersion = version.parse()?;
        self.set_schema_version(version)
    }

    /// Switch to `version`
    pub fn set_schema_version(&mut self, version: SchemaVersion) -> Result<()> {
        self.backend.register_default_namespace(version.namespace())?;
        self.maker.set_namespace(version.namespace());
        self.version = version;
        debug!("COLLADA version set to {} ({})", version, version.namespace());
        Ok(())
    }

    /// Element builder for the active namespace
    pub fn maker(&self) -> &ElementMaker {
        &self.maker
    }

    /// Build an element in the active namespace
    pub fn build<I>(&self, tag: &str, children: I) -> Result<Element>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.maker.build(tag, children)
    }

    /// Serialization backend
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Output configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write `tree` to `out` with this context's backend and configuration
    pub fn write_xml<W: Write + ?Sized>(&self, tree: &mut ElementTree, out: &mut W) -> Result<()> {
        write_xml(tree, self.backend.as_ref(), &self.config, out)
    }
}

impl Default for XmlContext {
    fn default() -> Self {
        Self::new()
    }
}
