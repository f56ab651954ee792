//! # collada-xml
//!
//! Namespace-aware XML element building and writing for COLLADA documents.
//!
//! ## Features
//!
//! - COLLADA 1.4.1 and 1.5.0 namespaces, switchable at runtime
//! - Element builder taking text, attribute maps and child elements
//! - Pretty-printed output through quick-xml or a dependency-free writer
//! - Percent-decoding of URI references
//!
//! ## Example
//!
//! ```rust
//! use collada_xml::{element, ElementTree, XmlContext};
//!
//! let mut ctx = XmlContext::new();
//! ctx.set_version("1.5.0")?;
//!
//! let root = element!(
//!     ctx,
//!     "COLLADA",
//!     [("version", "1.5.0")],
//!     element!(ctx, "asset", element!(ctx, "up_axis", "Z_UP")?)?
//! )?;
//!
//! let mut out = Vec::new();
//! ctx.write_xml(&mut ElementTree::new(root), &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("<up_axis>Z_UP</up_axis>"));
//! # Ok::<(), collada_xml::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub mod names;
pub mod namespaces;
pub mod version;

pub mod builder;
pub mod documents;
pub mod serializer;

pub mod context;
pub mod settings;
pub mod uri;

// Re-exports for convenience
pub use builder::{Child, ElementMaker, TagMaker};
pub use context::XmlContext;
pub use documents::{Element, ElementTree};
pub use error::{Error, Result};
pub use serializer::{create_backend, write_xml, Backend, BackendKind, WriterConfig};
pub use settings::{get_namespace, get_version, set_version};
pub use uri::unquote_safe;
pub use version::SchemaVersion;

/// Version of the collada-xml library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
