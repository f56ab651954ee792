//! Process-wide COLLADA version setting
//!
//! A single [`XmlContext`] shared by the whole process, for callers that want
//! module-level `get_version`/`set_version` calls instead of passing a
//! context around. Access is guarded by a lock, but a version change is
//! still visible to every thread: code that writes documents for different
//! versions concurrently should own separate [`XmlContext`] values instead.

use crate::builder::{Child, ElementMaker};
use crate::context::XmlContext;
use crate::documents::{Element, ElementTree};
use crate::error::Result;
use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static CONTEXT: Lazy<RwLock<XmlContext>> = Lazy::new(|| RwLock::new(XmlContext::new()));

fn read() -> RwLockReadGuard<'static, XmlContext> {
    CONTEXT.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, XmlContext> {
    CONTEXT.write().unwrap_or_else(PoisonError::into_inner)
}

/// Namespace URI of the active version
pub fn get_namespace() -> &'static str {
    read().namespace()
}

/// Active version string
pub fn get_version() -> &'static str {
    read().version()
}

/// Change the active version
///
/// Fails with [`Error::InvalidVersion`](crate::Error::InvalidVersion) for
/// unknown versions, leaving the setting unchanged.
pub fn set_version(version: &str) -> Result<()> {
    write().set_version(version)
}

/// Snapshot of the element builder for the active version
pub fn element_maker() -> ElementMaker {
    read().maker().clone()
}

/// Build an element in the active namespace
pub fn build<I>(tag: &str, children: I) -> Result<Element>
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    read().build(tag, children)
}

/// Write `tree` with the shared context's backend
pub fn write_xml<W: Write + ?Sized>(tree: &mut ElementTree, out: &mut W) -> Result<()> {
    read().write_xml(tree, out)
}

/// Run `f` with the shared context
pub fn with_context<R>(f: impl FnOnce(&XmlContext) -> R) -> R {
    let ctx = read();
    f(&*ctx)
}
