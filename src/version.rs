//! COLLADA schema versions and their namespaces
//!
//! Each supported schema version maps to exactly one namespace URI. The
//! mapping is fixed at compile time.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// COLLADA 1.4.1 version string
pub const VERSION_1_4_1: &str = "1.4.1";
/// Alias for [`VERSION_1_4_1`]
pub const VERSION_1_4: &str = VERSION_1_4_1;
/// COLLADA 1.5.0 version string
pub const VERSION_1_5_0: &str = "1.5.0";
/// Alias for [`VERSION_1_5_0`]
pub const VERSION_1_5: &str = VERSION_1_5_0;
/// Version used when nothing else is configured
pub const DEFAULT_VERSION: &str = VERSION_1_4;

/// Namespace of COLLADA 1.4.1 documents
pub const COLLADA_1_4_1_NAMESPACE: &str = "http://www.collada.org/2005/11/COLLADASchema";
/// Namespace of COLLADA 1.5.0 documents
pub const COLLADA_1_5_0_NAMESPACE: &str = "http://www.collada.org/2008/03/COLLADASchema";

/// Version string to namespace URI registry
pub const COLLADA_NAMESPACES: &[(&str, &str)] = &[
    (VERSION_1_4_1, COLLADA_1_4_1_NAMESPACE),
    (VERSION_1_5_0, COLLADA_1_5_0_NAMESPACE),
];

/// A recognized COLLADA schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// COLLADA 1.4.1
    #[default]
    #[serde(rename = "1.4.1")]
    V1_4_1,
    /// COLLADA 1.5.0
    #[serde(rename = "1.5.0")]
    V1_5_0,
}

impl SchemaVersion {
    /// All known versions in registry order
    pub fn all() -> [SchemaVersion; 2] {
        [SchemaVersion::V1_4_1, SchemaVersion::V1_5_0]
    }

    /// Version string, e.g. `"1.4.1"`
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V1_4_1 => VERSION_1_4_1,
            SchemaVersion::V1_5_0 => VERSION_1_5_0,
        }
    }

    /// Namespace URI of documents written for this version
    pub fn namespace(&self) -> &'static str {
        match self {
            SchemaVersion::V1_4_1 => COLLADA_1_4_1_NAMESPACE,
            SchemaVersion::V1_5_0 => COLLADA_1_5_0_NAMESPACE,
        }
    }

    /// Find the version whose namespace is `uri`
    pub fn from_namespace(uri: &str) -> Option<SchemaVersion> {
        Self::all().into_iter().find(|v| v.namespace() == uri)
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::invalid_version(s, COLLADA_NAMESPACES.iter().map(|(v, _)| *v)))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the namespace registered for a version string
pub fn namespace_for(version: &str) -> Option<&'static str> {
    COLLADA_NAMESPACES
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, ns)| *ns)
}
