//! Qualified annotation names
//!
//! Annotations are keyed by `namespace::name`. A name without the `::`
//! separator has no namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between namespace and name in a qualified name
pub const NS_SEPARATOR: &str = "::";

/// A qualified annotation name (`namespace::name` or bare `name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QName {
    namespace: Option<String>,
    name: String,
}

impl QName {
    /// Create a qualified name from its parts
    ///
    /// An empty namespace is treated as no namespace.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.into(),
        }
    }

    /// Parse `namespace::name`; only the first separator splits
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(NS_SEPARATOR) {
            Some((ns, name)) => Self::new(Some(ns), name),
            None => Self::new(None, raw),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the given namespace/name pair denotes this qualified name
    pub fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace.filter(|ns| !ns.is_empty())
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}{}{}", ns, NS_SEPARATOR, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<String> for QName {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for QName {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<QName> for String {
    fn from(qname: QName) -> Self {
        qname.to_string()
    }
}
