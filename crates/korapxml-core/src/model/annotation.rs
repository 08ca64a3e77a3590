use korapxml_core_types::QName;
use serde::{Deserialize, Serialize};

/// A single `(namespace, name, value)` annotation on a node or relation
///
/// An empty namespace is normalised to `None` so that grouping treats
/// "no namespace" and "empty namespace" identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

impl Annotation {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build an annotation from a qualified name
    pub fn from_qname(qname: &QName, value: impl Into<String>) -> Self {
        Self::new(qname.namespace(), qname.name(), value)
    }

    /// The namespace, or `""` when there is none
    pub fn namespace_or_empty(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    pub fn qname(&self) -> QName {
        QName::new(self.namespace.as_deref(), self.name.clone())
    }

    /// Check whether this annotation carries the given qualified name
    pub fn has_qname(&self, qname: &QName) -> bool {
        qname.matches(self.namespace.as_deref(), &self.name)
    }
}
