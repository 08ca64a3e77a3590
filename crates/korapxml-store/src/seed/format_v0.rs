//! Document seed format v0 schema
//!
//! Defines the YAML/JSON structure describing one document graph

use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Corpus path of the document, e.g. `salt:/rootCorpus/subCorpus1/doc1`
    pub path: String,

    /// Primary texts
    pub texts: Vec<SeedText>,

    /// Tokens anchored into the texts
    #[serde(default)]
    pub tokens: Vec<SeedToken>,

    /// Spans over tokens
    #[serde(default)]
    pub spans: Vec<SeedSpan>,

    /// Tree nodes; their children come from dominance relations
    #[serde(default)]
    pub structures: Vec<SeedStructure>,

    /// Edges between nodes
    #[serde(default)]
    pub relations: Vec<SeedRelation>,

    /// Named node sets, in export order
    #[serde(default)]
    pub layers: Vec<SeedLayer>,
}

/// Primary text definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedText {
    pub name: String,
    pub content: String,
}

/// Token definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedToken {
    /// Node name (unique within the document)
    pub id: String,

    /// Name of the text the token is anchored in
    pub text: String,

    /// Character offsets, `[start, end)`
    pub start: usize,
    pub end: usize,

    #[serde(default)]
    pub annotations: Vec<SeedAnnotation>,
}

/// Span definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSpan {
    pub id: String,

    /// Covered token IDs
    pub tokens: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<SeedAnnotation>,
}

/// Structure (tree node) definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedStructure {
    pub id: String,

    #[serde(default)]
    pub annotations: Vec<SeedAnnotation>,
}

/// Relation kinds available in seeds
///
/// Spanning edges are derived from `spans[].tokens`, so only dominance and
/// pointing relations are listed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedRelationKind {
    Dominance,
    Pointing,
}

/// Relation definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRelation {
    pub kind: SeedRelationKind,
    pub source: String,
    pub target: String,

    /// Optional relation type (e.g. `edge`, `dep`)
    #[serde(default, rename = "type")]
    pub rel_type: Option<String>,
}

/// Layer definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedLayer {
    pub name: String,
    pub nodes: Vec<String>,
}

/// Annotation in seed (string or typed block)
///
/// Either `"salt::POS=VBZ"` or `{ qname: "salt::POS", value: "VBZ" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAnnotation {
    pub qname: String,
    pub value: String,
}

impl<'de> Deserialize<'de> for SeedAnnotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(AnnotationVisitor)
    }
}

struct AnnotationVisitor;

impl<'de> serde::de::Visitor<'de> for AnnotationVisitor {
    type Value = SeedAnnotation;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a 'qname=value' string or a map with 'qname' and 'value' fields")
    }

    fn visit_str<E>(self, raw: &str) -> Result<SeedAnnotation, E>
    where
        E: serde::de::Error,
    {
        let (qname, value) = raw
            .split_once('=')
            .ok_or_else(|| E::custom(format!("annotation '{}' has no '='", raw)))?;
        Ok(SeedAnnotation {
            qname: qname.trim().to_string(),
            value: value.to_string(),
        })
    }

    fn visit_map<M>(self, mut map: M) -> Result<SeedAnnotation, M::Error>
    where
        M: serde::de::MapAccess<'de>,
    {
        let mut qname = None;
        let mut value = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "qname" => qname = Some(map.next_value()?),
                "value" => value = Some(map.next_value()?),
                _ => {
                    // Skip unknown fields
                    map.next_value::<serde::de::IgnoredAny>()?;
                }
            }
        }
        Ok(SeedAnnotation {
            qname: qname.ok_or_else(|| serde::de::Error::missing_field("qname"))?,
            value: value.ok_or_else(|| serde::de::Error::missing_field("value"))?,
        })
    }
}
