use std::fmt;

use serde::{Deserialize, Serialize};

use super::graph::DocumentGraph;

/// Hierarchical location of a document: corpus, subcorpora, document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CorpusPath {
    segments: Vec<String>,
}

impl CorpusPath {
    /// Build a path from explicit segments; empty segments are dropped
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Parse a slash separated path such as `salt:/rootCorpus/subCorpus1/doc1`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix("salt:").unwrap_or(trimmed);
        Self::new(body.split('/'))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment (corpus root)
    pub fn root(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The last segment (document name)
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for CorpusPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<String> for CorpusPath {
    fn from(raw: String) -> Self {
        CorpusPath::parse(&raw)
    }
}

impl From<&str> for CorpusPath {
    fn from(raw: &str) -> Self {
        CorpusPath::parse(raw)
    }
}

impl From<CorpusPath> for String {
    fn from(path: CorpusPath) -> Self {
        path.to_string()
    }
}

/// A document: its corpus location plus its annotation graph
#[derive(Debug, Clone)]
pub struct Document {
    pub path: CorpusPath,
    pub graph: DocumentGraph,
}

impl Document {
    pub fn new(path: CorpusPath, graph: DocumentGraph) -> Self {
        Self { path, graph }
    }
}
