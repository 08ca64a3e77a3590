//! Export configuration
//!
//! Every field has a default, so an empty YAML or JSON document is a valid
//! configuration. The foundry mapping accepts either a list of
//! `{layer, foundry}` entries or the compact property form
//! `"layer1->TreeTagger, layer2->CoreNLP"`.

use serde::{Deserialize, Serialize};

use crate::errors::{KorapError, Result};
use crate::log_skip;
use crate::types::QName;

/// Separator between layer and foundry in the compact mapping form
pub const MAPPING_ARROW: &str = "->";

/// Complete configuration of one export run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub base: BaseConfig,
    pub tree_tagger: TreeTaggerConfig,
    pub corenlp: CoreNlpConfig,
    pub foundry_mapping: FoundryMapping,
}

/// Qualified names marking sentence and paragraph spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    pub sentence: QName,
    pub paragraph: QName,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            sentence: QName::parse("salt::SENTENCE"),
            paragraph: QName::parse("salt::paragraph"),
        }
    }
}

/// Qualified names of the token annotations written to `tree_tagger/morpho`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeTaggerConfig {
    pub lemma: QName,
    pub pos: QName,
}

impl Default for TreeTaggerConfig {
    fn default() -> Self {
        Self {
            lemma: QName::parse("salt::LEMMA"),
            pos: QName::parse("salt::POS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreNlpConfig {
    /// File prefix for relation targets that are tokens
    pub token_file: String,
}

impl Default for CoreNlpConfig {
    fn default() -> Self {
        Self {
            token_file: "morpho".to_string(),
        }
    }
}

/// One `layer -> foundry` assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryAssignment {
    pub layer: String,
    pub foundry: String,
}

impl FoundryAssignment {
    pub fn new(layer: impl Into<String>, foundry: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            foundry: foundry.into(),
        }
    }

    /// Parse a single `layer->Foundry` item
    ///
    /// # Errors
    ///
    /// Returns `InvalidFoundryMapping` if the arrow is missing or either
    /// side is empty after trimming.
    pub fn parse(item: &str) -> Result<Self> {
        let invalid = || KorapError::InvalidFoundryMapping {
            entry: item.to_string(),
        };
        let (layer, foundry) = item.split_once(MAPPING_ARROW).ok_or_else(invalid)?;
        let (layer, foundry) = (layer.trim(), foundry.trim());
        if layer.is_empty() || foundry.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(layer, foundry))
    }
}

/// Ordered list of foundry assignments; order is preserved on export
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "MappingRepr", into = "Vec<FoundryAssignment>")]
pub struct FoundryMapping {
    entries: Vec<FoundryAssignment>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingRepr {
    Compact(String),
    Entries(Vec<FoundryAssignment>),
}

impl From<MappingRepr> for FoundryMapping {
    fn from(repr: MappingRepr) -> Self {
        match repr {
            MappingRepr::Compact(raw) => FoundryMapping::parse(&raw),
            MappingRepr::Entries(entries) => FoundryMapping { entries },
        }
    }
}

impl From<FoundryMapping> for Vec<FoundryAssignment> {
    fn from(mapping: FoundryMapping) -> Self {
        mapping.entries
    }
}

impl FoundryMapping {
    pub fn new(entries: Vec<FoundryAssignment>) -> Self {
        Self { entries }
    }

    /// Parse the compact comma separated form
    ///
    /// Empty items are ignored. Malformed items are logged and skipped.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();
        for item in raw.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            match FoundryAssignment::parse(item) {
                Ok(entry) => entries.push(entry),
                Err(err) => log_skip!("parse_foundry_mapping", err, entry = item),
            }
        }
        Self { entries }
    }

    pub fn push(&mut self, entry: FoundryAssignment) {
        self.entries.push(entry);
    }

    /// Append all entries of another mapping, keeping their order
    pub fn extend(&mut self, other: FoundryMapping) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[FoundryAssignment] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoundryAssignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
