//! Seed parser with validation
//!
//! Parses YAML or JSON and validates schema version, ID uniqueness, token
//! ranges and referential integrity

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;

/// Parse a seed file from a path
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an `InvalidInput` error if the file cannot be read, parsed or
/// validated.
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file {}: {}", path.display(), e)))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let seed: SeedV0 = serde_json::from_str(&content)
            .map_err(|e| seed_validation(&format!("JSON parse error: {}", e)))?;
        validate_seed(&seed)?;
        return Ok(seed);
    }

    parse_seed_str(&content)
}

/// Parse a YAML seed from a string
///
/// # Errors
///
/// Returns an `InvalidInput` error if the content cannot be parsed or
/// validated.
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    // Parse YAML
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    // Validate seed
    validate_seed(&seed)?;

    Ok(seed)
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0) -> Result<()> {
    // Validate schema version
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    // Validate text name uniqueness and remember lengths for range checks
    let mut text_lengths: HashMap<&str, usize> = HashMap::new();
    for text in &seed.texts {
        if text_lengths
            .insert(&text.name, text.content.chars().count())
            .is_some()
        {
            return Err(seed_validation(&format!("Duplicate text name {}", text.name)));
        }
    }

    // Validate node ID uniqueness across tokens, spans and structures
    let mut node_ids = HashSet::new();
    let all_ids = seed
        .tokens
        .iter()
        .map(|t| &t.id)
        .chain(seed.spans.iter().map(|s| &s.id))
        .chain(seed.structures.iter().map(|s| &s.id));
    for id in all_ids {
        if !node_ids.insert(id.as_str()) {
            return Err(seed_validation(&format!("Duplicate node id {}", id)));
        }
    }

    // Validate token anchors
    for token in &seed.tokens {
        let len = text_lengths.get(token.text.as_str()).ok_or_else(|| {
            seed_validation(&format!(
                "Token {} references non-existent text: {}",
                token.id, token.text
            ))
        })?;
        if token.start > token.end || token.end > *len {
            return Err(seed_validation(&format!(
                "Token {} has invalid range [{}, {}) in text {} of length {}",
                token.id, token.start, token.end, token.text, len
            )));
        }
    }

    // Validate referential integrity for spans, relations and layers
    let token_ids: HashSet<&str> = seed.tokens.iter().map(|t| t.id.as_str()).collect();
    for span in &seed.spans {
        if span.tokens.is_empty() {
            return Err(seed_validation(&format!("Span {} covers no tokens", span.id)));
        }
        for tok in &span.tokens {
            if !token_ids.contains(tok.as_str()) {
                return Err(seed_validation(&format!(
                    "Span {} references non-existent token: {}",
                    span.id, tok
                )));
            }
        }
    }

    for relation in &seed.relations {
        for endpoint in [&relation.source, &relation.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(seed_validation(&format!(
                    "Relation {} -> {} references non-existent node: {}",
                    relation.source, relation.target, endpoint
                )));
            }
        }
    }

    for layer in &seed.layers {
        if layer.name.trim().is_empty() {
            return Err(seed_validation("Layer name cannot be empty"));
        }
        for node in &layer.nodes {
            if !node_ids.contains(node.as_str()) {
                return Err(seed_validation(&format!(
                    "Layer {} references non-existent node: {}",
                    layer.name, node
                )));
            }
        }
    }

    Ok(())
}
