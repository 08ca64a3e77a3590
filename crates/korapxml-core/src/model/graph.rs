use std::collections::HashMap;

use super::annotation::Annotation;
use crate::errors::{KorapError, Result};

/// Index of a structural node in a [`DocumentGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Index of a textual data source in a [`DocumentGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(usize);

/// Index of a relation in a [`DocumentGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TextId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RelationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of structural node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Anchored directly into a text through one textual relation
    Token,
    /// Covers tokens through spanning relations
    Span,
    /// Tree node covering other nodes through dominance relations
    Structure,
}

/// Kind of edge between two structural nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Spanning,
    Dominance,
    Pointing,
}

/// A structural node (token, span or structure)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Graph-local unique name; used as the fragment ID in exported files
    pub name: String,
    pub kind: NodeKind,
    pub annotations: Vec<Annotation>,
}

impl Node {
    /// Find the first annotation with the given namespace and name
    pub fn annotation(&self, qname: &korapxml_core_types::QName) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.has_qname(qname))
    }

    pub fn is_token(&self) -> bool {
        self.kind == NodeKind::Token
    }
}

/// A named, immutable primary text
#[derive(Debug, Clone, PartialEq)]
pub struct TextualDs {
    pub name: String,
    pub content: String,
    char_len: usize,
}

impl TextualDs {
    /// Length of the text in characters
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }
}

/// Anchors one token to a `[start, end)` character range of one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextualRelation {
    pub token: NodeId,
    pub text: TextId,
    pub start: usize,
    pub end: usize,
}

/// Directed edge between two structural nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub source: NodeId,
    pub target: NodeId,
    /// Optional relation type (e.g. `edge`, `dep`)
    pub rel_type: Option<String>,
    pub annotations: Vec<Annotation>,
}

/// A named, ordered set of nodes representing one kind of annotation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub name: String,
    pub nodes: Vec<NodeId>,
}

/// Arena-backed annotation graph of one document
///
/// Nodes, texts and relations are addressed by index. The graph is built
/// once by an upstream stage and only read during export; every accessor
/// takes `&self`, so one graph can be shared across export threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    nodes: Vec<Node>,
    node_index: HashMap<String, NodeId>,
    texts: Vec<TextualDs>,
    text_index: HashMap<String, TextId>,
    textual_relations: Vec<TextualRelation>,
    /// Per node: index into `textual_relations`, tokens only
    anchors: Vec<Option<usize>>,
    relations: Vec<Relation>,
    out_edges: Vec<Vec<RelationId>>,
    layers: Vec<Layer>,
}

impl DocumentGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Construction =====

    /// Add a primary text
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTextName` if a text with that name already exists.
    pub fn add_text(&mut self, name: impl Into<String>, content: impl Into<String>) -> Result<TextId> {
        let name = name.into();
        if self.text_index.contains_key(&name) {
            return Err(KorapError::DuplicateTextName { text: name });
        }
        let content = content.into();
        let id = TextId(self.texts.len());
        self.texts.push(TextualDs {
            char_len: content.chars().count(),
            name: name.clone(),
            content,
        });
        self.text_index.insert(name, id);
        Ok(id)
    }

    /// Add a structural node of the given kind
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNodeName` if the name is already taken.
    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> Result<NodeId> {
        let name = name.into();
        if self.node_index.contains_key(&name) {
            return Err(KorapError::DuplicateNodeName { node_id: name });
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.clone(),
            kind,
            annotations: Vec::new(),
        });
        self.anchors.push(None);
        self.out_edges.push(Vec::new());
        self.node_index.insert(name, id);
        Ok(id)
    }

    /// Add a token and anchor it to `[start, end)` of `text` in one step
    ///
    /// # Errors
    ///
    /// See [`DocumentGraph::add_node`] and [`DocumentGraph::anchor_token`].
    pub fn add_token(
        &mut self,
        name: impl Into<String>,
        text: TextId,
        start: usize,
        end: usize,
    ) -> Result<NodeId> {
        let id = self.add_node(name, NodeKind::Token)?;
        self.anchor_token(id, text, start, end)?;
        Ok(id)
    }

    /// Anchor a token to a character range of a text
    ///
    /// # Errors
    ///
    /// - `NotAToken` if the node is a span or structure
    /// - `TokenAlreadyAnchored` if the token already has a textual relation
    /// - `InvalidRange` if `start > end` or `end` exceeds the text length
    pub fn anchor_token(&mut self, token: NodeId, text: TextId, start: usize, end: usize) -> Result<()> {
        let node = self.checked_node(token)?;
        if node.kind != NodeKind::Token {
            return Err(KorapError::NotAToken {
                node_id: node.name.clone(),
            });
        }
        if self.anchors[token.0].is_some() {
            return Err(KorapError::TokenAlreadyAnchored {
                node_id: node.name.clone(),
            });
        }
        let len = self.checked_text(text)?.len();
        if start > end || end > len {
            return Err(KorapError::InvalidRange {
                node_id: node.name.clone(),
                start,
                end,
                len,
            });
        }
        self.anchors[token.0] = Some(self.textual_relations.len());
        self.textual_relations.push(TextualRelation {
            token,
            text,
            start,
            end,
        });
        Ok(())
    }

    /// Add a directed relation between two nodes
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if either endpoint is not part of this graph.
    pub fn add_relation(&mut self, kind: RelationKind, source: NodeId, target: NodeId) -> Result<RelationId> {
        self.checked_node(source)?;
        self.checked_node(target)?;
        let id = RelationId(self.relations.len());
        self.relations.push(Relation {
            kind,
            source,
            target,
            rel_type: None,
            annotations: Vec::new(),
        });
        self.out_edges[source.0].push(id);
        Ok(id)
    }

    /// Set the type of an existing relation
    pub fn set_relation_type(&mut self, relation: RelationId, rel_type: impl Into<String>) -> Result<()> {
        let rel = self
            .relations
            .get_mut(relation.0)
            .ok_or_else(|| KorapError::Internal {
                message: format!("relation index {} out of bounds", relation.0),
            })?;
        rel.rel_type = Some(rel_type.into());
        Ok(())
    }

    /// Attach an annotation to a node
    pub fn annotate(&mut self, node: NodeId, annotation: Annotation) -> Result<()> {
        self.checked_node(node)?;
        self.nodes[node.0].annotations.push(annotation);
        Ok(())
    }

    /// Append a node to a named layer, creating the layer on first use
    ///
    /// A layer is a set: adding a member again keeps its first position.
    pub fn add_to_layer(&mut self, layer: &str, node: NodeId) -> Result<()> {
        self.checked_node(node)?;
        match self.layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => {
                if !existing.nodes.contains(&node) {
                    existing.nodes.push(node);
                }
            }
            None => self.layers.push(Layer {
                name: layer.to_string(),
                nodes: vec![node],
            }),
        }
        Ok(())
    }

    // ===== Lookup =====

    /// Get a node by ID
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node by its name
    pub fn node_by_name(&self, name: &str) -> Result<NodeId> {
        self.node_index
            .get(name)
            .copied()
            .ok_or_else(|| KorapError::NodeNotFound {
                node_id: name.to_string(),
            })
    }

    /// Iterate over all node IDs in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a text by ID
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this graph.
    pub fn text(&self, id: TextId) -> &TextualDs {
        &self.texts[id.0]
    }

    /// Look up a text by its name
    pub fn text_by_name(&self, name: &str) -> Result<TextId> {
        self.text_index
            .get(name)
            .copied()
            .ok_or_else(|| KorapError::TextNotFound {
                text: name.to_string(),
            })
    }

    /// Iterate over all text IDs in insertion order
    pub fn text_ids(&self) -> impl Iterator<Item = TextId> + '_ {
        (0..self.texts.len()).map(TextId)
    }

    /// The textual relation of a token, if it is anchored
    pub fn anchor(&self, node: NodeId) -> Option<&TextualRelation> {
        self.anchors
            .get(node.0)
            .copied()
            .flatten()
            .map(|idx| &self.textual_relations[idx])
    }

    /// All textual relations in anchoring order
    pub fn textual_relations(&self) -> &[TextualRelation] {
        &self.textual_relations
    }

    /// Textual relations targeting one text, in anchoring order
    pub fn tokens_of(&self, text: TextId) -> impl Iterator<Item = &TextualRelation> + '_ {
        self.textual_relations.iter().filter(move |r| r.text == text)
    }

    /// Get a relation by ID
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this graph.
    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.0]
    }

    /// Outgoing relations of a node, in insertion order
    pub fn out_relations(&self, node: NodeId) -> impl Iterator<Item = (RelationId, &Relation)> + '_ {
        self.out_edges
            .get(node.0)
            .into_iter()
            .flatten()
            .map(move |id| (*id, &self.relations[id.0]))
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn checked_node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or_else(|| KorapError::NodeNotFound {
            node_id: format!("#{}", id.0),
        })
    }

    fn checked_text(&self, id: TextId) -> Result<&TextualDs> {
        self.texts.get(id.0).ok_or_else(|| KorapError::TextNotFound {
            text: format!("#{}", id.0),
        })
    }
}
