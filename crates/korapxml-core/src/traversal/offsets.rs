use crate::errors::{KorapError, Result};
use crate::model::{DocumentGraph, NodeId, RelationKind, TextId};

/// Relations followed when no foundry-specific traversal is given
pub const DEFAULT_TRAVERSAL: &[RelationKind] = &[RelationKind::Spanning, RelationKind::Dominance];

/// A contiguous `[start, end)` character range in one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub text: TextId,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Resolve the single character range a node covers in `text`
///
/// Walks outgoing relations whose kind is in `traversal`, collecting the
/// textual range of every reachable token. A token is a leaf: its own
/// range is collected and its out-edges are not followed. Ranges are
/// grouped by text and each group spans `[min(start), max(end))`.
///
/// # Errors
///
/// - `AmbiguousSpan` if the ranges fall into zero or several texts
/// - `SpanOutsideText` if the only text is not `text`
/// - `CycleDetected` if a relation points back to a node on the current path
pub fn resolve_range(
    graph: &DocumentGraph,
    node: NodeId,
    text: TextId,
    traversal: &[RelationKind],
) -> Result<TextRange> {
    let sequences = collect_sequences(graph, node, traversal)?;

    match sequences.as_slice() {
        [only] if only.text == text => Ok(*only),
        [only] => Err(KorapError::SpanOutsideText {
            node_id: graph.node(node).name.clone(),
            text: graph.text(text).name.clone(),
            covered: graph.text(only.text).name.clone(),
        }),
        _ => Err(KorapError::AmbiguousSpan {
            node_id: graph.node(node).name.clone(),
            sequences: sequences.len(),
        }),
    }
}

/// Whether any token reachable from `node` is anchored in `text`
///
/// Unlike [`resolve_range`] this never fails: nodes already visited are
/// not revisited, so cycles simply end the walk.
pub fn reaches_text(
    graph: &DocumentGraph,
    node: NodeId,
    text: TextId,
    traversal: &[RelationKind],
) -> bool {
    let mut visited = vec![false; graph.node_count()];
    let mut worklist = vec![node];

    while let Some(current) = worklist.pop() {
        if visited[current.index()] {
            continue;
        }
        visited[current.index()] = true;

        if let Some(anchor) = graph.anchor(current) {
            if anchor.text == text {
                return true;
            }
            continue;
        }
        worklist.extend(
            graph
                .out_relations(current)
                .filter(|(_, rel)| traversal.contains(&rel.kind))
                .map(|(_, rel)| rel.target),
        );
    }
    false
}

/// Per-text ranges reachable from `node`, in first-seen text order
fn collect_sequences(
    graph: &DocumentGraph,
    node: NodeId,
    traversal: &[RelationKind],
) -> Result<Vec<TextRange>> {
    let mut colors = vec![Color::White; graph.node_count()];
    let mut sequences: Vec<TextRange> = Vec::new();
    // (node, index of the next out-edge to inspect)
    let mut stack: Vec<(NodeId, usize)> = vec![(node, 0)];
    colors[node.index()] = Color::Gray;

    while let Some(frame) = stack.last_mut() {
        let (current, next_edge) = *frame;

        if let Some(anchor) = graph.anchor(current) {
            merge_range(&mut sequences, anchor.text, anchor.start, anchor.end);
            colors[current.index()] = Color::Black;
            stack.pop();
            continue;
        }

        let next = graph
            .out_relations(current)
            .enumerate()
            .skip(next_edge)
            .find(|(_, (_, rel))| traversal.contains(&rel.kind));

        match next {
            Some((position, (_, rel))) => {
                frame.1 = position + 1;
                let target = rel.target;
                match colors[target.index()] {
                    Color::White => {
                        colors[target.index()] = Color::Gray;
                        stack.push((target, 0));
                    }
                    Color::Gray => {
                        return Err(KorapError::CycleDetected {
                            node_id: graph.node(node).name.clone(),
                            via: graph.node(target).name.clone(),
                        });
                    }
                    // Shared sub-structure, already collected
                    Color::Black => {}
                }
            }
            None => {
                colors[current.index()] = Color::Black;
                stack.pop();
            }
        }
    }

    Ok(sequences)
}

fn merge_range(sequences: &mut Vec<TextRange>, text: TextId, start: usize, end: usize) {
    match sequences.iter_mut().find(|r| r.text == text) {
        Some(range) => {
            range.start = range.start.min(start);
            range.end = range.end.max(end);
        }
        None => sequences.push(TextRange { text, start, end }),
    }
}
