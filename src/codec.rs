//! Flat, lossless serialization of query trees.
//!
//! A tree serializes to a comma-joined pre-order token stream where every
//! node contributes its value followed by its child count:
//! `value,child_count(,child...)*`. Deserialization is the exact inverse and
//! rejects any stream whose declared arities disagree with the values or
//! with the tokens actually present.

use crate::error::{EvoqueryError, Result};
use crate::tree::Node;
use crate::types::Connective;
use crate::vocabulary::Vocabulary;
use std::sync::Arc;

pub fn serialize(tree: &Node) -> String {
    let mut tokens = Vec::with_capacity(tree.node_count() * 2);
    collect_tokens(tree, &mut tokens);
    tokens.join(",")
}

fn collect_tokens(node: &Node, tokens: &mut Vec<String>) {
    tokens.push(node.value().as_token().to_string());
    tokens.push(node.children().len().to_string());
    for child in node.children() {
        collect_tokens(child, tokens);
    }
}

/// Rebuild a tree from [`serialize`] output. All leaves of the rebuilt tree
/// share `vocabulary`.
pub fn deserialize(serialized: &str, vocabulary: Arc<Vocabulary>) -> Result<Node> {
    let tokens: Vec<&str> = serialized.split(',').collect();
    let mut cursor = 0;
    let tree = parse_node(&tokens, &mut cursor, &vocabulary)?;
    if cursor != tokens.len() {
        return Err(EvoqueryError::Format(format!(
            "{} trailing tokens after a complete tree",
            tokens.len() - cursor
        )));
    }
    Ok(tree)
}

fn parse_node(tokens: &[&str], cursor: &mut usize, vocabulary: &Arc<Vocabulary>) -> Result<Node> {
    let value = *tokens
        .get(*cursor)
        .ok_or_else(|| EvoqueryError::Format("truncated token stream".to_string()))?;
    let count_token = *tokens
        .get(*cursor + 1)
        .ok_or_else(|| EvoqueryError::Format(format!("missing child count after '{}'", value)))?;
    let child_count: usize = count_token.parse().map_err(|_| {
        EvoqueryError::Format(format!("invalid child count '{}' for '{}'", count_token, value))
    })?;
    *cursor += 2;

    match Connective::from_token(value) {
        Some(op) if op.arity() != child_count => {
            return Err(EvoqueryError::Format(format!(
                "{} declared with {} children, expected {}",
                value,
                child_count,
                op.arity()
            )));
        }
        None if child_count != 0 => {
            return Err(EvoqueryError::Format(format!(
                "term '{}' declared with {} children",
                value, child_count
            )));
        }
        _ => {}
    }

    let mut children = Vec::with_capacity(child_count);
    for _ in 0..child_count {
        children.push(parse_node(tokens, cursor, vocabulary)?);
    }

    match Connective::from_token(value) {
        Some(op) => Node::operation(op, children, vocabulary.clone()),
        None => Ok(Node::leaf(value, vocabulary.clone())),
    }
}
