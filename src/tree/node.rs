use crate::error::{EvoqueryError, Result};
use crate::types::{Connective, NodeValue};
use crate::vocabulary::Vocabulary;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A node of a boolean query expression tree.
///
/// Leaves hold a vocabulary term; internal nodes hold a connective with the
/// arity it requires (AND/OR take two children, NOT takes one). Every node
/// carries the vocabulary its leaf values are drawn from, so mutation can
/// pick replacement words without global state. Children are owned, which
/// rules out sharing and cycles by construction.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) value: NodeValue,
    pub(crate) children: Vec<Node>,
    pub(crate) vocabulary: Arc<Vocabulary>,
}

impl PartialEq for Node {
    /// Structural equality: value and children, vocabulary handle ignored.
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.children == other.children
    }
}

impl Eq for Node {}

impl Node {
    /// A leaf holding `term`. Zero children, always a valid node.
    pub fn leaf(term: impl Into<String>, vocabulary: Arc<Vocabulary>) -> Node {
        Node {
            value: NodeValue::Term(term.into()),
            children: Vec::new(),
            vocabulary,
        }
    }

    /// An operation node. Fails when `children` does not match the
    /// connective's arity.
    pub fn operation(
        op: Connective,
        children: Vec<Node>,
        vocabulary: Arc<Vocabulary>,
    ) -> Result<Node> {
        Self::new(NodeValue::Op(op), children, vocabulary)
    }

    pub fn new(value: NodeValue, children: Vec<Node>, vocabulary: Arc<Vocabulary>) -> Result<Node> {
        let node = Node {
            value,
            children,
            vocabulary,
        };
        node.ensure_valid()?;
        Ok(node)
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn connective(&self) -> Option<Connective> {
        match self.value {
            NodeValue::Op(op) => Some(op),
            NodeValue::Term(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_operation(&self) -> bool {
        match self.value {
            NodeValue::Op(op) => self.children.len() == op.arity(),
            NodeValue::Term(_) => false,
        }
    }

    /// True when the node and all of its children are structurally valid.
    pub fn is_valid(&self) -> bool {
        let shape_ok = match self.value {
            NodeValue::Term(_) => self.children.is_empty(),
            NodeValue::Op(op) => self.children.len() == op.arity(),
        };
        shape_ok && self.children.iter().all(Node::is_valid)
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(EvoqueryError::Structural(format!(
                "'{}' with {} children",
                self.value.as_token(),
                self.children.len()
            )))
        }
    }

    /// Render the tree as a textual boolean query.
    ///
    /// Children of binary connectives are rendered in stored order and fully
    /// parenthesized; multi-word terms are double-quoted so the target query
    /// syntax keeps them as one phrase.
    pub fn to_request_string(&self) -> String {
        match &self.value {
            NodeValue::Term(term) => {
                if Vocabulary::is_word(term) {
                    term.clone()
                } else {
                    format!("\"{}\"", term)
                }
            }
            NodeValue::Op(Connective::Not) => {
                format!("NOT {}", self.children[0].to_request_string())
            }
            NodeValue::Op(op) => format!(
                "({} {} {})",
                self.children[0].to_request_string(),
                op,
                self.children[1].to_request_string()
            ),
        }
    }

    /// All nodes of the tree in pre-order, self included.
    pub fn get_all_nodes(&self) -> Vec<&Node> {
        let mut nodes = Vec::with_capacity(self.node_count());
        self.collect_nodes(&mut nodes);
        nodes
    }

    fn collect_nodes<'a>(&'a self, nodes: &mut Vec<&'a Node>) {
        nodes.push(self);
        for child in &self.children {
            child.collect_nodes(nodes);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Node at `index` in pre-order, counting self as 0.
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        if index == 0 {
            return Some(self);
        }
        let mut remaining = index - 1;
        for child in &self.children {
            let size = child.node_count();
            if remaining < size {
                return child.node_at(remaining);
            }
            remaining -= size;
        }
        None
    }

    pub fn node_at_mut(&mut self, index: usize) -> Option<&mut Node> {
        if index == 0 {
            return Some(self);
        }
        let mut remaining = index - 1;
        for child in &mut self.children {
            let size = child.node_count();
            if remaining < size {
                return child.node_at_mut(remaining);
            }
            remaining -= size;
        }
        None
    }

    /// A node selected uniformly over the flattened pre-order list, self and
    /// leaves included. Depth gives no node special treatment.
    pub fn get_random_node<R: rand::Rng>(&self, rng: &mut R) -> &Node {
        self.node_at(rng.gen_range(0..self.node_count()))
            .unwrap_or(self)
    }

    /// Map every distinct leaf term to a unique symbol-safe name.
    pub fn symbol_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for node in self.get_all_nodes() {
            if let NodeValue::Term(term) = &node.value {
                map.entry(term.clone())
                    .or_insert_with(|| escape_term(term));
            }
        }
        map
    }

    /// Multi-line rendering of the tree shape, one node per line, for logs
    /// and failure messages.
    pub fn tree_diagram(&self) -> String {
        let mut out = self.value.as_token().to_string();
        for child in &self.children {
            let rendered = child.tree_diagram();
            let mut lines = rendered.lines();
            if let Some(first) = lines.next() {
                out.push_str("\n|> ");
                out.push_str(first);
            }
            for line in lines {
                out.push_str("\n|  ");
                out.push_str(line);
            }
        }
        out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_request_string())
    }
}

/// Escape a term into a symbol-safe name. Injective: `_` doubles to `__`
/// before spaces become `_s`, so distinct terms never collide.
pub fn escape_term(term: &str) -> String {
    term.replace('_', "__").replace(' ', "_s")
}

/// Exact inverse of [`escape_term`].
pub fn unescape_term(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());
    let mut chars = symbol.chars();
    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('_') => out.push('_'),
            Some('s') => out.push(' '),
            Some(other) => {
                out.push('_');
                out.push(other);
            }
            None => out.push('_'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trips() {
        for term in [
            "collaboration",
            "remote collaboration",
            "remote_collaboration",
            "a _ b",
            "__",
            "_s",
        ] {
            assert_eq!(unescape_term(&escape_term(term)), term);
        }
    }

    #[test]
    fn escaped_terms_stay_distinct() {
        assert_ne!(escape_term("remote collaboration"), escape_term("remote_collaboration"));
        assert_ne!(escape_term("a_sb"), escape_term("a b"));
    }

    #[test]
    fn escaped_terms_are_symbol_safe() {
        assert!(!escape_term("remote collaboration").contains(' '));
    }
}
