use crate::config::MutationConfig;
use crate::engines::generation::operators;
use crate::error::{EvoqueryError, Result};
use crate::tree::Node;
use crate::types::{Connective, NodeValue};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// A query tree with a fixed overall shape: a binary connective whose first
/// child is the include subtree and whose second child is always a NOT node
/// wrapping the exclude subtree.
///
/// The root starts out as AND and only its connective value may flip under
/// mutation; the binary shape and the reserved NOT node never change. The
/// include and exclude subtrees keep their own vocabularies, so mutation
/// draws replacement words from the right word pool on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTree {
    root: Node,
}

impl RequestTree {
    /// Combine an include subtree and an exclude subtree into the fixed
    /// AND(include, NOT(exclude)) shape. The two top-level nodes get the
    /// union of both subtrees' vocabularies.
    pub fn new(include: Node, exclude: Node) -> Result<Self> {
        let composite = Arc::new(include.vocabulary().merge(exclude.vocabulary())?);
        let exclude_vocabulary = exclude.vocabulary().clone();
        let negated = Node::operation(Connective::Not, vec![exclude], exclude_vocabulary)?;
        let root = Node::operation(Connective::And, vec![include, negated], composite)?;
        Ok(RequestTree { root })
    }

    /// Re-wrap an existing tree, checking the include/NOT(exclude) shape.
    pub fn from_node(root: Node) -> Result<Self> {
        let shape_ok = matches!(
            root.value(),
            NodeValue::Op(Connective::And) | NodeValue::Op(Connective::Or)
        ) && root.children().len() == 2
            && root.children()[1].connective() == Some(Connective::Not);
        if !shape_ok {
            return Err(EvoqueryError::Structural(
                "request tree root must be a binary connective over (include, NOT exclude)"
                    .to_string(),
            ));
        }
        root.ensure_valid()?;
        Ok(RequestTree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn include_tree(&self) -> &Node {
        &self.root.children()[0]
    }

    pub fn exclude_tree(&self) -> &Node {
        &self.root.children()[1].children()[0]
    }

    pub fn to_request_string(&self) -> String {
        self.root.to_request_string()
    }

    /// Mutate one random node while preserving the fixed shape: the reserved
    /// NOT node is never selected, and when the root itself is drawn only a
    /// value alteration is applied so the root stays a binary connective.
    pub fn alter_random_node<R: Rng>(&mut self, config: &MutationConfig, rng: &mut R) -> Result<()> {
        let total = self.root.node_count();
        let reserved = 1 + self.include_tree().node_count();

        let index = loop {
            let candidate = rng.gen_range(0..total);
            if candidate != reserved {
                break candidate;
            }
        };

        if index == 0 {
            return operators::alter_value(&mut self.root, config, rng);
        }

        let node = self
            .root
            .node_at_mut(index)
            .ok_or_else(|| EvoqueryError::Structural(format!("no node at index {}", index)))?;
        operators::alter_node(node, config, rng)
    }

    /// Apply exactly `n` sequential random alterations in place.
    pub fn apply_alterations<R: Rng>(
        &mut self,
        n: usize,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Result<()> {
        for _ in 0..n {
            self.alter_random_node(config, rng)?;
        }
        Ok(())
    }
}

impl fmt::Display for RequestTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_request_string())
    }
}
