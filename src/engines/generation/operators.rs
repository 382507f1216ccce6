use crate::config::MutationConfig;
use crate::error::{EvoqueryError, Result};
use crate::tree::Node;
use crate::types::{Connective, NodeValue};
use rand::Rng;

/// Randomly alter the value of `node` in place.
///
/// Leaves keep a synonym from their own category with probability
/// `keep_similar_word_proba`, otherwise (or when the category holds no other
/// member) they take a different word from the whole vocabulary. Binary
/// connectives flip AND<->OR. NOT has only one valid value and is left
/// untouched.
pub fn alter_value<R: Rng>(node: &mut Node, config: &MutationConfig, rng: &mut R) -> Result<()> {
    match &node.value {
        NodeValue::Term(term) => {
            let term = term.clone();
            let replacement = if rng.gen::<f64>() < config.keep_similar_word_proba {
                pick_synonym(&term, node, rng)?
            } else {
                None
            };
            let replacement = match replacement {
                Some(word) => Some(word),
                None => pick_other_word(&term, node, rng),
            };
            if let Some(word) = replacement {
                node.value = NodeValue::Term(word);
            }
        }
        NodeValue::Op(op) => {
            if let Some(flipped) = op.flipped() {
                node.value = NodeValue::Op(flipped);
            }
        }
    }
    node.ensure_valid()
}

/// Randomly alter the structure of `node` in place.
///
/// A leaf always grows into a random binary connective over its old value
/// and a fresh random-word leaf. An operation grows the same way with
/// probability `grow_proba` (the whole previous subtree becomes the first
/// child), otherwise it shrinks to one of its children chosen uniformly.
pub fn alter_structure<R: Rng>(node: &mut Node, config: &MutationConfig, rng: &mut R) -> Result<()> {
    if node.is_leaf() || rng.gen::<f64>() < config.grow_proba {
        grow(node, rng)?;
    } else {
        shrink(node, rng);
    }
    node.ensure_valid()
}

/// Alter the chosen node: structure with probability `alter_structure_proba`,
/// value otherwise.
pub fn alter_node<R: Rng>(node: &mut Node, config: &MutationConfig, rng: &mut R) -> Result<()> {
    if rng.gen::<f64>() < config.alter_structure_proba {
        alter_structure(node, config, rng)
    } else {
        alter_value(node, config, rng)
    }
}

/// Pick one node of `tree` uniformly over the flattened pre-order list
/// (depth gives no node special treatment) and alter it.
pub fn alter_random_node<R: Rng>(tree: &mut Node, config: &MutationConfig, rng: &mut R) -> Result<()> {
    let index = rng.gen_range(0..tree.node_count());
    let node = tree
        .node_at_mut(index)
        .ok_or_else(|| EvoqueryError::Structural(format!("no node at index {}", index)))?;
    alter_node(node, config, rng)
}

/// A synonym of `term` from its own category, excluding `term` itself.
/// `Ok(None)` when the category has no other member; `Lookup` when the term
/// is in no category at all.
fn pick_synonym<R: Rng>(term: &str, node: &Node, rng: &mut R) -> Result<Option<String>> {
    let similar = node.vocabulary.similar_words(term)?;
    let candidates: Vec<&str> = similar
        .iter()
        .map(String::as_str)
        .filter(|word| *word != term)
        .collect();
    Ok(pick_uniform(&candidates, rng))
}

/// A word from any category of the node's vocabulary, excluding `current`.
fn pick_other_word<R: Rng>(current: &str, node: &Node, rng: &mut R) -> Option<String> {
    let candidates: Vec<&str> = node
        .vocabulary
        .words()
        .into_iter()
        .filter(|word| *word != current)
        .collect();
    pick_uniform(&candidates, rng)
}

fn pick_uniform<R: Rng>(candidates: &[&str], rng: &mut R) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())].to_string())
}

fn random_binary<R: Rng>(rng: &mut R) -> Connective {
    if rng.gen_bool(0.5) {
        Connective::And
    } else {
        Connective::Or
    }
}

fn grow<R: Rng>(node: &mut Node, rng: &mut R) -> Result<()> {
    let word = pick_other_word(node.value.as_token(), node, rng).ok_or_else(|| {
        EvoqueryError::Lookup("vocabulary holds no alternative word to grow with".to_string())
    })?;
    let vocabulary = node.vocabulary.clone();
    let old_value = std::mem::replace(&mut node.value, NodeValue::Op(random_binary(rng)));
    let old_children = std::mem::take(&mut node.children);
    let kept = Node {
        value: old_value,
        children: old_children,
        vocabulary: vocabulary.clone(),
    };
    node.children = vec![kept, Node::leaf(word, vocabulary)];
    Ok(())
}

fn shrink<R: Rng>(node: &mut Node, rng: &mut R) {
    let index = rng.gen_range(0..node.children.len());
    let child = node.children.swap_remove(index);
    node.value = child.value;
    node.children = child.children;
}
