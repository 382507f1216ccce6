use anyhow::Result;
use evoquery::codec;
use evoquery::config::{EvolutionConfig, MutationConfig};
use evoquery::engines::generation::{ConsoleProgressCallback, GeneticSearch};
use evoquery::simplify;
use evoquery::tree::{Node, RequestTree};
use evoquery::types::{Connective, NodeValue};
use evoquery::vocabulary::Vocabulary;
use std::collections::BTreeSet;
use std::sync::Arc;

const INCLUDE_VOCABULARY: &str = r#"{
    "asymetric": ["asymetric", "asym", "asymetrical", "mixed"],
    "collaboration": ["collaboration", "teamwork", "remote collaboration", "distance collaboration"],
    "interaction": ["interaction", "interact", "interactivity", "interactive"],
    "system": ["system", "systems", "systematic", "systemic"]
}"#;

const EXCLUDE_VOCABULARY: &str = r#"{"batman": ["batman", "robin", "iron-man"]}"#;

/// Offline stand-in for a live result-count scorer: rewards queries whose
/// include side spans many vocabulary categories and penalizes bloat.
fn coverage_score(tree: &RequestTree) -> f64 {
    let categories: BTreeSet<&str> = tree
        .include_tree()
        .get_all_nodes()
        .into_iter()
        .filter_map(|node| match node.value() {
            NodeValue::Term(term) => node.vocabulary().category_of(term),
            NodeValue::Op(_) => None,
        })
        .collect();
    categories.len() as f64 * 10.0 - tree.root().node_count() as f64 * 0.5
}

fn main() -> Result<()> {
    env_logger::init();

    let include_vocabulary = Arc::new(Vocabulary::from_json_str(INCLUDE_VOCABULARY)?);
    let exclude_vocabulary = Arc::new(Vocabulary::from_json_str(EXCLUDE_VOCABULARY)?);

    let include = Node::operation(
        Connective::And,
        vec![
            Node::operation(
                Connective::Or,
                vec![
                    Node::leaf("asymetric", include_vocabulary.clone()),
                    Node::leaf("remote collaboration", include_vocabulary.clone()),
                ],
                include_vocabulary.clone(),
            )?,
            Node::leaf("interaction", include_vocabulary.clone()),
        ],
        include_vocabulary,
    )?;
    let exclude = Node::leaf("batman", exclude_vocabulary);
    let seed_tree = RequestTree::new(include, exclude)?;

    println!("Seed query:  {}", seed_tree);

    let config = EvolutionConfig {
        population_size: 20,
        nb_generations: 15,
        ..EvolutionConfig::default()
    };
    let mut search = GeneticSearch::new(config, MutationConfig::default(), coverage_score);
    let best = search.run(seed_tree, &mut ConsoleProgressCallback)?;

    println!("Best query:  {}", best);
    println!("Serialized:  {}", codec::serialize(best.root()));
    println!("Simplified:  {}", simplify::simplify(best.root())?);

    Ok(())
}
