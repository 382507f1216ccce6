use evoquery::config::MutationConfig;
use evoquery::engines::generation::operators;
use evoquery::simplify::{cnf_expr, expr_from_node, simplify, to_cnf};
use evoquery::tree::Node;
use evoquery::types::Connective;
use evoquery::vocabulary::Vocabulary;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::sync::Arc;

fn study_vocabulary() -> Arc<Vocabulary> {
    let document = r#"{
        "asymetric": ["asymetric", "asym", "asymetrical"],
        "collaboration": ["collaboration", "teamwork", "remote collaboration"]
    }"#;
    Arc::new(Vocabulary::from_json_str(document).unwrap())
}

/// AND(NOT(OR(asym, asymetrical)), collaboration)
fn concrete_tree(vocabulary: &Arc<Vocabulary>) -> Node {
    let synonyms = Node::operation(
        Connective::Or,
        vec![
            Node::leaf("asym", vocabulary.clone()),
            Node::leaf("asymetrical", vocabulary.clone()),
        ],
        vocabulary.clone(),
    )
    .unwrap();
    let negated = Node::operation(Connective::Not, vec![synonyms], vocabulary.clone()).unwrap();
    Node::operation(
        Connective::And,
        vec![negated, Node::leaf("collaboration", vocabulary.clone())],
        vocabulary.clone(),
    )
    .unwrap()
}

fn assert_same_truth_table(tree: &Node) {
    let symbols = tree.symbol_map();
    let original = expr_from_node(tree, &symbols).unwrap();
    let normalized = cnf_expr(&to_cnf(&original));

    let variables: Vec<String> = original.variables().into_iter().collect();
    for bits in 0..(1u32 << variables.len()) {
        let assignment: BTreeMap<String, bool> = variables
            .iter()
            .enumerate()
            .map(|(i, symbol)| (symbol.clone(), bits & (1 << i) != 0))
            .collect();
        assert_eq!(
            original.evaluate(&assignment),
            normalized.evaluate(&assignment),
            "truth tables diverge at {:?} for {}",
            assignment,
            tree.to_request_string()
        );
    }
}

#[test]
fn known_tree_renders_its_cnf() {
    let vocabulary = study_vocabulary();
    let tree = concrete_tree(&vocabulary);
    assert_eq!(
        simplify(&tree).unwrap(),
        "(NOT asym AND NOT asymetrical AND collaboration)"
    );
}

#[test]
fn known_tree_truth_table_is_preserved() {
    let vocabulary = study_vocabulary();
    assert_same_truth_table(&concrete_tree(&vocabulary));
}

#[test]
fn multi_word_terms_are_restored_quoted() {
    let vocabulary = study_vocabulary();
    let tree = Node::operation(
        Connective::And,
        vec![
            Node::operation(
                Connective::Or,
                vec![
                    Node::leaf("remote collaboration", vocabulary.clone()),
                    Node::leaf("teamwork", vocabulary.clone()),
                ],
                vocabulary.clone(),
            )
            .unwrap(),
            Node::leaf("asym", vocabulary.clone()),
        ],
        vocabulary.clone(),
    )
    .unwrap();

    assert_eq!(
        simplify(&tree).unwrap(),
        "(asym AND (\"remote collaboration\" OR teamwork))"
    );
}

#[test]
fn randomly_mutated_trees_stay_logically_equivalent_to_their_cnf() {
    let vocabulary = study_vocabulary();
    let config = MutationConfig::default();
    let mut rng = StdRng::seed_from_u64(53);

    let mut tree = concrete_tree(&vocabulary);
    for _ in 0..40 {
        operators::alter_random_node(&mut tree, &config, &mut rng).unwrap();
        assert_same_truth_table(&tree);
    }
}
