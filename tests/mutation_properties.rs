use evoquery::config::MutationConfig;
use evoquery::engines::generation::operators;
use evoquery::error::EvoqueryError;
use evoquery::tree::Node;
use evoquery::types::{Connective, NodeValue};
use evoquery::vocabulary::Vocabulary;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn study_vocabulary() -> Arc<Vocabulary> {
    let document = r#"{
        "asymetric": ["asymetric", "asym", "asymetrical", "mixed"],
        "collaboration": ["collaboration", "teamwork", "remote collaboration"],
        "batman": ["batman"]
    }"#;
    Arc::new(Vocabulary::from_json_str(document).unwrap())
}

fn config(keep_similar: f64, alter_structure: f64, grow: f64) -> MutationConfig {
    MutationConfig {
        keep_similar_word_proba: keep_similar,
        alter_structure_proba: alter_structure,
        grow_proba: grow,
    }
}

fn term_of(node: &Node) -> &str {
    match node.value() {
        NodeValue::Term(term) => term,
        NodeValue::Op(op) => panic!("expected a term, got {}", op),
    }
}

#[test]
fn leaf_value_alteration_stays_in_category_when_forced() {
    let vocabulary = study_vocabulary();
    let config = config(1.0, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut node = Node::leaf("asym", vocabulary.clone());
        operators::alter_value(&mut node, &config, &mut rng).unwrap();
        let term = term_of(&node);
        assert_ne!(term, "asym");
        assert_eq!(vocabulary.category_of(term), Some("asymetric"));
    }
}

#[test]
fn leaf_value_alteration_draws_from_whole_vocabulary_otherwise() {
    let vocabulary = study_vocabulary();
    let config = config(0.0, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(11);

    let mut saw_foreign_category = false;
    for _ in 0..100 {
        let mut node = Node::leaf("asym", vocabulary.clone());
        operators::alter_value(&mut node, &config, &mut rng).unwrap();
        let term = term_of(&node);
        assert_ne!(term, "asym");
        assert!(vocabulary.category_of(term).is_some());
        if vocabulary.category_of(term) != Some("asymetric") {
            saw_foreign_category = true;
        }
    }
    assert!(saw_foreign_category);
}

#[test]
fn singleton_category_falls_back_to_the_whole_vocabulary() {
    let vocabulary = study_vocabulary();
    let config = config(1.0, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(13);

    let mut node = Node::leaf("batman", vocabulary.clone());
    operators::alter_value(&mut node, &config, &mut rng).unwrap();
    let term = term_of(&node);
    assert_ne!(term, "batman");
    assert!(vocabulary.category_of(term).is_some());
}

#[test]
fn unknown_term_surfaces_a_lookup_error_on_synonym_draw() {
    let vocabulary = study_vocabulary();
    let config = config(1.0, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(17);

    let mut node = Node::leaf("joker", vocabulary);
    assert!(matches!(
        operators::alter_value(&mut node, &config, &mut rng),
        Err(EvoqueryError::Lookup(_))
    ));
}

#[test]
fn exhausted_vocabulary_leaves_the_leaf_unchanged() {
    let solo = Arc::new(Vocabulary::from_json_str(r#"{"solo": ["solo"]}"#).unwrap());
    let config = config(0.0, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(19);

    let mut node = Node::leaf("solo", solo);
    operators::alter_value(&mut node, &config, &mut rng).unwrap();
    assert_eq!(term_of(&node), "solo");
}

#[test]
fn binary_connectives_flip_and_not_is_never_value_altered() {
    let vocabulary = study_vocabulary();
    let config = config(0.7, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(23);

    let mut and_node = Node::operation(
        Connective::And,
        vec![
            Node::leaf("asym", vocabulary.clone()),
            Node::leaf("teamwork", vocabulary.clone()),
        ],
        vocabulary.clone(),
    )
    .unwrap();
    operators::alter_value(&mut and_node, &config, &mut rng).unwrap();
    assert_eq!(and_node.connective(), Some(Connective::Or));
    operators::alter_value(&mut and_node, &config, &mut rng).unwrap();
    assert_eq!(and_node.connective(), Some(Connective::And));

    let mut not_node = Node::operation(
        Connective::Not,
        vec![Node::leaf("asym", vocabulary.clone())],
        vocabulary,
    )
    .unwrap();
    for _ in 0..20 {
        operators::alter_value(&mut not_node, &config, &mut rng).unwrap();
        assert_eq!(not_node.connective(), Some(Connective::Not));
        assert_eq!(not_node.children().len(), 1);
    }
}

#[test]
fn leaf_structure_alteration_always_grows() {
    let vocabulary = study_vocabulary();
    let config = config(0.7, 0.5, 0.6);
    let mut rng = StdRng::seed_from_u64(29);

    for _ in 0..30 {
        let mut node = Node::leaf("teamwork", vocabulary.clone());
        operators::alter_structure(&mut node, &config, &mut rng).unwrap();

        assert!(matches!(
            node.connective(),
            Some(Connective::And) | Some(Connective::Or)
        ));
        assert_eq!(node.children().len(), 2);
        assert_eq!(term_of(&node.children()[0]), "teamwork");
        assert_ne!(term_of(&node.children()[1]), "teamwork");
        assert!(node.is_valid());
    }
}

#[test]
fn operation_growth_wraps_the_whole_previous_subtree() {
    let vocabulary = study_vocabulary();
    let config = config(0.7, 0.5, 1.0);
    let mut rng = StdRng::seed_from_u64(31);

    let original = Node::operation(
        Connective::Or,
        vec![
            Node::leaf("asym", vocabulary.clone()),
            Node::leaf("collaboration", vocabulary.clone()),
        ],
        vocabulary.clone(),
    )
    .unwrap();

    let mut node = original.clone();
    operators::alter_structure(&mut node, &config, &mut rng).unwrap();

    assert_eq!(node.children().len(), 2);
    assert_eq!(node.children()[0], original);
    assert!(node.children()[1].is_leaf());
}

#[test]
fn operation_shrink_keeps_one_of_its_children() {
    let vocabulary = study_vocabulary();
    let config = config(0.7, 0.5, 0.0);
    let mut rng = StdRng::seed_from_u64(37);

    let left = Node::leaf("asym", vocabulary.clone());
    let right = Node::operation(
        Connective::Not,
        vec![Node::leaf("teamwork", vocabulary.clone())],
        vocabulary.clone(),
    )
    .unwrap();

    let mut kept_left = false;
    let mut kept_right = false;
    for _ in 0..50 {
        let mut node = Node::operation(
            Connective::And,
            vec![left.clone(), right.clone()],
            vocabulary.clone(),
        )
        .unwrap();
        operators::alter_structure(&mut node, &config, &mut rng).unwrap();

        if node == left {
            kept_left = true;
        } else if node == right {
            kept_right = true;
        } else {
            panic!("shrink produced a node that is neither child: {}", node);
        }
    }
    assert!(kept_left && kept_right, "both children should be reachable");
}

#[test]
fn validity_is_preserved_across_many_random_alterations() {
    let vocabulary = study_vocabulary();
    let config = MutationConfig::default();
    let mut rng = StdRng::seed_from_u64(41);

    let mut tree = Node::operation(
        Connective::And,
        vec![
            Node::operation(
                Connective::Or,
                vec![
                    Node::leaf("asym", vocabulary.clone()),
                    Node::leaf("remote collaboration", vocabulary.clone()),
                ],
                vocabulary.clone(),
            )
            .unwrap(),
            Node::leaf("collaboration", vocabulary.clone()),
        ],
        vocabulary,
    )
    .unwrap();

    for _ in 0..500 {
        operators::alter_random_node(&mut tree, &config, &mut rng).unwrap();
        assert!(tree.is_valid());
    }
}
