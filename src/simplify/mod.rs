//! Logical simplification of query trees.
//!
//! The tree's boolean interpretation is rebuilt over opaque symbols,
//! normalized to conjunctive normal form, and rendered back to the query
//! grammar through the inverted symbol map. The rendered text is logically
//! equivalent to the original tree; it is canonical CNF, not necessarily the
//! textually shortest form.

pub mod expr;

pub use expr::{cnf_expr, to_cnf, BoolExpr, Clause, Literal};

use crate::error::{EvoqueryError, Result};
use crate::tree::Node;
use crate::types::{Connective, NodeValue};
use crate::vocabulary::Vocabulary;
use std::collections::BTreeMap;

/// Render `tree` as an equivalent query string in conjunctive normal form.
pub fn simplify(tree: &Node) -> Result<String> {
    let symbols = tree.symbol_map();
    let expr = expr_from_node(tree, &symbols)?;
    let clauses = to_cnf(&expr);

    if clauses.is_empty() {
        // Tautology: no clause survives cleanup, keep the original rendering.
        return Ok(tree.to_request_string());
    }

    let terms: BTreeMap<&str, &str> = symbols
        .iter()
        .map(|(term, symbol)| (symbol.as_str(), term.as_str()))
        .collect();
    render_cnf(&clauses, &terms)
}

/// The tree's boolean interpretation over its symbol map.
pub fn expr_from_node(node: &Node, symbols: &BTreeMap<String, String>) -> Result<BoolExpr> {
    match node.value() {
        NodeValue::Term(term) => symbols
            .get(term)
            .map(|symbol| BoolExpr::Var(symbol.clone()))
            .ok_or_else(|| {
                EvoqueryError::Structural(format!("term '{}' missing from symbol map", term))
            }),
        NodeValue::Op(Connective::Not) => Ok(BoolExpr::Not(Box::new(expr_from_node(
            &node.children()[0],
            symbols,
        )?))),
        NodeValue::Op(Connective::And) => Ok(BoolExpr::And(vec![
            expr_from_node(&node.children()[0], symbols)?,
            expr_from_node(&node.children()[1], symbols)?,
        ])),
        NodeValue::Op(Connective::Or) => Ok(BoolExpr::Or(vec![
            expr_from_node(&node.children()[0], symbols)?,
            expr_from_node(&node.children()[1], symbols)?,
        ])),
    }
}

fn render_cnf(clauses: &[Clause], terms: &BTreeMap<&str, &str>) -> Result<String> {
    let rendered: Vec<String> = clauses
        .iter()
        .map(|clause| render_clause(clause, terms))
        .collect::<Result<_>>()?;

    if rendered.len() == 1 {
        Ok(rendered.into_iter().next().unwrap_or_default())
    } else {
        Ok(format!("({})", rendered.join(" AND ")))
    }
}

fn render_clause(clause: &Clause, terms: &BTreeMap<&str, &str>) -> Result<String> {
    let rendered: Vec<String> = clause
        .iter()
        .map(|literal| render_literal(literal, terms))
        .collect::<Result<_>>()?;

    if rendered.len() == 1 {
        Ok(rendered.into_iter().next().unwrap_or_default())
    } else {
        Ok(format!("({})", rendered.join(" OR ")))
    }
}

fn render_literal(literal: &Literal, terms: &BTreeMap<&str, &str>) -> Result<String> {
    let term = terms.get(literal.symbol.as_str()).ok_or_else(|| {
        EvoqueryError::Structural(format!("symbol '{}' missing from term map", literal.symbol))
    })?;
    let rendered = if Vocabulary::is_word(term) {
        (*term).to_string()
    } else {
        format!("\"{}\"", term)
    };
    if literal.negated {
        Ok(format!("NOT {}", rendered))
    } else {
        Ok(rendered)
    }
}
