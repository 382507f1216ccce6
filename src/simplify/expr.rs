use std::collections::{BTreeMap, BTreeSet};

/// Boolean expression over opaque symbols. The n-ary And/Or shape keeps CNF
/// output flat instead of nesting binary operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Var(String),
    Not(Box<BoolExpr>),
    And(Vec<BoolExpr>),
    Or(Vec<BoolExpr>),
}

impl BoolExpr {
    /// Truth value under `assignment`. Unassigned symbols read as false.
    pub fn evaluate(&self, assignment: &BTreeMap<String, bool>) -> bool {
        match self {
            BoolExpr::Var(symbol) => assignment.get(symbol).copied().unwrap_or(false),
            BoolExpr::Not(inner) => !inner.evaluate(assignment),
            BoolExpr::And(items) => items.iter().all(|item| item.evaluate(assignment)),
            BoolExpr::Or(items) => items.iter().any(|item| item.evaluate(assignment)),
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            BoolExpr::Var(symbol) => {
                out.insert(symbol.clone());
            }
            BoolExpr::Not(inner) => inner.collect_variables(out),
            BoolExpr::And(items) | BoolExpr::Or(items) => {
                for item in items {
                    item.collect_variables(out);
                }
            }
        }
    }
}

/// A possibly negated symbol. Ordering makes clause sets canonical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal {
    pub symbol: String,
    pub negated: bool,
}

/// A CNF clause: the disjunction of its literals.
pub type Clause = BTreeSet<Literal>;

/// Convert to conjunctive normal form: negation-normal form first, then
/// distribution of OR over AND, then clause cleanup (tautology removal,
/// deduplication, subsumption). An empty result means the expression is a
/// tautology.
pub fn to_cnf(expr: &BoolExpr) -> Vec<Clause> {
    let nnf = to_nnf(expr, false);
    let clauses = distribute(&nnf);
    cleanup(clauses)
}

/// Push negations down to the symbols: De Morgan plus double-negation
/// elimination. `negate` tracks the parity of enclosing NOTs.
fn to_nnf(expr: &BoolExpr, negate: bool) -> BoolExpr {
    match expr {
        BoolExpr::Var(symbol) => {
            if negate {
                BoolExpr::Not(Box::new(BoolExpr::Var(symbol.clone())))
            } else {
                BoolExpr::Var(symbol.clone())
            }
        }
        BoolExpr::Not(inner) => to_nnf(inner, !negate),
        BoolExpr::And(items) => {
            let mapped = items.iter().map(|item| to_nnf(item, negate)).collect();
            if negate {
                BoolExpr::Or(mapped)
            } else {
                BoolExpr::And(mapped)
            }
        }
        BoolExpr::Or(items) => {
            let mapped = items.iter().map(|item| to_nnf(item, negate)).collect();
            if negate {
                BoolExpr::And(mapped)
            } else {
                BoolExpr::Or(mapped)
            }
        }
    }
}

/// Distribute an NNF expression into a clause list.
fn distribute(expr: &BoolExpr) -> Vec<Clause> {
    match expr {
        BoolExpr::Var(symbol) => vec![single_literal(symbol, false)],
        BoolExpr::Not(inner) => match inner.as_ref() {
            // NNF guarantees negation sits directly on a symbol
            BoolExpr::Var(symbol) => vec![single_literal(symbol, true)],
            other => distribute(&to_nnf(other, true)),
        },
        BoolExpr::And(items) => items.iter().flat_map(distribute).collect(),
        BoolExpr::Or(items) => {
            let mut product: Vec<Clause> = vec![Clause::new()];
            for item in items {
                let item_clauses = distribute(item);
                let mut next = Vec::with_capacity(product.len() * item_clauses.len());
                for partial in &product {
                    for clause in &item_clauses {
                        let mut merged = partial.clone();
                        merged.extend(clause.iter().cloned());
                        next.push(merged);
                    }
                }
                product = next;
            }
            product
        }
    }
}

fn single_literal(symbol: &str, negated: bool) -> Clause {
    let mut clause = Clause::new();
    clause.insert(Literal {
        symbol: symbol.to_string(),
        negated,
    });
    clause
}

/// Drop tautological clauses, duplicates, and clauses subsumed by a smaller
/// one.
fn cleanup(clauses: Vec<Clause>) -> Vec<Clause> {
    let distinct: BTreeSet<Clause> = clauses
        .into_iter()
        .filter(|clause| !is_tautology(clause))
        .collect();

    distinct
        .iter()
        .filter(|clause| {
            !distinct
                .iter()
                .any(|other| other != *clause && other.is_subset(clause))
        })
        .cloned()
        .collect()
}

fn is_tautology(clause: &Clause) -> bool {
    clause.iter().any(|literal| {
        literal.negated
            && clause.contains(&Literal {
                symbol: literal.symbol.clone(),
                negated: false,
            })
    })
}

/// The conjunction-of-disjunctions expression a clause list denotes.
pub fn cnf_expr(clauses: &[Clause]) -> BoolExpr {
    BoolExpr::And(
        clauses
            .iter()
            .map(|clause| {
                BoolExpr::Or(
                    clause
                        .iter()
                        .map(|literal| {
                            let var = BoolExpr::Var(literal.symbol.clone());
                            if literal.negated {
                                BoolExpr::Not(Box::new(var))
                            } else {
                                var
                            }
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(symbol: &str) -> BoolExpr {
        BoolExpr::Var(symbol.to_string())
    }

    fn not(expr: BoolExpr) -> BoolExpr {
        BoolExpr::Not(Box::new(expr))
    }

    /// Both expressions agree on every assignment of their variables.
    fn assert_equivalent(left: &BoolExpr, right: &BoolExpr) {
        let mut variables = left.variables();
        variables.extend(right.variables());
        let variables: Vec<String> = variables.into_iter().collect();

        for bits in 0..(1u32 << variables.len()) {
            let assignment: BTreeMap<String, bool> = variables
                .iter()
                .enumerate()
                .map(|(i, symbol)| (symbol.clone(), bits & (1 << i) != 0))
                .collect();
            assert_eq!(
                left.evaluate(&assignment),
                right.evaluate(&assignment),
                "truth tables diverge at {:?}",
                assignment
            );
        }
    }

    #[test]
    fn cnf_preserves_the_truth_table() {
        let cases = vec![
            // NOT (a OR b) AND c
            BoolExpr::And(vec![not(BoolExpr::Or(vec![var("a"), var("b")])), var("c")]),
            // a OR (b AND c)
            BoolExpr::Or(vec![var("a"), BoolExpr::And(vec![var("b"), var("c")])]),
            // NOT (a AND (b OR NOT c))
            not(BoolExpr::And(vec![
                var("a"),
                BoolExpr::Or(vec![var("b"), not(var("c"))]),
            ])),
            // (a OR b) AND (NOT a OR c)
            BoolExpr::And(vec![
                BoolExpr::Or(vec![var("a"), var("b")]),
                BoolExpr::Or(vec![not(var("a")), var("c")]),
            ]),
        ];

        for expr in cases {
            let clauses = to_cnf(&expr);
            assert_equivalent(&expr, &cnf_expr(&clauses));
        }
    }

    #[test]
    fn double_negation_collapses() {
        let expr = not(not(var("a")));
        let clauses = to_cnf(&expr);
        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].iter().next().unwrap(),
            &Literal {
                symbol: "a".to_string(),
                negated: false
            }
        );
    }

    #[test]
    fn tautological_clause_is_removed() {
        // a OR NOT a
        let expr = BoolExpr::Or(vec![var("a"), not(var("a"))]);
        assert!(to_cnf(&expr).is_empty());
    }

    #[test]
    fn subsumed_clause_is_removed() {
        // a AND (a OR b) simplifies to a
        let expr = BoolExpr::And(vec![var("a"), BoolExpr::Or(vec![var("a"), var("b")])]);
        let clauses = to_cnf(&expr);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].len(), 1);
    }

    #[test]
    fn distribution_crosses_or_over_and() {
        // a OR (b AND c) => (a OR b) AND (a OR c)
        let expr = BoolExpr::Or(vec![var("a"), BoolExpr::And(vec![var("b"), var("c")])]);
        let clauses = to_cnf(&expr);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|clause| clause.len() == 2));
    }
}
