use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean connective of an operation node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
    Not,
}

impl Connective {
    /// Number of children a node carrying this connective must have
    pub fn arity(&self) -> usize {
        match self {
            Connective::And | Connective::Or => 2,
            Connective::Not => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::Not => "NOT",
        }
    }

    pub fn from_token(token: &str) -> Option<Connective> {
        match token {
            "AND" => Some(Connective::And),
            "OR" => Some(Connective::Or),
            "NOT" => Some(Connective::Not),
            _ => None,
        }
    }

    /// The opposite binary connective. NOT has no opposite.
    pub fn flipped(&self) -> Option<Connective> {
        match self {
            Connective::And => Some(Connective::Or),
            Connective::Or => Some(Connective::And),
            Connective::Not => None,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value stored in a tree node: a vocabulary term or a connective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeValue {
    Term(String),
    Op(Connective),
}

impl NodeValue {
    pub fn as_token(&self) -> &str {
        match self {
            NodeValue::Term(term) => term,
            NodeValue::Op(op) => op.as_str(),
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self, NodeValue::Term(_))
    }
}
