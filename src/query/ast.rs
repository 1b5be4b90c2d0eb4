//! Boolean query AST.

use std::fmt;

/// A node in a parsed boolean query.
///
/// `And` and `Or` hold two or more operands; the parser collapses
/// single-operand nodes to the operand itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// A single search term.
    Term(String),
    /// Negation: all documents except those matching the operand.
    Not(Box<QueryNode>),
    /// Conjunction of all operands.
    And(Vec<QueryNode>),
    /// Disjunction of all operands.
    Or(Vec<QueryNode>),
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term(term) => write!(f, "{term}"),
            QueryNode::Not(operand) => write!(f, "NOT({operand})"),
            QueryNode::And(operands) => write_operands(f, "AND", operands),
            QueryNode::Or(operands) => write_operands(f, "OR", operands),
        }
    }
}

fn write_operands(f: &mut fmt::Formatter<'_>, name: &str, operands: &[QueryNode]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{operand}")?;
    }
    write!(f, ")")
}
