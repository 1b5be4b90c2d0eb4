//! Recursive-descent parser for the boolean query language.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! query   := or
//! or      := and ( "||" and )*
//! and     := not ( ( "&&" | ε ) not )*      -- juxtaposition is AND
//! not     := "!" not | primary
//! primary := "(" or ")" | term
//! ```
//!
//! Terms are runs of ASCII alphanumerics, Cyrillic letters, `-` and `_`,
//! case-folded with the same byte rules as the tokenizer. The parser never
//! fails: malformed input (unmatched parentheses, dangling operators) is
//! tolerated and missing operands are dropped, so the worst outcome is an
//! empty query.

use crate::analysis::tokenizer::fold_lowercase;
use crate::query::ast::QueryNode;

/// Parser for boolean query strings.
#[derive(Debug, Clone, Default)]
pub struct QueryParser;

impl QueryParser {
    /// Create a new query parser.
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a query string into an AST.
    ///
    /// Returns `None` for an empty or all-noise query.
    pub fn parse(&self, query: &str) -> Option<QueryNode> {
        let mut state = ParserState {
            bytes: query.as_bytes(),
            pos: 0,
        };

        state.skip_whitespace();
        if state.at_end() {
            return None;
        }

        state.parse_or()
    }
}

struct ParserState<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// True for the two-byte UTF-8 sequences of the Russian Cyrillic letters.
fn is_cyrillic_pair(c1: u8, c2: u8) -> bool {
    (c1 == 0xD0 && (0x90..=0xBF).contains(&c2))
        || (c1 == 0xD1 && (0x80..=0x8F).contains(&c2))
        || (c1 == 0xD0 && c2 == 0x81)
        || (c1 == 0xD1 && c2 == 0x91)
}

impl ParserState<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        if self.at_end() {
            0
        } else {
            self.bytes[self.pos]
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Skip whitespace, then consume `s` if it is next.
    fn match_str(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn parse_or(&mut self) -> Option<QueryNode> {
        let left = self.parse_and()?;
        let mut operands = vec![left];

        while self.match_str("||") {
            if let Some(right) = self.parse_and() {
                operands.push(right);
            }
        }

        if operands.len() == 1 {
            operands.pop()
        } else {
            Some(QueryNode::Or(operands))
        }
    }

    fn parse_and(&mut self) -> Option<QueryNode> {
        let left = self.parse_not()?;
        let mut operands = vec![left];

        loop {
            if self.match_str("&&") {
                if let Some(right) = self.parse_not() {
                    operands.push(right);
                }
                continue;
            }

            // Implicit AND: another conjunct follows if the next byte could
            // start one and is not the `||` operator.
            self.skip_whitespace();
            let c = self.peek();
            let conjunct_ahead = c == b'!' || c == b'(' || c.is_ascii_alphanumeric() || c >= 0x80;

            if conjunct_ahead && !self.starts_with("||") {
                if let Some(right) = self.parse_not() {
                    operands.push(right);
                    continue;
                }
            }

            break;
        }

        if operands.len() == 1 {
            operands.pop()
        } else {
            Some(QueryNode::And(operands))
        }
    }

    fn parse_not(&mut self) -> Option<QueryNode> {
        self.skip_whitespace();

        if self.peek() == b'!' {
            self.pos += 1;
            let operand = self.parse_not()?;
            return Some(QueryNode::Not(Box::new(operand)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<QueryNode> {
        self.skip_whitespace();

        if self.peek() == b'(' {
            self.pos += 1;
            let expr = self.parse_or();
            self.skip_whitespace();
            if self.peek() == b')' {
                self.pos += 1;
            }
            return expr;
        }

        let term = self.read_term();
        if term.is_empty() {
            None
        } else {
            Some(QueryNode::Term(fold_lowercase(&term)))
        }
    }

    /// Read a maximal run of term bytes at the cursor.
    fn read_term(&mut self) -> String {
        self.skip_whitespace();

        let start = self.pos;
        while !self.at_end() {
            let c = self.bytes[self.pos];

            if c.is_ascii_alphanumeric() || c == b'-' || c == b'_' {
                self.pos += 1;
                continue;
            }

            if self.pos + 1 < self.bytes.len() && is_cyrillic_pair(c, self.bytes[self.pos + 1]) {
                self.pos += 2;
                continue;
            }

            break;
        }

        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }
}
