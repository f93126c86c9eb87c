//! Sentence syntax for the NMMS nonmonotonic sequent calculus.
//!
//! This crate defines the immutable sentence AST (atoms with their
//! concept/role application structure pre-parsed, plus the four
//! propositional connectives), sequents over sentence sets, and the
//! recursive-descent parser for the surface syntax:
//!
//! ```text
//! sentence    ::= implication
//! implication ::= disjunction ('->' implication)?      (right-associative)
//! disjunction ::= conjunction ('|' conjunction)*       (left-associative)
//! conjunction ::= unary ('&' unary)*                   (left-associative)
//! unary       ::= '~' unary | '(' sentence ')' | atom
//! atom        ::= IDENT | IDENT '(' IDENT ')' | IDENT '(' IDENT ',' IDENT ')'
//! ```
//!
//! Parsing is a pure function from text to AST; it performs no semantic
//! validation against any material base.

pub mod parser;
pub mod sentence;

pub use parser::{parse, parse_atom, SyntaxError};
pub use sentence::{Atom, Sentence, Sequent};
