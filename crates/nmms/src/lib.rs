//! # nmms: nonmonotonic multi-succedent sequent calculus
//!
//! An automated reasoner for a sequent calculus whose ground layer is a
//! *material base*: a finite set of atomic defeasible inferences plus
//! lazily evaluated axiom schemas (subclass, range, domain, subproperty,
//! disjointness). The calculus extends the base with the propositional
//! connectives without adding or removing any atomic-level consequence;
//! Weakening and Cut fail exactly where the base does not supply them.
//!
//! ## Quick start
//!
//! ```
//! use nmms::prelude::*;
//! use std::collections::BTreeSet;
//!
//! # fn main() -> Result<(), BaseError> {
//! let mut base = MaterialBase::new();
//! for name in ["p", "q", "r"] {
//!     base.add_atom(Atom::prop(name));
//! }
//! base.add_consequence(
//!     BTreeSet::from([Atom::prop("p")]),
//!     BTreeSet::from([Atom::prop("q")]),
//! )?;
//!
//! let mut reasoner = Reasoner::new(&base);
//! // The base consequence is derivable, and its conditional is a theorem.
//! assert!(reasoner.query(
//!     BTreeSet::from([parse("p").unwrap()]),
//!     BTreeSet::from([parse("q").unwrap()]),
//! ));
//! assert!(reasoner.query(
//!     BTreeSet::new(),
//!     BTreeSet::from([parse("p -> q").unwrap()]),
//! ));
//! // One extra premise defeats it: the relation is nonmonotonic.
//! assert!(!reasoner.query(
//!     BTreeSet::from([parse("p").unwrap(), parse("r").unwrap()]),
//!     BTreeSet::from([parse("q").unwrap()]),
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`nmms_core`]: sentence AST, structured atoms, parser
//! - [`nmms_base`]: material base, axiom schemas, persisted document
//! - [`nmms_engine`]: backward proof-search engine

pub use nmms_base as base;
pub use nmms_core as core;
pub use nmms_engine as engine;

pub use nmms_base::{
    AtomSet, BaseDocument, BaseError, CommitmentStore, MaterialBase, Schema, SchemaKind,
};
pub use nmms_core::{parse, parse_atom, Atom, Sentence, Sequent, SyntaxError};
pub use nmms_engine::{ProofResult, Reasoner, SelectionOrder, TraceSink};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use nmms_base::{BaseError, CommitmentStore, MaterialBase, Schema, SchemaKind};
    pub use nmms_core::{parse, parse_atom, Atom, Sentence, Sequent};
    pub use nmms_engine::{ProofResult, Reasoner, SelectionOrder};
}
