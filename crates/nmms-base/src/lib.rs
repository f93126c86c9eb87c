//! Material base for the NMMS sequent calculus.
//!
//! The material base is the ground layer the calculus extends: an atomic
//! language with optional annotations, an explicit exact-match consequence
//! relation over atoms, and a registry of lazily evaluated axiom schemas
//! (subclass, range, domain, subproperty, and the two disjointness kinds).
//!
//! Exact matching everywhere is what keeps the consequence relation
//! nonmonotonic: a registered consequence or schema licenses precisely the
//! sequent shape it names, and one extra premise defeats it.

pub mod base;
pub mod commitment;
pub mod document;
pub mod schema;

pub use base::{AtomSet, BaseError, MaterialBase};
pub use commitment::CommitmentStore;
pub use document::{AtomEntry, BaseDocument, ConsequenceEntry, DocumentError, SchemaEntry};
pub use schema::{Schema, SchemaKind};
