//! Backward proof-search engine for the NMMS sequent calculus.
//!
//! The reasoner decides derivability of a sequent over a material base by
//! root-first decomposition through the eight invertible logical rules,
//! with a memoization cache, explicit cycle protection and a depth budget.
//! It never mutates the base; the base is borrowed for the reasoner's
//! lifetime, so base mutation forces the cache to be rebuilt.

pub mod reasoner;
pub mod trace;

pub use reasoner::{ProofResult, Reasoner, SelectionOrder, DEFAULT_MAX_DEPTH};
pub use trace::{CollectedTrace, NullTrace, TraceSink};
