//! Commitment store: a higher-level consumer of the material base.
//!
//! Holds atomic assertions, ground defeasible rules and schema commitments,
//! each schema commitment tagged with the source that made it. `compile`
//! builds a fresh material base from the current commitments; callers drop
//! any reasoner built over a previous compilation, since a compiled base is
//! never patched in place.

use crate::base::{AtomSet, MaterialBase};
use crate::schema::{Schema, SchemaKind};
use itertools::Itertools;
use nmms_core::Atom;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct CommitmentStore {
    assertions: BTreeSet<Atom>,
    ground_rules: BTreeSet<(AtomSet, AtomSet)>,
    schemas: Vec<(String, SchemaKind)>,
}

impl CommitmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an atomic assertion.
    pub fn add_assertion(&mut self, atom: Atom) {
        self.assertions.insert(atom);
    }

    /// Record a concept assertion `C(individual)`.
    pub fn add_concept(&mut self, concept: impl Into<String>, individual: impl Into<String>) {
        self.add_assertion(Atom::concept(concept, individual));
    }

    /// Record a role assertion `R(subject, object)`.
    pub fn add_role(
        &mut self,
        role: impl Into<String>,
        subject: impl Into<String>,
        object: impl Into<String>,
    ) {
        self.add_assertion(Atom::role(role, subject, object));
    }

    /// Record a ground defeasible rule; its atoms become assertions too.
    pub fn commit_rule(&mut self, antecedent: AtomSet, consequent: AtomSet) {
        for atom in antecedent.iter().chain(consequent.iter()) {
            self.assertions.insert(atom.clone());
        }
        self.ground_rules.insert((antecedent, consequent));
    }

    /// Record a schema commitment made by `source`.
    pub fn commit_schema(&mut self, source: impl Into<String>, kind: SchemaKind) {
        self.schemas.push((source.into(), kind));
    }

    /// Drop every schema commitment made by `source`. Unknown sources are a
    /// no-op.
    pub fn retract_schemas(&mut self, source: &str) -> usize {
        let before = self.schemas.len();
        self.schemas.retain(|(label, _)| label != source);
        before - self.schemas.len()
    }

    pub fn assertions(&self) -> &BTreeSet<Atom> {
        &self.assertions
    }

    /// Compile the current commitments into a fresh material base.
    /// Schemas are registered lazily, never grounded over the assertions.
    pub fn compile(&self) -> MaterialBase {
        let mut base = MaterialBase::new();
        for atom in &self.assertions {
            base.add_atom(atom.clone());
        }
        for (antecedent, consequent) in &self.ground_rules {
            // Rule atoms were asserted at commit time, so this cannot fail.
            let _ = base.add_consequence(antecedent.clone(), consequent.clone());
        }
        for (source, kind) in &self.schemas {
            base.register_schema(Schema::new(kind.clone()).with_source(source.clone()));
        }
        base
    }

    /// Human-readable rendering of the current commitments.
    pub fn describe(&self) -> String {
        let mut lines = vec![format!("Assertions: {}", self.assertions.len())];
        for atom in &self.assertions {
            lines.push(format!("  {}", atom));
        }
        lines.push(format!("Schemas: {}", self.schemas.len()));
        for (source, kind) in &self.schemas {
            lines.push(format!("  [{}] {}: {}", source, kind.name(), kind));
        }
        if !self.ground_rules.is_empty() {
            lines.push(format!("Ground rules: {}", self.ground_rules.len()));
            for (antecedent, consequent) in &self.ground_rules {
                lines.push(format!(
                    "  {} |~ {}",
                    antecedent.iter().join(", "),
                    consequent.iter().join(", ")
                ));
            }
        }
        lines.join("\n")
    }
}
