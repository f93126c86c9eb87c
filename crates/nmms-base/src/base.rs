//! The material base: atomic language, ground consequences, schema registry.

use crate::schema::Schema;
use nmms_core::Atom;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A finite set of atoms, one side of a ground sequent.
pub type AtomSet = BTreeSet<Atom>;

/// Errors raised at mutation time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BaseError {
    /// A consequence referenced an atom outside the declared language.
    #[error("unknown atom `{0}`: declare it before using it in a consequence")]
    UnknownAtom(String),
}

/// The ground layer of atomic defeasible inferences that the calculus
/// extends, plus the registered axiom schemas.
///
/// A base is mutated only through explicit tell-style operations; the
/// reasoner reads it and never writes. Any mutation invalidates every
/// reasoner cache built over this base; reasoners borrow the base
/// immutably, so the borrow checker enforces the discard.
#[derive(Debug, Clone, Default)]
pub struct MaterialBase {
    language: BTreeSet<Atom>,
    annotations: BTreeMap<Atom, String>,
    consequences: BTreeSet<(AtomSet, AtomSet)>,
    schemas: Vec<Schema>,
    individuals: BTreeSet<String>,
    concepts: BTreeSet<String>,
    roles: BTreeSet<String>,
}

impl MaterialBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an atom as part of the atomic language.
    pub fn add_atom(&mut self, atom: Atom) {
        self.extract_vocabulary(&atom);
        debug!(atom = %atom, "added atom");
        self.language.insert(atom);
    }

    /// Attach a human-readable annotation to a declared atom.
    pub fn annotate(&mut self, atom: &Atom, annotation: impl Into<String>) {
        self.annotations.insert(atom.clone(), annotation.into());
    }

    pub fn annotation(&self, atom: &Atom) -> Option<&str> {
        self.annotations.get(atom).map(String::as_str)
    }

    pub fn contains_atom(&self, atom: &Atom) -> bool {
        self.language.contains(atom)
    }

    pub fn language(&self) -> &BTreeSet<Atom> {
        &self.language
    }

    /// Add a ground consequence `Γ |~ Δ`. Every atom on either side must
    /// already be a member of the language.
    pub fn add_consequence(
        &mut self,
        antecedent: AtomSet,
        consequent: AtomSet,
    ) -> Result<(), BaseError> {
        for atom in antecedent.iter().chain(consequent.iter()) {
            if !self.language.contains(atom) {
                return Err(BaseError::UnknownAtom(atom.to_string()));
            }
        }
        debug!(
            antecedent = %render(&antecedent),
            consequent = %render(&consequent),
            "added consequence"
        );
        self.consequences.insert((antecedent, consequent));
        Ok(())
    }

    pub fn consequences(&self) -> &BTreeSet<(AtomSet, AtomSet)> {
        &self.consequences
    }

    /// Register an axiom schema. Registration is O(1): schemas are matched
    /// lazily at axiom-check time, never grounded over the individuals.
    pub fn register_schema(&mut self, schema: Schema) {
        debug!(schema = %schema.kind, source = ?schema.source, "registered schema");
        self.schemas.push(schema);
    }

    /// Drop every schema carrying the given provenance label. Retracting a
    /// label that was never registered is a no-op.
    pub fn retract_schemas(&mut self, source: &str) -> usize {
        let before = self.schemas.len();
        self.schemas
            .retain(|schema| schema.source.as_deref() != Some(source));
        let removed = before - self.schemas.len();
        if removed > 0 {
            debug!(source, removed, "retracted schemas");
        }
        removed
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// Individuals mentioned by concept/role atoms in the language.
    pub fn individuals(&self) -> &BTreeSet<String> {
        &self.individuals
    }

    /// Concept names mentioned by the language.
    pub fn concepts(&self) -> &BTreeSet<String> {
        &self.concepts
    }

    /// Role names mentioned by the language.
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    fn extract_vocabulary(&mut self, atom: &Atom) {
        match atom {
            Atom::Prop(_) => {}
            Atom::Concept {
                concept,
                individual,
            } => {
                self.concepts.insert(concept.clone());
                self.individuals.insert(individual.clone());
            }
            Atom::Role {
                role,
                subject,
                object,
            } => {
                self.roles.insert(role.clone());
                self.individuals.insert(subject.clone());
                self.individuals.insert(object.clone());
            }
        }
    }

    /// Decide whether the purely atomic sequent `Γ ⇒ Δ` is an axiom.
    ///
    /// Three ordered tests, any one sufficing:
    ///
    /// 1. Containment: `Γ ∩ Δ ≠ ∅`.
    /// 2. The pair is literally a registered consequence. Set equality,
    ///    not subset, which is how the absence of Weakening is enforced.
    /// 3. Some registered schema matches structurally, in registration
    ///    order.
    pub fn is_axiom(&self, antecedent: &AtomSet, consequent: &AtomSet) -> bool {
        if antecedent.intersection(consequent).next().is_some() {
            return true;
        }
        if self
            .consequences
            .contains(&(antecedent.clone(), consequent.clone()))
        {
            return true;
        }
        self.schemas
            .iter()
            .any(|schema| schema.matches(antecedent, consequent))
    }
}

fn render(atoms: &AtomSet) -> String {
    use itertools::Itertools;
    atoms.iter().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    fn atoms(names: &[&str]) -> AtomSet {
        names.iter().map(|n| Atom::prop(*n)).collect()
    }

    fn base_with(names: &[&str]) -> MaterialBase {
        let mut base = MaterialBase::new();
        for name in names {
            base.add_atom(Atom::prop(*name));
        }
        base
    }

    #[test]
    fn containment_is_always_an_axiom() {
        let base = MaterialBase::new();
        assert!(base.is_axiom(&atoms(&["p", "q"]), &atoms(&["q", "r"])));
        assert!(!base.is_axiom(&atoms(&["p"]), &atoms(&["q"])));
    }

    #[test]
    fn consequence_requires_exact_match() {
        let mut base = base_with(&["p", "q", "r"]);
        base.add_consequence(atoms(&["p"]), atoms(&["q"])).unwrap();

        assert!(base.is_axiom(&atoms(&["p"]), &atoms(&["q"])));
        // Weakening fails: the strengthened antecedent is not an axiom.
        assert!(!base.is_axiom(&atoms(&["p", "r"]), &atoms(&["q"])));
        assert!(!base.is_axiom(&atoms(&["p"]), &atoms(&["q", "r"])));
    }

    #[test]
    fn empty_sides_are_legal_consequences() {
        let mut base = base_with(&["s", "t"]);
        base.add_consequence(atoms(&["s", "t"]), AtomSet::new())
            .unwrap();
        assert!(base.is_axiom(&atoms(&["s", "t"]), &AtomSet::new()));
        assert!(!base.is_axiom(&atoms(&["s"]), &AtomSet::new()));
    }

    #[test]
    fn consequence_rejects_undeclared_atom() {
        let mut base = base_with(&["p"]);
        let err = base
            .add_consequence(atoms(&["p"]), atoms(&["q"]))
            .unwrap_err();
        assert_eq!(err, BaseError::UnknownAtom("q".into()));
    }

    #[test]
    fn schema_participates_in_axiom_check() {
        let mut base = MaterialBase::new();
        base.add_atom(Atom::concept("Man", "socrates"));
        base.register_schema(Schema::new(SchemaKind::SubclassOf {
            sub: "Man".into(),
            sup: "Mortal".into(),
        }));

        let gamma: AtomSet = [Atom::concept("Man", "socrates")].into_iter().collect();
        let delta: AtomSet = [Atom::concept("Mortal", "socrates")].into_iter().collect();
        assert!(base.is_axiom(&gamma, &delta));

        // An unrelated extra premise defeats the schema.
        let mut bigger = gamma.clone();
        bigger.insert(Atom::concept("Divine", "socrates"));
        assert!(!base.is_axiom(&bigger, &delta));
    }

    #[test]
    fn retraction_by_source_is_idempotent() {
        let mut base = MaterialBase::new();
        base.register_schema(
            Schema::new(SchemaKind::SubclassOf {
                sub: "Man".into(),
                sup: "Mortal".into(),
            })
            .with_source("lecture-1"),
        );
        base.register_schema(
            Schema::new(SchemaKind::SubclassOf {
                sub: "Cat".into(),
                sup: "Animal".into(),
            })
            .with_source("lecture-2"),
        );

        assert_eq!(base.retract_schemas("lecture-1"), 1);
        assert_eq!(base.schemas().len(), 1);
        // Unknown and already-retracted labels are no-ops.
        assert_eq!(base.retract_schemas("lecture-1"), 0);
        assert_eq!(base.retract_schemas("never-registered"), 0);
        assert_eq!(base.schemas().len(), 1);
    }

    #[test]
    fn unlabelled_schemas_survive_retraction() {
        let mut base = MaterialBase::new();
        base.register_schema(Schema::new(SchemaKind::SubclassOf {
            sub: "Man".into(),
            sup: "Mortal".into(),
        }));
        base.retract_schemas("anything");
        assert_eq!(base.schemas().len(), 1);
    }

    #[test]
    fn vocabulary_tracking() {
        let mut base = MaterialBase::new();
        base.add_atom(Atom::concept("Man", "socrates"));
        base.add_atom(Atom::role("hasChild", "alice", "bob"));
        base.add_atom(Atom::prop("p"));

        assert!(base.concepts().contains("Man"));
        assert!(base.roles().contains("hasChild"));
        let individuals: Vec<_> = base.individuals().iter().cloned().collect();
        assert_eq!(individuals, ["alice", "bob", "socrates"]);
    }

    #[test]
    fn annotations_attach_to_atoms() {
        let mut base = MaterialBase::new();
        let p = Atom::prop("p");
        base.add_atom(p.clone());
        base.annotate(&p, "Tara is human");
        assert_eq!(base.annotation(&p), Some("Tara is human"));
        assert_eq!(base.annotation(&Atom::prop("q")), None);
    }
}
