//! Axiom schemas: parametrized, lazily evaluated axiom patterns.
//!
//! A schema is never expanded over the known individuals. It is matched
//! structurally against the two atom sets actually presented, and the match
//! demands the *exact* required shape: no extra premises, no extra
//! conclusions. Learning one additional fact can therefore silently disable
//! a schema match, which is what preserves defeasibility.

use nmms_core::Atom;
use std::collections::BTreeSet;
use std::fmt;

/// The closed set of schema kinds, each carrying its two name parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// `{C(x)} |~ {D(x)}` for any individual `x`.
    SubclassOf { sub: String, sup: String },
    /// `{R(x,y)} |~ {C(y)}` for any `x`, `y`.
    Range { role: String, concept: String },
    /// `{R(x,y)} |~ {C(x)}` for any `x`, `y`.
    Domain { role: String, concept: String },
    /// `{R(x,y)} |~ {S(x,y)}` for any `x`, `y`.
    SubpropertyOf { sub: String, sup: String },
    /// `{C(x), D(x)} |~ {}` for any `x`: material incompatibility.
    DisjointConcepts { left: String, right: String },
    /// `{R(x,y), S(x,y)} |~ {}` for any `x`, `y`.
    DisjointProperties { left: String, right: String },
}

impl SchemaKind {
    /// Stable kind tag used by the persisted document format.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::SubclassOf { .. } => "subclass-of",
            SchemaKind::Range { .. } => "range",
            SchemaKind::Domain { .. } => "domain",
            SchemaKind::SubpropertyOf { .. } => "subproperty-of",
            SchemaKind::DisjointConcepts { .. } => "disjoint-concepts",
            SchemaKind::DisjointProperties { .. } => "disjoint-properties",
        }
    }

    /// The two name parameters, in declaration order.
    pub fn params(&self) -> (&str, &str) {
        match self {
            SchemaKind::SubclassOf { sub, sup } => (sub, sup),
            SchemaKind::Range { role, concept } => (role, concept),
            SchemaKind::Domain { role, concept } => (role, concept),
            SchemaKind::SubpropertyOf { sub, sup } => (sub, sup),
            SchemaKind::DisjointConcepts { left, right } => (left, right),
            SchemaKind::DisjointProperties { left, right } => (left, right),
        }
    }

    /// Reconstruct a kind from its document tag and parameters.
    pub fn from_parts(kind: &str, first: String, second: String) -> Option<Self> {
        match kind {
            "subclass-of" => Some(SchemaKind::SubclassOf {
                sub: first,
                sup: second,
            }),
            "range" => Some(SchemaKind::Range {
                role: first,
                concept: second,
            }),
            "domain" => Some(SchemaKind::Domain {
                role: first,
                concept: second,
            }),
            "subproperty-of" => Some(SchemaKind::SubpropertyOf {
                sub: first,
                sup: second,
            }),
            "disjoint-concepts" => Some(SchemaKind::DisjointConcepts {
                left: first,
                right: second,
            }),
            "disjoint-properties" => Some(SchemaKind::DisjointProperties {
                left: first,
                right: second,
            }),
            _ => None,
        }
    }

    /// Structural match against a concrete antecedent/consequent pair.
    pub fn matches(&self, antecedent: &BTreeSet<Atom>, consequent: &BTreeSet<Atom>) -> bool {
        match self {
            SchemaKind::SubclassOf { sub, sup } => {
                match (singleton(antecedent), singleton(consequent)) {
                    (
                        Some(Atom::Concept {
                            concept: c,
                            individual: x,
                        }),
                        Some(Atom::Concept {
                            concept: d,
                            individual: y,
                        }),
                    ) => c == sub && d == sup && x == y,
                    _ => false,
                }
            }
            SchemaKind::Range { role, concept } => {
                match (singleton(antecedent), singleton(consequent)) {
                    (
                        Some(Atom::Role {
                            role: r, object, ..
                        }),
                        Some(Atom::Concept {
                            concept: c,
                            individual,
                        }),
                    ) => r == role && c == concept && object == individual,
                    _ => false,
                }
            }
            SchemaKind::Domain { role, concept } => {
                match (singleton(antecedent), singleton(consequent)) {
                    (
                        Some(Atom::Role {
                            role: r, subject, ..
                        }),
                        Some(Atom::Concept {
                            concept: c,
                            individual,
                        }),
                    ) => r == role && c == concept && subject == individual,
                    _ => false,
                }
            }
            SchemaKind::SubpropertyOf { sub, sup } => {
                match (singleton(antecedent), singleton(consequent)) {
                    (
                        Some(Atom::Role {
                            role: r,
                            subject: x1,
                            object: y1,
                        }),
                        Some(Atom::Role {
                            role: s,
                            subject: x2,
                            object: y2,
                        }),
                    ) => r == sub && s == sup && x1 == x2 && y1 == y2,
                    _ => false,
                }
            }
            SchemaKind::DisjointConcepts { left, right } => {
                match (pair(antecedent), consequent.is_empty()) {
                    (
                        Some((
                            Atom::Concept {
                                concept: c1,
                                individual: x1,
                            },
                            Atom::Concept {
                                concept: c2,
                                individual: x2,
                            },
                        )),
                        true,
                    ) => {
                        x1 == x2
                            && ((c1 == left && c2 == right) || (c1 == right && c2 == left))
                    }
                    _ => false,
                }
            }
            SchemaKind::DisjointProperties { left, right } => {
                match (pair(antecedent), consequent.is_empty()) {
                    (
                        Some((
                            Atom::Role {
                                role: r1,
                                subject: x1,
                                object: y1,
                            },
                            Atom::Role {
                                role: r2,
                                subject: x2,
                                object: y2,
                            },
                        )),
                        true,
                    ) => {
                        x1 == x2
                            && y1 == y2
                            && ((r1 == left && r2 == right) || (r1 == right && r2 == left))
                    }
                    _ => false,
                }
            }
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::SubclassOf { sub, sup } => {
                write!(f, "{{{}(x)}} |~ {{{}(x)}}", sub, sup)
            }
            SchemaKind::Range { role, concept } => {
                write!(f, "{{{}(x,y)}} |~ {{{}(y)}}", role, concept)
            }
            SchemaKind::Domain { role, concept } => {
                write!(f, "{{{}(x,y)}} |~ {{{}(x)}}", role, concept)
            }
            SchemaKind::SubpropertyOf { sub, sup } => {
                write!(f, "{{{}(x,y)}} |~ {{{}(x,y)}}", sub, sup)
            }
            SchemaKind::DisjointConcepts { left, right } => {
                write!(f, "{{{}(x), {}(x)}} |~ {{}}", left, right)
            }
            SchemaKind::DisjointProperties { left, right } => {
                write!(f, "{{{}(x,y), {}(x,y)}} |~ {{}}", left, right)
            }
        }
    }
}

/// A registered schema: the pattern plus optional annotation and a
/// provenance label used only for bulk retraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub annotation: Option<String>,
    pub source: Option<String>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Schema {
            kind,
            annotation: None,
            source: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn matches(&self, antecedent: &BTreeSet<Atom>, consequent: &BTreeSet<Atom>) -> bool {
        self.kind.matches(antecedent, consequent)
    }
}

fn singleton(atoms: &BTreeSet<Atom>) -> Option<&Atom> {
    if atoms.len() == 1 {
        atoms.iter().next()
    } else {
        None
    }
}

fn pair(atoms: &BTreeSet<Atom>) -> Option<(&Atom, &Atom)> {
    if atoms.len() == 2 {
        let mut it = atoms.iter();
        match (it.next(), it.next()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(atoms: impl IntoIterator<Item = Atom>) -> BTreeSet<Atom> {
        atoms.into_iter().collect()
    }

    fn subclass() -> SchemaKind {
        SchemaKind::SubclassOf {
            sub: "Man".into(),
            sup: "Mortal".into(),
        }
    }

    #[test]
    fn subclass_matches_same_individual_only() {
        let kind = subclass();
        assert!(kind.matches(
            &set([Atom::concept("Man", "socrates")]),
            &set([Atom::concept("Mortal", "socrates")]),
        ));
        assert!(!kind.matches(
            &set([Atom::concept("Man", "socrates")]),
            &set([Atom::concept("Mortal", "plato")]),
        ));
        assert!(!kind.matches(
            &set([Atom::concept("Mortal", "socrates")]),
            &set([Atom::concept("Man", "socrates")]),
        ));
    }

    #[test]
    fn subclass_rejects_extra_premise() {
        // One extra fact defeats the schema match.
        let kind = subclass();
        assert!(!kind.matches(
            &set([
                Atom::concept("Man", "socrates"),
                Atom::concept("Divine", "socrates"),
            ]),
            &set([Atom::concept("Mortal", "socrates")]),
        ));
    }

    #[test]
    fn subclass_rejects_extra_conclusion() {
        let kind = subclass();
        assert!(!kind.matches(
            &set([Atom::concept("Man", "socrates")]),
            &set([
                Atom::concept("Mortal", "socrates"),
                Atom::concept("Wise", "socrates"),
            ]),
        ));
    }

    #[test]
    fn range_applies_concept_to_second_argument() {
        let kind = SchemaKind::Range {
            role: "hasChild".into(),
            concept: "Person".into(),
        };
        assert!(kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::concept("Person", "bob")]),
        ));
        assert!(!kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::concept("Person", "alice")]),
        ));
    }

    #[test]
    fn domain_applies_concept_to_first_argument() {
        let kind = SchemaKind::Domain {
            role: "hasChild".into(),
            concept: "Parent".into(),
        };
        assert!(kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::concept("Parent", "alice")]),
        ));
        assert!(!kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::concept("Parent", "bob")]),
        ));
    }

    #[test]
    fn subproperty_preserves_both_arguments() {
        let kind = SchemaKind::SubpropertyOf {
            sub: "hasChild".into(),
            sup: "hasDescendant".into(),
        };
        assert!(kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::role("hasDescendant", "alice", "bob")]),
        ));
        assert!(!kind.matches(
            &set([Atom::role("hasChild", "alice", "bob")]),
            &set([Atom::role("hasDescendant", "bob", "alice")]),
        ));
    }

    #[test]
    fn disjoint_concepts_requires_exact_pair_and_empty_consequent() {
        let kind = SchemaKind::DisjointConcepts {
            left: "Man".into(),
            right: "Woman".into(),
        };
        let both = set([
            Atom::concept("Man", "alex"),
            Atom::concept("Woman", "alex"),
        ]);
        assert!(kind.matches(&both, &BTreeSet::new()));
        // Parameter order does not matter.
        let kind_flipped = SchemaKind::DisjointConcepts {
            left: "Woman".into(),
            right: "Man".into(),
        };
        assert!(kind_flipped.matches(&both, &BTreeSet::new()));
        // Different individuals, extra atoms, or a non-empty consequent all fail.
        assert!(!kind.matches(
            &set([Atom::concept("Man", "alex"), Atom::concept("Woman", "blair")]),
            &BTreeSet::new(),
        ));
        let mut extra = both.clone();
        extra.insert(Atom::concept("Happy", "alex"));
        assert!(!kind.matches(&extra, &BTreeSet::new()));
        assert!(!kind.matches(&both, &set([Atom::prop("q")])));
    }

    #[test]
    fn disjoint_properties_requires_same_argument_pair() {
        let kind = SchemaKind::DisjointProperties {
            left: "hasParent".into(),
            right: "hasChild".into(),
        };
        assert!(kind.matches(
            &set([
                Atom::role("hasParent", "a", "b"),
                Atom::role("hasChild", "a", "b"),
            ]),
            &BTreeSet::new(),
        ));
        assert!(!kind.matches(
            &set([
                Atom::role("hasParent", "a", "b"),
                Atom::role("hasChild", "b", "a"),
            ]),
            &BTreeSet::new(),
        ));
    }

    #[test]
    fn kind_tags_round_trip() {
        let kinds = [
            subclass(),
            SchemaKind::Range {
                role: "r".into(),
                concept: "C".into(),
            },
            SchemaKind::Domain {
                role: "r".into(),
                concept: "C".into(),
            },
            SchemaKind::SubpropertyOf {
                sub: "r".into(),
                sup: "s".into(),
            },
            SchemaKind::DisjointConcepts {
                left: "C".into(),
                right: "D".into(),
            },
            SchemaKind::DisjointProperties {
                left: "r".into(),
                right: "s".into(),
            },
        ];
        for kind in kinds {
            let (a, b) = kind.params();
            let rebuilt =
                SchemaKind::from_parts(kind.name(), a.to_string(), b.to_string()).unwrap();
            assert_eq!(rebuilt, kind);
        }
        assert!(SchemaKind::from_parts("no-such-kind", "a".into(), "b".into()).is_none());
    }
}
