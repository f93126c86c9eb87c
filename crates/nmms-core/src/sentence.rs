//! Sentence AST: atoms, connectives, sequents.

use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// An atomic sentence with its application structure pre-parsed.
///
/// Atoms are compared and hashed structurally; the concept/role structure
/// is recovered by pattern matching, never by re-parsing a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// Bare propositional atom, e.g. `p`.
    Prop(String),
    /// Concept assertion `C(a)`.
    Concept { concept: String, individual: String },
    /// Role assertion `R(a,b)`.
    Role {
        role: String,
        subject: String,
        object: String,
    },
}

impl Atom {
    pub fn prop(name: impl Into<String>) -> Self {
        Atom::Prop(name.into())
    }

    pub fn concept(concept: impl Into<String>, individual: impl Into<String>) -> Self {
        Atom::Concept {
            concept: concept.into(),
            individual: individual.into(),
        }
    }

    pub fn role(
        role: impl Into<String>,
        subject: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Atom::Role {
            role: role.into(),
            subject: subject.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Prop(name) => write!(f, "{}", name),
            Atom::Concept {
                concept,
                individual,
            } => write!(f, "{}({})", concept, individual),
            Atom::Role {
                role,
                subject,
                object,
            } => write!(f, "{}({},{})", role, subject, object),
        }
    }
}

/// An immutable sentence of the logically extended language.
///
/// Sentences compare by structural equality. The derived ordering is the
/// canonical ordering used wherever a deterministic traversal of a
/// sentence set is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentence {
    Atom(Atom),
    Not(Box<Sentence>),
    And(Box<Sentence>, Box<Sentence>),
    Or(Box<Sentence>, Box<Sentence>),
    Implies(Box<Sentence>, Box<Sentence>),
}

impl Sentence {
    pub fn atom(atom: Atom) -> Self {
        Sentence::Atom(atom)
    }

    pub fn prop(name: impl Into<String>) -> Self {
        Sentence::Atom(Atom::prop(name))
    }

    pub fn not(inner: Sentence) -> Self {
        Sentence::Not(Box::new(inner))
    }

    pub fn and(left: Sentence, right: Sentence) -> Self {
        Sentence::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Sentence, right: Sentence) -> Self {
        Sentence::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Sentence, right: Sentence) -> Self {
        Sentence::Implies(Box::new(left), Box::new(right))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Sentence::Atom(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Sentence::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Binding strength, tightest first: atoms/negation bind tighter than
    /// `&`, which binds tighter than `|`, which binds tighter than `->`.
    fn precedence(&self) -> u8 {
        match self {
            Sentence::Atom(_) => 4,
            Sentence::Not(_) => 3,
            Sentence::And(_, _) => 2,
            Sentence::Or(_, _) => 1,
            Sentence::Implies(_, _) => 0,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Atom(atom) => write!(f, "{}", atom),
            Sentence::Not(inner) => {
                write!(f, "~")?;
                inner.fmt_child(f, 3)
            }
            Sentence::And(left, right) => {
                left.fmt_child(f, 2)?;
                write!(f, " & ")?;
                right.fmt_child(f, 3)
            }
            Sentence::Or(left, right) => {
                left.fmt_child(f, 1)?;
                write!(f, " | ")?;
                right.fmt_child(f, 2)
            }
            Sentence::Implies(left, right) => {
                left.fmt_child(f, 1)?;
                write!(f, " -> ")?;
                right.fmt_child(f, 0)
            }
        }
    }
}

/// A sequent: an ordered pair of finite sentence sets.
///
/// Duplicates collapse and insertion order is irrelevant, so contraction
/// is built into the representation. Equality and hashing are over exactly
/// the two sets, which makes a `Sequent` directly usable as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequent {
    pub antecedent: BTreeSet<Sentence>,
    pub consequent: BTreeSet<Sentence>,
}

impl Sequent {
    pub fn new(antecedent: BTreeSet<Sentence>, consequent: BTreeSet<Sentence>) -> Self {
        Sequent {
            antecedent,
            consequent,
        }
    }

    /// True when every sentence on both sides is atomic.
    pub fn is_atomic(&self) -> bool {
        self.antecedent.iter().all(Sentence::is_atomic)
            && self.consequent.iter().all(Sentence::is_atomic)
    }
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {}",
            self.antecedent.iter().join(", "),
            self.consequent.iter().join(", ")
        )
    }
}
