//! Memoized backward proof search over a material base.

use crate::trace::{CollectedTrace, NullTrace, TraceSink};
use nmms_base::{AtomSet, MaterialBase};
use nmms_core::{Sentence, Sequent};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Default depth budget: enough for every formula a human would type,
/// small enough to keep pathological queries bounded.
pub const DEFAULT_MAX_DEPTH: usize = 25;

/// Result of a derivability query.
///
/// `depth_reached` exceeds the configured budget exactly when some branch
/// of the search was cut off, so callers can distinguish a genuine
/// refutation from "gave up within budget" and re-run with a larger one.
#[derive(Debug, Clone)]
pub struct ProofResult {
    pub derivable: bool,
    /// Rule-application log, diagnostics only.
    pub trace: Vec<String>,
    pub depth_reached: usize,
    /// Cumulative resolved-entry cache hits for this reasoner.
    pub cache_hits: usize,
}

impl ProofResult {
    pub fn status(&self) -> &'static str {
        if self.derivable {
            "DERIVABLE"
        } else {
            "NOT_DERIVABLE"
        }
    }
}

/// Tie-break order for picking the next formula to decompose.
///
/// All eight rules are invertible, so the order cannot change the answer;
/// `Reversed` exists as a canary: if the two orders ever disagree on a
/// sequent, that is a soundness bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionOrder {
    /// Antecedent formulas before consequent ones, each side in the
    /// canonical sentence order.
    #[default]
    Canonical,
    /// The exact reverse of `Canonical`.
    Reversed,
}

/// Search state of a sequent in the memo cache. A missing entry means
/// unvisited. `InProgress` is the cycle guard: a provisional "not
/// derivable" that the outer call overwrites with the real result, never
/// to be confused with a definitive `Disproved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequentState {
    InProgress,
    Proved,
    Disproved,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Antecedent,
    Consequent,
}

#[derive(Debug, Clone, Copy)]
struct Outcome {
    derivable: bool,
    /// True when this answer depended on the depth budget running out.
    exhausted: bool,
}

/// Backward proof-search engine.
///
/// A reasoner borrows its base for its whole lifetime, so the base cannot
/// be mutated while the cache is alive; after a mutation, build a fresh
/// reasoner. A single reasoner is not safe to share across threads without
/// external synchronization, since the cache is mutated in place.
pub struct Reasoner<'a> {
    base: &'a MaterialBase,
    max_depth: usize,
    selection: SelectionOrder,
    cache: HashMap<Sequent, SequentState>,
    cache_hits: usize,
}

impl<'a> Reasoner<'a> {
    pub fn new(base: &'a MaterialBase) -> Self {
        Self::with_max_depth(base, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(base: &'a MaterialBase, max_depth: usize) -> Self {
        Reasoner {
            base,
            max_depth,
            selection: SelectionOrder::default(),
            cache: HashMap::new(),
            cache_hits: 0,
        }
    }

    pub fn selection_order(mut self, order: SelectionOrder) -> Self {
        self.selection = order;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decide `Γ ⇒ Δ`, collecting a proof trace.
    pub fn derives(
        &mut self,
        antecedent: BTreeSet<Sentence>,
        consequent: BTreeSet<Sentence>,
    ) -> ProofResult {
        let mut trace = CollectedTrace::new();
        let mut result = self.derives_with(antecedent, consequent, &mut trace);
        result.trace = trace.into_lines();
        result
    }

    /// Decide `Γ ⇒ Δ`, reporting each step to the given sink.
    pub fn derives_with(
        &mut self,
        antecedent: BTreeSet<Sentence>,
        consequent: BTreeSet<Sentence>,
        sink: &mut dyn TraceSink,
    ) -> ProofResult {
        let sequent = Sequent::new(antecedent, consequent);
        let mut depth_reached = 0;
        let outcome = self.search(&sequent, 0, sink, &mut depth_reached);
        debug!(
            sequent = %sequent,
            derivable = outcome.derivable,
            depth_reached,
            "query resolved"
        );
        ProofResult {
            derivable: outcome.derivable,
            trace: Vec::new(),
            depth_reached,
            cache_hits: self.cache_hits,
        }
    }

    /// Convenience wrapper discarding the trace.
    pub fn query(
        &mut self,
        antecedent: BTreeSet<Sentence>,
        consequent: BTreeSet<Sentence>,
    ) -> bool {
        self.derives_with(antecedent, consequent, &mut NullTrace)
            .derivable
    }

    fn search(
        &mut self,
        sequent: &Sequent,
        depth: usize,
        sink: &mut dyn TraceSink,
        depth_reached: &mut usize,
    ) -> Outcome {
        *depth_reached = (*depth_reached).max(depth);

        if depth > self.max_depth {
            sink.record(depth, &format!("[stop] depth budget exhausted at {}", sequent));
            return Outcome {
                derivable: false,
                exhausted: true,
            };
        }

        match self.cache.get(sequent) {
            Some(SequentState::Proved) => {
                self.cache_hits += 1;
                return Outcome {
                    derivable: true,
                    exhausted: false,
                };
            }
            Some(SequentState::Disproved) => {
                self.cache_hits += 1;
                return Outcome {
                    derivable: false,
                    exhausted: false,
                };
            }
            Some(SequentState::InProgress) => {
                sink.record(depth, &format!("[cycle] {}", sequent));
                return Outcome {
                    derivable: false,
                    exhausted: false,
                };
            }
            None => {}
        }

        // Cycle guard: mark in progress before recursing so re-entry on
        // the same sequent fails instead of looping.
        self.cache.insert(sequent.clone(), SequentState::InProgress);

        let outcome = if sequent.is_atomic() {
            let derivable = self.base.is_axiom(
                &atom_set(&sequent.antecedent),
                &atom_set(&sequent.consequent),
            );
            sink.record(
                depth,
                &format!(
                    "[Ax] {}: {}",
                    sequent,
                    if derivable { "axiom" } else { "no axiom applies" }
                ),
            );
            Outcome {
                derivable,
                exhausted: false,
            }
        } else {
            self.decompose(sequent, depth, sink, depth_reached)
        };

        if outcome.derivable {
            self.cache.insert(sequent.clone(), SequentState::Proved);
        } else if outcome.exhausted {
            // A refutation that depended on the budget is not a fact about
            // the sequent; evict it so a shallower visit can retry.
            self.cache.remove(sequent);
        } else {
            self.cache.insert(sequent.clone(), SequentState::Disproved);
        }
        outcome
    }

    fn decompose(
        &mut self,
        sequent: &Sequent,
        depth: usize,
        sink: &mut dyn TraceSink,
        depth_reached: &mut usize,
    ) -> Outcome {
        let mut candidates: Vec<(Side, Sentence)> = sequent
            .antecedent
            .iter()
            .filter(|s| !s.is_atomic())
            .cloned()
            .map(|s| (Side::Antecedent, s))
            .chain(
                sequent
                    .consequent
                    .iter()
                    .filter(|s| !s.is_atomic())
                    .cloned()
                    .map(|s| (Side::Consequent, s)),
            )
            .collect();
        if self.selection == SelectionOrder::Reversed {
            candidates.reverse();
        }

        // Invertibility makes the first candidate sufficient; trying the
        // rest on failure is a defensive fallback.
        let mut exhausted = false;
        for (side, active) in candidates {
            let (label, subgoals) = expand(sequent, side, &active);
            sink.record(depth, &format!("[{}] {}", label, sequent));

            let mut all_derivable = true;
            for subgoal in &subgoals {
                let outcome = self.search(subgoal, depth + 1, sink, depth_reached);
                exhausted |= outcome.exhausted;
                if !outcome.derivable {
                    all_derivable = false;
                    break;
                }
            }
            if all_derivable {
                return Outcome {
                    derivable: true,
                    exhausted: false,
                };
            }
        }

        Outcome {
            derivable: false,
            exhausted,
        }
    }
}

/// Apply the decomposition rule for `active` on `side`, yielding the rule
/// label and the subgoals that must all be derivable.
fn expand(sequent: &Sequent, side: Side, active: &Sentence) -> (&'static str, Vec<Sequent>) {
    let mut gamma = sequent.antecedent.clone();
    let mut delta = sequent.consequent.clone();
    match side {
        Side::Antecedent => {
            gamma.remove(active);
        }
        Side::Consequent => {
            delta.remove(active);
        }
    }

    match (side, active) {
        // Γ, ¬A ⇒ Δ  ⤳  Γ ⇒ A, Δ
        (Side::Antecedent, Sentence::Not(a)) => (
            "L~",
            vec![Sequent::new(gamma, with(delta, (**a).clone()))],
        ),
        // Γ ⇒ ¬A, Δ  ⤳  Γ, A ⇒ Δ
        (Side::Consequent, Sentence::Not(a)) => (
            "R~",
            vec![Sequent::new(with(gamma, (**a).clone()), delta)],
        ),
        // Γ, A∧B ⇒ Δ  ⤳  Γ, A, B ⇒ Δ   (both conjuncts together)
        (Side::Antecedent, Sentence::And(a, b)) => (
            "L&",
            vec![Sequent::new(
                with(with(gamma, (**a).clone()), (**b).clone()),
                delta,
            )],
        ),
        // Γ ⇒ A∧B, Δ  ⤳  Γ ⇒ A, Δ ∣ Γ ⇒ B, Δ ∣ Γ ⇒ A, B, Δ
        (Side::Consequent, Sentence::And(a, b)) => (
            "R&",
            vec![
                Sequent::new(gamma.clone(), with(delta.clone(), (**a).clone())),
                Sequent::new(gamma.clone(), with(delta.clone(), (**b).clone())),
                Sequent::new(gamma, with(with(delta, (**a).clone()), (**b).clone())),
            ],
        ),
        // Γ, A∨B ⇒ Δ  ⤳  Γ, A ⇒ Δ ∣ Γ, B ⇒ Δ ∣ Γ, A, B ⇒ Δ
        (Side::Antecedent, Sentence::Or(a, b)) => (
            "L|",
            vec![
                Sequent::new(with(gamma.clone(), (**a).clone()), delta.clone()),
                Sequent::new(with(gamma.clone(), (**b).clone()), delta.clone()),
                Sequent::new(with(with(gamma, (**a).clone()), (**b).clone()), delta),
            ],
        ),
        // Γ ⇒ A∨B, Δ  ⤳  Γ ⇒ A, B, Δ
        (Side::Consequent, Sentence::Or(a, b)) => (
            "R|",
            vec![Sequent::new(
                gamma,
                with(with(delta, (**a).clone()), (**b).clone()),
            )],
        ),
        // Γ, A→B ⇒ Δ  ⤳  Γ ⇒ A, Δ ∣ Γ, B ⇒ Δ ∣ Γ, B ⇒ A, Δ
        (Side::Antecedent, Sentence::Implies(a, b)) => (
            "L->",
            vec![
                Sequent::new(gamma.clone(), with(delta.clone(), (**a).clone())),
                Sequent::new(with(gamma.clone(), (**b).clone()), delta.clone()),
                Sequent::new(with(gamma, (**b).clone()), with(delta, (**a).clone())),
            ],
        ),
        // Γ ⇒ A→B, Δ  ⤳  Γ, A ⇒ B, Δ
        (Side::Consequent, Sentence::Implies(a, b)) => (
            "R->",
            vec![Sequent::new(
                with(gamma, (**a).clone()),
                with(delta, (**b).clone()),
            )],
        ),
        (_, Sentence::Atom(_)) => unreachable!("atoms are never decomposed"),
    }
}

fn with(mut set: BTreeSet<Sentence>, sentence: Sentence) -> BTreeSet<Sentence> {
    set.insert(sentence);
    set
}

fn atom_set(sentences: &BTreeSet<Sentence>) -> AtomSet {
    sentences
        .iter()
        .filter_map(Sentence::as_atom)
        .cloned()
        .collect()
}
