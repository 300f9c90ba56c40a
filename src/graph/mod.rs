//! The legal-transition graph of a domain.
//!
//! States are the nodes and transition records the labelled edges. The
//! graph answers which transitions leave a state, which states a holder can
//! start or end in, and whether the declared edges are consistent.
//!
//! Validation uses Stillwater's `Validation` so that every defect is
//! reported in one pass rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use statekeeper::domains::transaction::{TransactionState, TransactionTransition};
//!
//! let graph = TransactionTransition::graph();
//!
//! assert!(graph.validate().is_success());
//! assert_eq!(graph.initial_states(), vec![&TransactionState::Unassigned]);
//! assert_eq!(graph.terminal_states(), vec![&TransactionState::Processed]);
//! ```

mod defects;

pub use defects::GraphDefect;

use crate::core::{State, TransitionName};
use crate::transition::TransitionRecord;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Every edge a domain declares.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionGraph<S: State, N: TransitionName> {
    edges: Vec<TransitionRecord<S, N>>,
}

impl<S: State, N: TransitionName> TransitionGraph<S, N> {
    pub fn new(edges: Vec<TransitionRecord<S, N>>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[TransitionRecord<S, N>] {
        &self.edges
    }

    /// Edges whose source is `state`.
    pub fn outgoing<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a TransitionRecord<S, N>> {
        self.edges.iter().filter(move |edge| edge.source() == state)
    }

    /// The edge labelled `name` leaving `source`, if declared.
    pub fn find(&self, source: &S, name: &N) -> Option<&TransitionRecord<S, N>> {
        self.edges
            .iter()
            .find(|edge| edge.source() == source && edge.name() == name)
    }

    pub fn is_legal(&self, source: &S, name: &N) -> bool {
        self.find(source, name).is_some()
    }

    /// Check whether exactly this (source, name, target) triple is declared.
    pub fn has_edge(&self, source: &S, name: &N, target: &S) -> bool {
        self.edges.iter().any(|edge| {
            edge.source() == source && edge.name() == name && edge.target() == target
        })
    }

    /// Every state touched by an edge, in order of first appearance.
    pub fn states(&self) -> Vec<&S> {
        let mut states: Vec<&S> = Vec::new();
        for edge in &self.edges {
            for state in [edge.source(), edge.target()] {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    /// States no edge leads into.
    pub fn initial_states(&self) -> Vec<&S> {
        self.states()
            .into_iter()
            .filter(|state| self.edges.iter().all(|edge| edge.target() != *state))
            .collect()
    }

    /// Check whether `state` is one of [`initial_states`](Self::initial_states).
    pub fn is_initial(&self, state: &S) -> bool {
        self.edges.iter().any(|edge| edge.source() == state)
            && self.edges.iter().all(|edge| edge.target() != state)
    }

    /// States no edge leaves.
    pub fn terminal_states(&self) -> Vec<&S> {
        self.states()
            .into_iter()
            .filter(|state| self.outgoing(state).next().is_none())
            .collect()
    }

    /// Check the graph, accumulating ALL defects.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<GraphDefect>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<GraphDefect>>> = Vec::new();

        for (index, edge) in self.edges.iter().enumerate() {
            if edge.source() == edge.target() {
                checks.push(Validation::fail(GraphDefect::SelfLoop {
                    edge: edge.to_string(),
                }));
            }

            if edge.source().is_final() {
                checks.push(Validation::fail(GraphDefect::LeavesFinalState {
                    edge: edge.to_string(),
                    state: edge.source().name().to_string(),
                }));
            }

            let earlier = self.edges[..index]
                .iter()
                .find(|other| other.source() == edge.source() && other.name() == edge.name());

            let check = match earlier {
                Some(other) if other.target() == edge.target() => {
                    Validation::fail(GraphDefect::Duplicate {
                        edge: edge.to_string(),
                    })
                }
                Some(other) => Validation::fail(GraphDefect::Ambiguous {
                    from: edge.source().name().to_string(),
                    name: edge.name().name().to_string(),
                    first: other.target().name().to_string(),
                    second: edge.target().name().to_string(),
                }),
                None => Validation::success(()),
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
