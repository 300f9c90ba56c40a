//! The cell that owns a holder's current state.
//!
//! A holder embeds one [`Lifecycle`]. Reading is public. A lifecycle can only
//! come into existence at an initial state of its graph, or by replaying a
//! history that the graph allows. After that the state moves only in the
//! change-state phase of [`perform`](crate::transition::perform).

use super::history::{AppliedTransition, StateHistory};
use super::name::TransitionName;
use super::state::State;
use crate::graph::TransitionGraph;
use crate::transition::TransitionRecord;
use chrono::Utc;
use thiserror::Error;

/// A lifecycle the transition graph could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("'{state}' is not an initial state")]
    NotInitial { state: String },

    #[error("step from '{found}' follows a step that ended in '{expected}'")]
    Discontinuous { expected: String, found: String },

    #[error("'{name}' from '{from}' to '{to}' is not a transition of the graph")]
    IllegalStep {
        from: String,
        name: String,
        to: String,
    },

    #[error("history ends in '{last}' but current state is '{current}'")]
    CurrentMismatch { last: String, current: String },
}

/// Current state of a holder plus the transitions that led there.
#[derive(Clone, Debug, PartialEq)]
pub struct Lifecycle<S: State, N: TransitionName> {
    current: S,
    history: StateHistory<S, N>,
}

impl<S: State, N: TransitionName> Lifecycle<S, N> {
    /// Start at a state the crate's own domains know to be initial.
    pub(crate) fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: StateHistory::new(),
        }
    }

    /// Start a lifecycle at `initial` with an empty history.
    ///
    /// `initial` must be one of the graph's initial states.
    ///
    /// ```rust
    /// use statekeeper::core::{Lifecycle, LifecycleError};
    /// use statekeeper::domains::transaction::{
    ///     TransactionState, TransactionTransition, TransactionTransitionName,
    /// };
    ///
    /// let graph = TransactionTransition::graph();
    ///
    /// let lifecycle: Lifecycle<TransactionState, TransactionTransitionName> =
    ///     Lifecycle::start(&graph, TransactionState::Unassigned).unwrap();
    /// assert_eq!(lifecycle.current(), &TransactionState::Unassigned);
    ///
    /// let err = Lifecycle::start(&graph, TransactionState::Processed).unwrap_err();
    /// assert!(matches!(err, LifecycleError::NotInitial { .. }));
    /// ```
    pub fn start(graph: &TransitionGraph<S, N>, initial: S) -> Result<Self, LifecycleError> {
        if !graph.is_initial(&initial) {
            return Err(LifecycleError::NotInitial {
                state: initial.name().to_string(),
            });
        }
        Ok(Self::new(initial))
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn history(&self) -> &StateHistory<S, N> {
        &self.history
    }

    /// Move to the record's target and log the step.
    pub(crate) fn advance(&mut self, record: &TransitionRecord<S, N>) {
        let applied = AppliedTransition {
            from: self.current.clone(),
            name: record.name().clone(),
            to: record.target().clone(),
            timestamp: Utc::now(),
        };
        self.history = self.history.record(applied);
        self.current = record.target().clone();
    }

    /// Rebuild a lifecycle by walking `history` through `graph`.
    ///
    /// The walk starts at an initial state, each step is an edge of the
    /// graph leaving the state the previous step reached, and the last state
    /// reached is `current`. An empty history means `current` itself must be
    /// initial.
    pub(crate) fn replay(
        graph: &TransitionGraph<S, N>,
        current: S,
        history: StateHistory<S, N>,
    ) -> Result<Self, LifecycleError> {
        let mut reached = match history.transitions().first() {
            Some(first) => first.from.clone(),
            None => current.clone(),
        };
        if !graph.is_initial(&reached) {
            return Err(LifecycleError::NotInitial {
                state: reached.name().to_string(),
            });
        }

        for step in history.transitions() {
            if step.from != reached {
                return Err(LifecycleError::Discontinuous {
                    expected: reached.name().to_string(),
                    found: step.from.name().to_string(),
                });
            }
            if !graph.has_edge(&step.from, &step.name, &step.to) {
                return Err(LifecycleError::IllegalStep {
                    from: step.from.name().to_string(),
                    name: step.name.name().to_string(),
                    to: step.to.name().to_string(),
                });
            }
            reached = step.to.clone();
        }

        if reached != current {
            return Err(LifecycleError::CurrentMismatch {
                last: reached.name().to_string(),
                current: current.name().to_string(),
            });
        }

        Ok(Self { current, history })
    }
}
