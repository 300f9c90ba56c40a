//! Applied-transition history.
//!
//! Every successful transition leaves one entry behind. The history is the
//! audit trail of a holder's lifecycle and the basis of its snapshots.

use super::name::TransitionName;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one transition applied to a holder.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::AppliedTransition;
/// use statekeeper::domains::transaction::{TransactionState, TransactionTransitionName};
/// use chrono::Utc;
///
/// let applied = AppliedTransition {
///     from: TransactionState::Unassigned,
///     name: TransactionTransitionName::Assign,
///     to: TransactionState::Assigned,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(applied.to, TransactionState::Assigned);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AppliedTransition<S: State, N: TransitionName> {
    /// State the holder was in before the transition
    pub from: S,
    /// Name of the transition that was applied
    pub name: N,
    /// State the holder moved to
    pub to: S,
    /// When the state change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// `record` returns a new history with the entry appended and leaves the
/// receiver untouched.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{AppliedTransition, StateHistory};
/// use statekeeper::domains::transaction::{TransactionState, TransactionTransitionName};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(AppliedTransition {
///         from: TransactionState::Unassigned,
///         name: TransactionTransitionName::Assign,
///         to: TransactionState::Assigned,
///         timestamp: Utc::now(),
///     })
///     .record(AppliedTransition {
///         from: TransactionState::Assigned,
///         name: TransactionTransitionName::Send,
///         to: TransactionState::Sent,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // unassigned -> assigned -> sent
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, N: TransitionName> {
    transitions: Vec<AppliedTransition<S, N>>,
}

impl<S: State, N: TransitionName> Default for StateHistory<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, N: TransitionName> StateHistory<S, N> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: AppliedTransition<S, N>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first entry followed by the `to`
    /// state of every entry.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Elapsed time between the first and last entry.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Check that each entry starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.transitions
            .windows(2)
            .all(|pair| pair[0].to == pair[1].from)
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&AppliedTransition<S, N>> {
        self.transitions.last()
    }

    /// Get all transitions in the order they were applied.
    pub fn transitions(&self) -> &[AppliedTransition<S, N>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
