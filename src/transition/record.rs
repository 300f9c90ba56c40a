//! Transition records: the (source, name, target) identity of a transition.

use crate::core::{State, TransitionName};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when a record is assembled from incomplete parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("Transition source state must be present")]
    MissingSource,

    #[error("Transition name must be present")]
    MissingName,

    #[error("Transition target state must be present")]
    MissingTarget,
}

/// An immutable edge of a domain's transition graph.
///
/// A record names where a transition may start, what it is called and where
/// it leads. It is the transition's identity and the reference value of the
/// source-state precondition.
///
/// # Example
///
/// ```rust
/// use statekeeper::transition::TransitionRecord;
/// use statekeeper::domains::transaction::{TransactionState, TransactionTransitionName};
///
/// let record = TransitionRecord::new(
///     TransactionState::Unassigned,
///     TransactionTransitionName::Assign,
///     TransactionState::Assigned,
/// );
///
/// assert!(record.applies_to(&TransactionState::Unassigned));
/// assert_eq!(record.to_string(), "assign (unassigned -> assigned)");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "RecordParts<S, N>")]
pub struct TransitionRecord<S: State, N: TransitionName> {
    source: S,
    name: N,
    target: S,
}

impl<S: State, N: TransitionName> TransitionRecord<S, N> {
    pub fn new(source: S, name: N, target: S) -> Self {
        Self {
            source,
            name,
            target,
        }
    }

    /// Assemble a record from parts that may be absent.
    ///
    /// Parts are checked in the order source, name, target and the first
    /// missing one is reported.
    ///
    /// ```rust
    /// use statekeeper::transition::{ConstructionError, TransitionRecord};
    /// use statekeeper::domains::transaction::{TransactionState, TransactionTransitionName};
    ///
    /// let result = TransitionRecord::from_parts(
    ///     Some(TransactionState::Assigned),
    ///     None::<TransactionTransitionName>,
    ///     Some(TransactionState::Sent),
    /// );
    /// assert_eq!(result.unwrap_err(), ConstructionError::MissingName);
    /// ```
    pub fn from_parts(
        source: Option<S>,
        name: Option<N>,
        target: Option<S>,
    ) -> Result<Self, ConstructionError> {
        let source = source.ok_or(ConstructionError::MissingSource)?;
        let name = name.ok_or(ConstructionError::MissingName)?;
        let target = target.ok_or(ConstructionError::MissingTarget)?;
        Ok(Self::new(source, name, target))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    /// Check whether a holder in `state` may take this transition.
    pub fn applies_to(&self, state: &S) -> bool {
        self.source == *state
    }
}

impl<S: State, N: TransitionName> fmt::Display for TransitionRecord<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.name.name(),
            self.source.name(),
            self.target.name()
        )
    }
}

/// Wire shape of a record before its parts are checked.
#[derive(Deserialize)]
#[serde(bound = "")]
struct RecordParts<S: State, N: TransitionName> {
    source: Option<S>,
    name: Option<N>,
    target: Option<S>,
}

impl<S: State, N: TransitionName> TryFrom<RecordParts<S, N>> for TransitionRecord<S, N> {
    type Error = ConstructionError;

    fn try_from(parts: RecordParts<S, N>) -> Result<Self, Self::Error> {
        Self::from_parts(parts.source, parts.name, parts.target)
    }
}
