//! Lifecycle state vocabulary.
//!
//! Every domain declares a closed set of states its holders move through.
//! The enum itself carries no transition logic; legality lives in
//! [`TransitionRecord`](crate::transition::TransitionRecord) values.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// States are plain values. Comparing two states is how the transition
/// protocol decides whether a transition applies to a holder.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transition records and history
/// - `PartialEq`: the source-state precondition compares states
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states are part of lifecycle snapshots
///
/// # Example
///
/// ```rust
/// use statekeeper::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Open,
///     Shipped,
///     Closed,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Shipped => "shipped",
///             Self::Closed => "closed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed)
///     }
/// }
///
/// assert_eq!(OrderState::Shipped.name(), "shipped");
/// assert!(OrderState::Closed.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Symbolic name of the state, used in logs and error messages.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// No transition is expected to leave a terminal state; the transition
    /// graph reports an edge that does as a defect.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Unassigned,
        Assigned,
        Processed,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Unassigned => "unassigned",
                Self::Assigned => "assigned",
                Self::Processed => "processed",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Processed)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Unassigned.name(), "unassigned");
        assert_eq!(TestState::Assigned.name(), "assigned");
        assert_eq!(TestState::Processed.name(), "processed");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Unassigned.is_final());
        assert!(!TestState::Assigned.is_final());
        assert!(TestState::Processed.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Assigned;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Assigned, TestState::Assigned);
        assert_ne!(TestState::Assigned, TestState::Unassigned);
    }
}
