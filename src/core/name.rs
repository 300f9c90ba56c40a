//! Transition-name vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for the symbolic names of a domain's transitions.
///
/// Names are kept apart from states: `assign` is an action, `assigned` is
/// where it leads. One name may label several edges of a domain's graph.
pub trait TransitionName:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Symbolic name of the transition, used in logs and error messages.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestName {
        Assign,
        Send,
    }

    impl TransitionName for TestName {
        fn name(&self) -> &str {
            match self {
                Self::Assign => "assign",
                Self::Send => "send",
            }
        }
    }

    #[test]
    fn name_returns_symbolic_value() {
        assert_eq!(TestName::Assign.name(), "assign");
        assert_eq!(TestName::Send.name(), "send");
    }

    #[test]
    fn name_serializes_correctly() {
        let json = serde_json::to_string(&TestName::Send).unwrap();
        let deserialized: TestName = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TestName::Send);
    }
}
