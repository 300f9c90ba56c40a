//! Errors raised while performing a transition.

use thiserror::Error;

/// A transition was refused before any side effect ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionViolation {
    #[error(
        "Transition {transition} is not applicable to {holder}: expected state '{expected}', found '{actual}'"
    )]
    StateMismatch {
        transition: String,
        holder: String,
        expected: String,
        actual: String,
    },

    #[error("Transition {transition} is not applicable to {holder}: {requirement}")]
    RequirementUnmet {
        transition: String,
        holder: String,
        requirement: String,
    },
}

/// Errors returned by [`perform`](crate::transition::perform) and
/// [`StateMachine::execute`](crate::machine::StateMachine::execute).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),

    #[error("Transition {transition} failed: {reason}")]
    ActionFailed { transition: String, reason: String },
}

impl TransitionError {
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mismatch_message_names_transition_and_holder() {
        let err = TransitionError::from(PreconditionViolation::StateMismatch {
            transition: "assign (unassigned -> assigned)".to_string(),
            holder: "transaction 42".to_string(),
            expected: "unassigned".to_string(),
            actual: "assigned".to_string(),
        });

        assert!(err.is_precondition_violation());
        assert_eq!(
            err.to_string(),
            "Transition assign (unassigned -> assigned) is not applicable to transaction 42: \
             expected state 'unassigned', found 'assigned'"
        );
    }

    #[test]
    fn action_failure_is_not_a_precondition_violation() {
        let err = TransitionError::ActionFailed {
            transition: "send (assigned -> sent)".to_string(),
            reason: "gateway offline".to_string(),
        };

        assert!(!err.is_precondition_violation());
        assert!(err.to_string().contains("gateway offline"));
    }
}
