//! Structural defects of a transition graph.

use thiserror::Error;

/// A problem found while validating a domain's transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphDefect {
    #[error("Transition {edge} is declared more than once")]
    Duplicate { edge: String },

    #[error("Transition '{name}' from '{from}' leads to both '{first}' and '{second}'")]
    Ambiguous {
        from: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("Transition {edge} leaves final state '{state}'")]
    LeavesFinalState { edge: String, state: String },

    #[error("Transition {edge} does not change state")]
    SelfLoop { edge: String },
}
