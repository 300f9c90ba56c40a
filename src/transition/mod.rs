//! Transitions and the protocol that applies them.
//!
//! # Key Concepts
//!
//! - **Records**: the immutable (source, name, target) identity of a transition
//! - **Transitions**: domain types fixing a record, its requirements and its side effect
//! - **Protocol**: `perform` checks preconditions, runs the side effect, then changes state

mod error;
mod protocol;
mod record;

pub use error::{PreconditionViolation, TransitionError};
pub use protocol::{check_preconditions, is_blank, perform, require, Transition};
pub use record::{ConstructionError, TransitionRecord};
