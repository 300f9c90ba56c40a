//! Statekeeper: typed lifecycle state machines
//!
//! Statekeeper models entities whose lifecycle moves through a closed set of
//! named states. Every move is an explicit transition with a fixed source
//! state, name and target state, and it is applied in three phases:
//!
//! 1. **Check preconditions**: the holder must be in the source state, then
//!    the transition's own requirements must hold
//! 2. **Execute**: the transition's side effect runs against the domain's
//!    state machine
//! 3. **Change state**: the holder moves to the target state
//!
//! A failure in the first two phases leaves the holder untouched.
//!
//! # Core Concepts
//!
//! - **State / TransitionName**: per-domain vocabularies, usually declared
//!   with [`state_enum!`] and [`transition_name_enum!`]
//! - **TransitionRecord**: the immutable (source, name, target) triple
//! - **Holder**: the entity whose [`Lifecycle`](crate::core::Lifecycle) is tracked
//! - **StateMachine**: the per-domain context transitions call back into
//! - **TransitionGraph**: every edge of a domain, with structural validation
//!
//! # Example
//!
//! ```rust
//! use statekeeper::domains::transaction::{
//!     Transaction, TransactionState, TransactionStateMachine, TransactionTransition,
//! };
//! use statekeeper::machine::{Holder, StateMachine};
//!
//! let machine = TransactionStateMachine::new();
//! let mut trx = Transaction::new();
//!
//! machine.execute(&mut trx, &TransactionTransition::assign("AC-100")).unwrap();
//! machine.execute(&mut trx, &TransactionTransition::Send).unwrap();
//! assert_eq!(trx.state(), &TransactionState::Sent);
//!
//! // Sending again is not legal from `sent`.
//! assert!(machine.execute(&mut trx, &TransactionTransition::Send).is_err());
//! assert_eq!(trx.state(), &TransactionState::Sent);
//! ```

mod macros;

pub mod checkpoint;
pub mod core;
pub mod domains;
pub mod graph;
pub mod machine;
pub mod transition;

// Re-export commonly used types
pub use self::core::{Lifecycle, State, StateHistory, TransitionName};
pub use graph::TransitionGraph;
pub use machine::{Holder, StateMachine};
pub use transition::{perform, Transition, TransitionError, TransitionRecord};
