//! The three-phase transition protocol.
//!
//! [`perform`] runs, in order:
//!
//! 1. precondition check: the holder must be in the record's source state,
//!    then the transition's own requirements must hold;
//! 2. execute: the transition's side effect against the state machine;
//! 3. change state: the holder moves to the record's target.
//!
//! A phase runs only if the one before it succeeded. A failure leaves the
//! holder exactly as it was.

use super::error::{PreconditionViolation, TransitionError};
use super::record::TransitionRecord;
use crate::core::State;
use crate::machine::{Holder, LifecycleKey, NameOf, StateMachine, StateOf};
use tracing::{debug, info, warn};

/// One kind of transition of a domain driven by machine `M`.
///
/// Implementors fix their record and side effect; the state check and the
/// state change are done by [`perform`] and cannot be overridden.
pub trait Transition<M: StateMachine> {
    /// The fixed (source, name, target) triple of this transition.
    fn record(&self) -> TransitionRecord<StateOf<M>, NameOf<M>>;

    /// Transition-specific requirements, checked after the source state.
    ///
    /// Return the first unmet requirement as a message. Checks run in the
    /// order they are written; use [`require`] to chain them with `?`.
    fn check_requirements(&self, _holder: &M::Holder) -> Result<(), String> {
        Ok(())
    }

    /// The side effect of the transition.
    ///
    /// The holder is borrowed immutably: its state only changes after this
    /// returns `Ok`.
    fn execute(&self, machine: &M, holder: &M::Holder) -> Result<(), String>;
}

/// Turn a condition into a requirement result.
///
/// ```rust
/// use statekeeper::transition::require;
///
/// assert!(require(true, "always met").is_ok());
/// assert_eq!(require(false, "never met"), Err("never met".to_string()));
/// ```
pub fn require(condition: bool, requirement: impl Into<String>) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(requirement.into())
    }
}

/// Check for an empty or whitespace-only string.
///
/// ```rust
/// use statekeeper::transition::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank(" \t\n"));
/// assert!(!is_blank(" AC-100 "));
/// ```
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Phase 1: run every precondition of `transition` against `holder`.
///
/// The source-state check always runs first; requirements are only
/// consulted once the holder is known to be in the right state.
pub fn check_preconditions<M, T>(
    transition: &T,
    holder: &M::Holder,
) -> Result<(), PreconditionViolation>
where
    M: StateMachine,
    T: Transition<M> + ?Sized,
{
    let record = transition.record();
    let current = holder.state();

    if !record.applies_to(current) {
        return Err(PreconditionViolation::StateMismatch {
            transition: record.to_string(),
            holder: holder.describe(),
            expected: record.source().name().to_string(),
            actual: current.name().to_string(),
        });
    }

    transition
        .check_requirements(holder)
        .map_err(|requirement| PreconditionViolation::RequirementUnmet {
            transition: record.to_string(),
            holder: holder.describe(),
            requirement,
        })
}

/// Apply `transition` to `holder` using `machine` for its side effect.
///
/// # Example
///
/// ```rust
/// use statekeeper::domains::transaction::{
///     Transaction, TransactionState, TransactionStateMachine, TransactionTransition,
/// };
/// use statekeeper::machine::Holder;
/// use statekeeper::transition::perform;
///
/// let machine = TransactionStateMachine::new();
/// let mut trx = Transaction::new();
///
/// let assign = TransactionTransition::assign("AC-100");
/// perform(&assign, &mut trx, &machine).unwrap();
/// assert_eq!(trx.state(), &TransactionState::Assigned);
///
/// // The holder is no longer in the source state of `assign`.
/// let err = perform(&assign, &mut trx, &machine).unwrap_err();
/// assert!(err.is_precondition_violation());
/// assert_eq!(trx.state(), &TransactionState::Assigned);
/// ```
pub fn perform<M, T>(
    transition: &T,
    holder: &mut M::Holder,
    machine: &M,
) -> Result<(), TransitionError>
where
    M: StateMachine,
    T: Transition<M> + ?Sized,
{
    let record = transition.record();
    debug!(transition = %record, holder = %holder.describe(), "Performing transition");

    if let Err(violation) = check_preconditions::<M, T>(transition, holder) {
        warn!(error = %violation, "Transition rejected");
        return Err(violation.into());
    }

    if let Err(reason) = transition.execute(machine, holder) {
        warn!(transition = %record, holder = %holder.describe(), reason = %reason, "Transition action failed");
        return Err(TransitionError::ActionFailed {
            transition: record.to_string(),
            reason,
        });
    }

    change_state(&record, holder);
    Ok(())
}

/// Phase 3: move the holder to the record's target.
fn change_state<H: Holder>(record: &TransitionRecord<H::State, H::Name>, holder: &mut H) {
    let from = holder.state().name().to_string();
    holder.lifecycle_mut(LifecycleKey::new()).advance(record);
    info!(
        holder = %holder.describe(),
        from = %from,
        to = %record.target().name(),
        "State changed"
    );
}
