//! End-to-end scenarios for the transaction lifecycle.

use chrono::Utc;
use statekeeper::checkpoint::{CheckpointError, Snapshot};
use statekeeper::core::{AppliedTransition, Lifecycle, LifecycleError};
use statekeeper::domains::transaction::{
    AccountLedger, Transaction, TransactionState, TransactionStateMachine, TransactionTransition,
    TransactionTransitionName,
};
use statekeeper::machine::{Holder, StateMachine};
use statekeeper::transition::{
    ConstructionError, PreconditionViolation, TransitionError, TransitionRecord,
};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct RecordingLedger {
    assignments: Mutex<Vec<(Uuid, String)>>,
}

impl AccountLedger for RecordingLedger {
    fn record_assignment(&self, transaction: Uuid, account_no: &str) -> Result<(), String> {
        self.assignments
            .lock()
            .map_err(|e| e.to_string())?
            .push((transaction, account_no.to_string()));
        Ok(())
    }
}

fn recorded(machine: &TransactionStateMachine<RecordingLedger>) -> Vec<String> {
    machine
        .ledger()
        .assignments
        .lock()
        .unwrap()
        .iter()
        .map(|(_, account_no)| account_no.clone())
        .collect()
}

#[test]
fn assign_then_reassign_scenario() {
    let machine = TransactionStateMachine::with_ledger(RecordingLedger::default());
    let mut trx = Transaction::new();
    assert_eq!(trx.state(), &TransactionState::Unassigned);

    machine
        .execute(&mut trx, &TransactionTransition::assign("AC-100"))
        .unwrap();
    assert_eq!(trx.state(), &TransactionState::Assigned);
    assert_eq!(recorded(&machine), vec!["AC-100".to_string()]);

    let err = machine
        .execute(&mut trx, &TransactionTransition::assign("AC-100"))
        .unwrap_err();
    match err {
        TransitionError::Precondition(PreconditionViolation::StateMismatch {
            expected,
            actual,
            holder,
            ..
        }) => {
            assert_eq!(expected, "unassigned");
            assert_eq!(actual, "assigned");
            assert_eq!(holder, format!("transaction {}", trx.id()));
        }
        other => panic!("Expected StateMismatch, got {other:?}"),
    }
    assert_eq!(trx.state(), &TransactionState::Assigned);
    assert_eq!(recorded(&machine).len(), 1);
}

#[test]
fn assign_then_send_reaches_sent() {
    let machine = TransactionStateMachine::new();
    let mut trx = Transaction::new();

    machine
        .execute(&mut trx, &TransactionTransition::assign("AC-100"))
        .unwrap();
    machine
        .execute(&mut trx, &TransactionTransition::Send)
        .unwrap();

    assert_eq!(trx.state(), &TransactionState::Sent);
    assert_eq!(
        trx.lifecycle().history().get_path(),
        vec![
            &TransactionState::Unassigned,
            &TransactionState::Assigned,
            &TransactionState::Sent,
        ]
    );
}

#[test]
fn send_then_assign_fails_at_first_step() {
    let machine = TransactionStateMachine::with_ledger(RecordingLedger::default());
    let mut trx = Transaction::new();

    let err = machine
        .execute(&mut trx, &TransactionTransition::Send)
        .unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(trx.state(), &TransactionState::Unassigned);
    assert!(trx.lifecycle().history().is_empty());
    assert!(recorded(&machine).is_empty());
}

#[test]
fn blank_account_number_fails_from_the_right_state() {
    let machine = TransactionStateMachine::with_ledger(RecordingLedger::default());
    let mut trx = Transaction::new();

    let err = machine
        .execute(&mut trx, &TransactionTransition::assign("  "))
        .unwrap_err();

    assert!(matches!(
        err,
        TransitionError::Precondition(PreconditionViolation::RequirementUnmet { .. })
    ));
    assert_eq!(trx.state(), &TransactionState::Unassigned);
    assert!(recorded(&machine).is_empty());
}

#[test]
fn wrong_state_is_reported_before_blank_account_number() {
    let machine = TransactionStateMachine::with_ledger(RecordingLedger::default());
    let mut trx = Transaction::new();
    machine
        .execute(&mut trx, &TransactionTransition::assign("AC-100"))
        .unwrap();

    let err = machine
        .execute(&mut trx, &TransactionTransition::assign(""))
        .unwrap_err();

    assert!(matches!(
        err,
        TransitionError::Precondition(PreconditionViolation::StateMismatch { .. })
    ));
    assert_eq!(recorded(&machine).len(), 1);
}

#[test]
fn record_with_absent_part_is_not_constructed() {
    let result: Result<TransitionRecord<TransactionState, TransactionTransitionName>, _> =
        TransitionRecord::from_parts(
            Some(TransactionState::Assigned),
            Some(TransactionTransitionName::Send),
            None,
        );

    assert_eq!(result, Err(ConstructionError::MissingTarget));
}

#[test]
fn holder_cannot_be_placed_past_its_initial_state() {
    let graph = TransactionTransition::graph();
    assert!(Lifecycle::start(&graph, TransactionState::Processed).is_err());

    let mut snapshot = Snapshot::capture(&Transaction::new());
    snapshot.current = TransactionState::Processed;
    let json = snapshot.to_json().unwrap();

    let err = Transaction::resume(Snapshot::from_json(&json).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        CheckpointError::ValidationFailed {
            reason: LifecycleError::NotInitial { .. },
            ..
        }
    ));
}

#[test]
fn forged_history_is_not_resumed() {
    let mut snapshot = Snapshot::capture(&Transaction::new());
    snapshot.history = snapshot.history.record(AppliedTransition {
        from: TransactionState::Unassigned,
        name: TransactionTransitionName::Process,
        to: TransactionState::Processed,
        timestamp: Utc::now(),
    });
    snapshot.current = TransactionState::Processed;
    let json = snapshot.to_json().unwrap();

    let err = Transaction::resume(Snapshot::from_json(&json).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        CheckpointError::ValidationFailed {
            reason: LifecycleError::IllegalStep { .. },
            ..
        }
    ));
}

#[test]
fn resumed_transaction_continues_its_lifecycle() {
    let machine = TransactionStateMachine::new();
    let mut trx = Transaction::new();
    machine
        .execute(&mut trx, &TransactionTransition::assign("AC-100"))
        .unwrap();

    let bytes = Snapshot::capture(&trx).to_bytes().unwrap();
    let mut resumed = Transaction::resume(Snapshot::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(resumed, trx);

    machine
        .execute(&mut resumed, &TransactionTransition::Send)
        .unwrap();
    assert_eq!(resumed.state(), &TransactionState::Sent);
}

#[test]
fn machine_can_be_shared_between_threads() {
    let machine = TransactionStateMachine::with_ledger(RecordingLedger::default());

    std::thread::scope(|scope| {
        for index in 0..4 {
            let machine = &machine;
            scope.spawn(move || {
                let mut trx = Transaction::new();
                machine
                    .execute(&mut trx, &TransactionTransition::assign(format!("AC-{index}")))
                    .unwrap();
                assert_eq!(trx.state(), &TransactionState::Assigned);
            });
        }
    });

    let mut accounts = recorded(&machine);
    accounts.sort();
    assert_eq!(accounts, vec!["AC-0", "AC-1", "AC-2", "AC-3"]);
}
