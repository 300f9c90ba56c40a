//! Transaction lifecycle.
//!
//! ```text
//! unassigned --assign--> assigned --send--> sent --export--> exported --process--> processed
//! ```
//!
//! Assigning an account number is the one transition with a requirement:
//! the account number must be present and not blank. The assignment itself is
//! handed to an [`AccountLedger`].

use crate::checkpoint::{CheckpointError, Snapshot};
use crate::core::Lifecycle;
use crate::graph::TransitionGraph;
use crate::machine::{Holder, LifecycleKey, StateMachine};
use crate::transition::{is_blank, require, Transition, TransitionRecord};
use tracing::info;
use uuid::Uuid;

crate::state_enum! {
    /// Lifecycle stages of a transaction.
    pub enum TransactionState {
        Unassigned => "unassigned",
        Assigned => "assigned",
        Sent => "sent",
        Exported => "exported",
        Processed => "processed",
    }
    final: [Processed]
}

crate::transition_name_enum! {
    /// Actions that move a transaction along its lifecycle.
    pub enum TransactionTransitionName {
        Assign => "assign",
        Send => "send",
        Export => "export",
        Process => "process",
    }
}

/// A transaction whose lifecycle starts at [`TransactionState::Unassigned`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    id: Uuid,
    lifecycle: Lifecycle<TransactionState, TransactionTransitionName>,
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            lifecycle: Lifecycle::new(TransactionState::Unassigned),
        }
    }

    /// Rebuild a transaction from a snapshot.
    ///
    /// The snapshot's history is replayed through [`TransactionTransition::graph`];
    /// a lifecycle the protocol could not have produced is refused.
    pub fn resume(
        snapshot: Snapshot<TransactionState, TransactionTransitionName>,
    ) -> Result<Self, CheckpointError> {
        let id = snapshot.holder_id;
        let lifecycle = snapshot.into_lifecycle(&TransactionTransition::graph())?;
        Ok(Self { id, lifecycle })
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Holder for Transaction {
    type State = TransactionState;
    type Name = TransactionTransitionName;
    const KIND: &'static str = "transaction";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle<TransactionState, TransactionTransitionName> {
        &self.lifecycle
    }

    fn lifecycle_mut(
        &mut self,
        _key: LifecycleKey,
    ) -> &mut Lifecycle<TransactionState, TransactionTransitionName> {
        &mut self.lifecycle
    }
}

/// Receives account-number assignments.
pub trait AccountLedger {
    fn record_assignment(&self, transaction: Uuid, account_no: &str) -> Result<(), String>;
}

/// Ledger that only logs assignments.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLedger;

impl AccountLedger for TracingLedger {
    fn record_assignment(&self, transaction: Uuid, account_no: &str) -> Result<(), String> {
        info!(transaction = %transaction, account_no, "Account number recorded");
        Ok(())
    }
}

/// State machine driving [`Transaction`] holders.
#[derive(Debug, Default, Clone)]
pub struct TransactionStateMachine<L = TracingLedger> {
    ledger: L,
}

impl TransactionStateMachine<TracingLedger> {
    pub fn new() -> Self {
        Self {
            ledger: TracingLedger,
        }
    }
}

impl<L: AccountLedger> TransactionStateMachine<L> {
    pub fn with_ledger(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn assign(&self, transaction: &Transaction, account_no: &str) -> Result<(), String> {
        info!(
            transaction = %transaction.describe(),
            account_no,
            "Assigning account number"
        );
        self.ledger.record_assignment(transaction.id(), account_no)
    }

    pub fn send(&self, transaction: &Transaction) {
        info!(transaction = %transaction.describe(), "Sending transaction");
    }

    pub fn export(&self, transaction: &Transaction) {
        info!(transaction = %transaction.describe(), "Exporting transaction");
    }

    pub fn process(&self, transaction: &Transaction) {
        info!(transaction = %transaction.describe(), "Processing transaction");
    }
}

impl<L: AccountLedger> StateMachine for TransactionStateMachine<L> {
    type Holder = Transaction;
}

/// The transitions of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionTransition {
    /// `account_no` is `None` when the caller never supplied one.
    Assign { account_no: Option<String> },
    Send,
    Export,
    Process,
}

impl TransactionTransition {
    pub fn assign(account_no: impl Into<String>) -> Self {
        Self::Assign {
            account_no: Some(account_no.into()),
        }
    }

    /// The fixed record of this transition.
    pub fn edge(&self) -> TransitionRecord<TransactionState, TransactionTransitionName> {
        use TransactionState as S;
        use TransactionTransitionName as N;

        match self {
            Self::Assign { .. } => TransitionRecord::new(S::Unassigned, N::Assign, S::Assigned),
            Self::Send => TransitionRecord::new(S::Assigned, N::Send, S::Sent),
            Self::Export => TransitionRecord::new(S::Sent, N::Export, S::Exported),
            Self::Process => TransitionRecord::new(S::Exported, N::Process, S::Processed),
        }
    }

    /// Every edge of the transaction lifecycle.
    pub fn graph() -> TransitionGraph<TransactionState, TransactionTransitionName> {
        let kinds = [
            Self::Assign { account_no: None },
            Self::Send,
            Self::Export,
            Self::Process,
        ];
        TransitionGraph::new(kinds.iter().map(Self::edge).collect())
    }
}

impl<L: AccountLedger> Transition<TransactionStateMachine<L>> for TransactionTransition {
    fn record(&self) -> TransitionRecord<TransactionState, TransactionTransitionName> {
        self.edge()
    }

    fn check_requirements(&self, _holder: &Transaction) -> Result<(), String> {
        match self {
            Self::Assign { account_no } => require(
                account_no.as_deref().is_some_and(|value| !is_blank(value)),
                "account number must be present and not blank",
            ),
            Self::Send | Self::Export | Self::Process => Ok(()),
        }
    }

    fn execute(
        &self,
        machine: &TransactionStateMachine<L>,
        holder: &Transaction,
    ) -> Result<(), String> {
        match self {
            Self::Assign {
                account_no: Some(account_no),
            } => machine.assign(holder, account_no),
            // `perform` refuses this in check_requirements; only a direct
            // call to `execute` gets here.
            Self::Assign { account_no: None } => Err("account number is missing".to_string()),
            Self::Send => {
                machine.send(holder);
                Ok(())
            }
            Self::Export => {
                machine.export(holder);
                Ok(())
            }
            Self::Process => {
                machine.process(holder);
                Ok(())
            }
        }
    }
}
