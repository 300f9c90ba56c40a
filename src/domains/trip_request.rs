//! Trip-request lifecycle.
//!
//! ```text
//! draft --waitForConfirmation--> waitingForConfirmation --confirm--> confirmed
//!     --process--> processing --complete--> completed
//!
//! waitingForConfirmation --cancel--> canceled
//! confirmed --cancel--> canceled
//! ```
//!
//! `cancel` labels two edges; each is its own transition variant.

use crate::checkpoint::{CheckpointError, Snapshot};
use crate::core::Lifecycle;
use crate::graph::TransitionGraph;
use crate::machine::{Holder, LifecycleKey, StateMachine};
use crate::transition::{Transition, TransitionRecord};
use tracing::info;
use uuid::Uuid;

crate::state_enum! {
    /// Lifecycle stages of a trip request.
    pub enum TripRequestState {
        Draft => "draft",
        WaitingForConfirmation => "waitingForConfirmation",
        Confirmed => "confirmed",
        Processing => "processing",
        Completed => "completed",
        Canceled => "canceled",
    }
    final: [Completed, Canceled]
}

crate::transition_name_enum! {
    pub enum TripRequestTransitionName {
        WaitForConfirmation => "waitForConfirmation",
        Confirm => "confirm",
        Process => "process",
        Complete => "complete",
        Cancel => "cancel",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TripRequest {
    id: Uuid,
    lifecycle: Lifecycle<TripRequestState, TripRequestTransitionName>,
}

impl TripRequest {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            lifecycle: Lifecycle::new(TripRequestState::Draft),
        }
    }

    /// Rebuild a trip request from a snapshot checked against
    /// [`TripRequestTransition::graph`].
    pub fn resume(
        snapshot: Snapshot<TripRequestState, TripRequestTransitionName>,
    ) -> Result<Self, CheckpointError> {
        let id = snapshot.holder_id;
        let lifecycle = snapshot.into_lifecycle(&TripRequestTransition::graph())?;
        Ok(Self { id, lifecycle })
    }
}

impl Default for TripRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl Holder for TripRequest {
    type State = TripRequestState;
    type Name = TripRequestTransitionName;
    const KIND: &'static str = "trip request";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle<TripRequestState, TripRequestTransitionName> {
        &self.lifecycle
    }

    fn lifecycle_mut(
        &mut self,
        _key: LifecycleKey,
    ) -> &mut Lifecycle<TripRequestState, TripRequestTransitionName> {
        &mut self.lifecycle
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TripRequestStateMachine;

impl TripRequestStateMachine {
    pub fn wait_for_confirmation(&self, request: &TripRequest) {
        info!(request = %request.describe(), "Awaiting confirmation");
    }

    pub fn confirm(&self, request: &TripRequest) {
        info!(request = %request.describe(), "Trip request confirmed");
    }

    pub fn process(&self, request: &TripRequest) {
        info!(request = %request.describe(), "Processing trip request");
    }

    pub fn complete(&self, request: &TripRequest) {
        info!(request = %request.describe(), "Trip request completed");
    }

    pub fn cancel(&self, request: &TripRequest) {
        info!(request = %request.describe(), state = %request.state(), "Trip request canceled");
    }
}

impl StateMachine for TripRequestStateMachine {
    type Holder = TripRequest;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TripRequestTransition {
    WaitForConfirmation,
    Confirm,
    Process,
    Complete,
    /// Cancel while still waiting for confirmation.
    CancelUnconfirmed,
    /// Cancel after confirmation, before processing starts.
    CancelConfirmed,
}

impl TripRequestTransition {
    pub const ALL: [TripRequestTransition; 6] = [
        Self::WaitForConfirmation,
        Self::Confirm,
        Self::Process,
        Self::Complete,
        Self::CancelUnconfirmed,
        Self::CancelConfirmed,
    ];

    pub fn edge(&self) -> TransitionRecord<TripRequestState, TripRequestTransitionName> {
        use TripRequestState as S;
        use TripRequestTransitionName as N;

        let (source, name, target) = match self {
            Self::WaitForConfirmation => {
                (S::Draft, N::WaitForConfirmation, S::WaitingForConfirmation)
            }
            Self::Confirm => (S::WaitingForConfirmation, N::Confirm, S::Confirmed),
            Self::Process => (S::Confirmed, N::Process, S::Processing),
            Self::Complete => (S::Processing, N::Complete, S::Completed),
            Self::CancelUnconfirmed => (S::WaitingForConfirmation, N::Cancel, S::Canceled),
            Self::CancelConfirmed => (S::Confirmed, N::Cancel, S::Canceled),
        };
        TransitionRecord::new(source, name, target)
    }

    pub fn graph() -> TransitionGraph<TripRequestState, TripRequestTransitionName> {
        TransitionGraph::new(Self::ALL.iter().map(Self::edge).collect())
    }
}

impl Transition<TripRequestStateMachine> for TripRequestTransition {
    fn record(&self) -> TransitionRecord<TripRequestState, TripRequestTransitionName> {
        self.edge()
    }

    fn execute(&self, machine: &TripRequestStateMachine, holder: &TripRequest) -> Result<(), String> {
        match self {
            Self::WaitForConfirmation => machine.wait_for_confirmation(holder),
            Self::Confirm => machine.confirm(holder),
            Self::Process => machine.process(holder),
            Self::Complete => machine.complete(holder),
            Self::CancelUnconfirmed | Self::CancelConfirmed => machine.cancel(holder),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    fn confirmed_request(machine: &TripRequestStateMachine) -> TripRequest {
        let mut request = TripRequest::new();
        machine
            .execute(&mut request, &TripRequestTransition::WaitForConfirmation)
            .unwrap();
        machine
            .execute(&mut request, &TripRequestTransition::Confirm)
            .unwrap();
        request
    }

    #[test]
    fn confirm_moves_waiting_request_to_confirmed() {
        let machine = TripRequestStateMachine;
        let request = confirmed_request(&machine);

        assert_eq!(request.state(), &TripRequestState::Confirmed);
    }

    #[test]
    fn confirm_from_draft_is_rejected() {
        let machine = TripRequestStateMachine;
        let mut request = TripRequest::new();

        let err = machine
            .execute(&mut request, &TripRequestTransition::Confirm)
            .unwrap_err();

        assert!(err.is_precondition_violation());
        assert_eq!(request.state(), &TripRequestState::Draft);
    }

    #[test]
    fn cancel_applies_only_from_its_own_source() {
        let machine = TripRequestStateMachine;
        let mut request = confirmed_request(&machine);

        assert!(!machine.can_execute(&request, &TripRequestTransition::CancelUnconfirmed));
        machine
            .execute(&mut request, &TripRequestTransition::CancelConfirmed)
            .unwrap();

        assert_eq!(request.state(), &TripRequestState::Canceled);
        assert!(request.state().is_final());
    }

    #[test]
    fn canceled_request_cannot_be_processed() {
        let machine = TripRequestStateMachine;
        let mut request = TripRequest::new();
        machine
            .execute(&mut request, &TripRequestTransition::WaitForConfirmation)
            .unwrap();
        machine
            .execute(&mut request, &TripRequestTransition::CancelUnconfirmed)
            .unwrap();

        let err = machine
            .execute(&mut request, &TripRequestTransition::Process)
            .unwrap_err();

        assert!(err.is_precondition_violation());
        assert_eq!(request.state(), &TripRequestState::Canceled);
    }

    #[test]
    fn completed_path_is_recorded() {
        let machine = TripRequestStateMachine;
        let mut request = confirmed_request(&machine);
        machine
            .execute(&mut request, &TripRequestTransition::Process)
            .unwrap();
        machine
            .execute(&mut request, &TripRequestTransition::Complete)
            .unwrap();

        let names: Vec<TripRequestTransitionName> = request
            .lifecycle()
            .history()
            .transitions()
            .iter()
            .map(|applied| applied.name)
            .collect();
        assert_eq!(
            names,
            vec![
                TripRequestTransitionName::WaitForConfirmation,
                TripRequestTransitionName::Confirm,
                TripRequestTransitionName::Process,
                TripRequestTransitionName::Complete,
            ]
        );
    }

    #[test]
    fn graph_is_consistent() {
        let graph = TripRequestTransition::graph();

        assert!(graph.validate().is_success());
        for transition in TripRequestTransition::ALL {
            let edge = transition.edge();
            assert_eq!(graph.find(edge.source(), edge.name()), Some(&edge));
        }
        assert_eq!(graph.initial_states(), vec![&TripRequestState::Draft]);
        assert!(graph.is_initial(TripRequest::new().state()));
        assert_eq!(
            graph.terminal_states(),
            vec![&TripRequestState::Completed, &TripRequestState::Canceled]
        );
        assert_eq!(
            graph
                .outgoing(&TripRequestState::Confirmed)
                .map(|edge| *edge.name())
                .collect::<Vec<_>>(),
            vec![TripRequestTransitionName::Process, TripRequestTransitionName::Cancel]
        );
    }
}
