//! Report lifecycle.
//!
//! ```text
//! draft --request--> requested --makePending--> pending --create--> created --download--> downloaded
//! ```

use crate::checkpoint::{CheckpointError, Snapshot};
use crate::core::Lifecycle;
use crate::graph::TransitionGraph;
use crate::machine::{Holder, LifecycleKey, StateMachine};
use crate::transition::{Transition, TransitionRecord};
use tracing::info;
use uuid::Uuid;

crate::state_enum! {
    /// Lifecycle stages of a report.
    ///
    /// `Draft` is the state of a report nobody has requested yet.
    pub enum ReportState {
        Draft => "draft",
        Requested => "requested",
        Pending => "pending",
        Created => "created",
        Downloaded => "downloaded",
    }
    final: [Downloaded]
}

crate::transition_name_enum! {
    pub enum ReportTransitionName {
        Request => "request",
        MakePending => "makePending",
        Create => "create",
        Download => "download",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    id: Uuid,
    lifecycle: Lifecycle<ReportState, ReportTransitionName>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            lifecycle: Lifecycle::new(ReportState::Draft),
        }
    }

    /// Rebuild a report from a snapshot checked against [`ReportTransition::graph`].
    pub fn resume(
        snapshot: Snapshot<ReportState, ReportTransitionName>,
    ) -> Result<Self, CheckpointError> {
        let id = snapshot.holder_id;
        let lifecycle = snapshot.into_lifecycle(&ReportTransition::graph())?;
        Ok(Self { id, lifecycle })
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Holder for Report {
    type State = ReportState;
    type Name = ReportTransitionName;
    const KIND: &'static str = "report";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle<ReportState, ReportTransitionName> {
        &self.lifecycle
    }

    fn lifecycle_mut(
        &mut self,
        _key: LifecycleKey,
    ) -> &mut Lifecycle<ReportState, ReportTransitionName> {
        &mut self.lifecycle
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReportStateMachine;

impl ReportStateMachine {
    pub fn request(&self, report: &Report) {
        info!(report = %report.describe(), "Report requested");
    }

    pub fn make_pending(&self, report: &Report) {
        info!(report = %report.describe(), "Report pending");
    }

    pub fn create(&self, report: &Report) {
        info!(report = %report.describe(), "Report created");
    }

    pub fn download(&self, report: &Report) {
        info!(report = %report.describe(), "Report downloaded");
    }
}

impl StateMachine for ReportStateMachine {
    type Holder = Report;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportTransition {
    Request,
    MakePending,
    Create,
    Download,
}

impl ReportTransition {
    pub const ALL: [ReportTransition; 4] = [
        Self::Request,
        Self::MakePending,
        Self::Create,
        Self::Download,
    ];

    pub fn edge(&self) -> TransitionRecord<ReportState, ReportTransitionName> {
        use ReportState as S;
        use ReportTransitionName as N;

        match self {
            Self::Request => TransitionRecord::new(S::Draft, N::Request, S::Requested),
            Self::MakePending => TransitionRecord::new(S::Requested, N::MakePending, S::Pending),
            Self::Create => TransitionRecord::new(S::Pending, N::Create, S::Created),
            Self::Download => TransitionRecord::new(S::Created, N::Download, S::Downloaded),
        }
    }

    pub fn graph() -> TransitionGraph<ReportState, ReportTransitionName> {
        TransitionGraph::new(Self::ALL.iter().map(Self::edge).collect())
    }
}

impl Transition<ReportStateMachine> for ReportTransition {
    fn record(&self) -> TransitionRecord<ReportState, ReportTransitionName> {
        self.edge()
    }

    fn execute(&self, machine: &ReportStateMachine, holder: &Report) -> Result<(), String> {
        match self {
            Self::Request => machine.request(holder),
            Self::MakePending => machine.make_pending(holder),
            Self::Create => machine.create(holder),
            Self::Download => machine.download(holder),
        }
        Ok(())
    }
}
