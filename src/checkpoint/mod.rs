//! Snapshots of a holder's lifecycle.
//!
//! A snapshot captures where a holder is and how it got there, so a
//! long-lived entity can be written out and picked up again later. Only the
//! lifecycle is captured; the holder's other data is the caller's business.
//!
//! Restoring replays the captured history through the domain's transition
//! graph, so a snapshot cannot place a holder anywhere the protocol could
//! not have taken it.
//!
//! # Example
//!
//! ```rust
//! use statekeeper::checkpoint::Snapshot;
//! use statekeeper::domains::transaction::{
//!     Transaction, TransactionStateMachine, TransactionTransition,
//! };
//! use statekeeper::machine::{Holder, StateMachine};
//!
//! let machine = TransactionStateMachine::new();
//! let mut trx = Transaction::new();
//! machine.execute(&mut trx, &TransactionTransition::assign("AC-100")).unwrap();
//!
//! let json = Snapshot::capture(&trx).to_json().unwrap();
//!
//! let restored = Transaction::resume(Snapshot::from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored, trx);
//! ```

use crate::core::{Lifecycle, State, StateHistory, TransitionName};
use crate::graph::TransitionGraph;
use crate::machine::Holder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a holder's lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State, N: TransitionName> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// Identity of the holder the snapshot was taken from
    pub holder_id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Current state of the holder
    pub current: S,

    /// Every transition applied to the holder
    pub history: StateHistory<S, N>,
}

impl<S: State, N: TransitionName> Snapshot<S, N> {
    pub fn capture<H>(holder: &H) -> Self
    where
        H: Holder<State = S, Name = N>,
    {
        let lifecycle = holder.lifecycle();
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            holder_id: holder.id(),
            taken_at: Utc::now(),
            current: lifecycle.current().clone(),
            history: lifecycle.history().clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode {
            format: "json",
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::Decode {
            format: "json",
            reason: e.to_string(),
        })
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            format: "bincode",
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            format: "bincode",
            reason: e.to_string(),
        })
    }

    /// Turn the snapshot back into a lifecycle of `graph`.
    ///
    /// A snapshot is only accepted if the transition protocol could have
    /// produced it: the history must start at an initial state of `graph`,
    /// walk its edges without gaps and end in `current`. With an empty
    /// history, `current` must itself be initial.
    pub fn into_lifecycle(
        self,
        graph: &TransitionGraph<S, N>,
    ) -> Result<Lifecycle<S, N>, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let holder = self.holder_id;
        Lifecycle::replay(graph, self.current, self.history).map_err(|reason| {
            warn!(holder = %holder, error = %reason, "Snapshot rejected");
            CheckpointError::ValidationFailed { holder, reason }
        })
    }
}
