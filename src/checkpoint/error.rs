//! Snapshot error types.

use crate::core::LifecycleError;
use thiserror::Error;
use uuid::Uuid;

/// Why a snapshot could not be written, read or restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("Cannot encode snapshot as {format}: {reason}")]
    Encode { format: &'static str, reason: String },

    #[error("Cannot decode {format} snapshot: {reason}")]
    Decode { format: &'static str, reason: String },

    #[error("Snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot describes a lifecycle the transition protocol could not
    /// have produced.
    #[error("Snapshot of holder {holder} failed validation: {reason}")]
    ValidationFailed {
        holder: Uuid,
        #[source]
        reason: LifecycleError,
    },
}
