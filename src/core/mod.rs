//! Core lifecycle vocabulary and bookkeeping.
//!
//! This module contains the pieces every domain builds on:
//! - State and transition-name vocabularies via the `State` and
//!   `TransitionName` traits
//! - The `Lifecycle` cell that owns a holder's current state
//! - Immutable history of applied transitions

mod history;
mod lifecycle;
mod name;
mod state;

pub use history::{AppliedTransition, StateHistory};
pub use lifecycle::{Lifecycle, LifecycleError};
pub use name::TransitionName;
pub use state::State;
