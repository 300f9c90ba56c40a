//! Concrete lifecycles built on the generic protocol.
//!
//! Each domain declares its vocabulary, a holder, a state machine exposing
//! the operations its transitions call, and one enum listing its transitions.
//! Only the transaction domain does real work in a side effect; the others
//! log their operations.

pub mod report;
pub mod transaction;
pub mod trip_request;
