//! Blocking synchronization primitives used by the coupled list and its tests.

pub mod countdown_event;
pub(crate) mod lock_audit;
pub(crate) mod node_mutex;
