//! Data structures for concurrent collections.
//!
//! # Organization
//!
//! - [`coupled_list`] - Lock-coupled singly-linked list (one mutex per node)
//! - [`internal`] - Node layout and the hand-over-hand cursor (pub(crate))

pub mod coupled_list;
pub(crate) mod internal;


pub use coupled_list::CoupledList;
