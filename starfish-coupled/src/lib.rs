#![allow(dead_code)]

//! A fine-grained, lock-coupled concurrent singly-linked list.
//!
//! [`CoupledList`] keeps one mutex per node and walks the chain with
//! hand-over-hand locking, so insertions, traversals, lookups and removals on
//! different parts of the list proceed in parallel without a global lock.
//!
//! # Features
//!
//! - `tracing`: forward internal log points to the `tracing` crate
//! - `shuttle`: back node locks with shuttle primitives for schedule
//!   exploration (`cargo test --features shuttle --lib shuttle_tests`)

pub mod common_tests;
pub mod data_structures;
pub mod error;
pub mod preemptive_synchronization;
pub(crate) mod tracing_helpers;

pub use data_structures::CoupledList;
pub use error::PushError;
