//! Internal implementation details of the coupled list.
//!
//! - [`node`] - node layout and the owning link between nodes
//! - [`coupling`] - the hand-over-hand cursor shared by every traversal

pub(crate) mod coupling;
pub(crate) mod node;

pub(crate) use coupling::Coupling;
pub(crate) use node::{Node, OwnedNode};
