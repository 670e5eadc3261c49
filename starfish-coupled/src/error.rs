//! Errors returned by list operations.
//!
//! Absence of a matching element is not an error: lookups return `Option`.
use std::alloc::Layout;
use std::fmt;

/// Error returned by [`CoupledList::try_push_front`] when a node could not
/// be allocated. The rejected value is handed back.
///
/// [`CoupledList::try_push_front`]: crate::data_structures::CoupledList::try_push_front
#[non_exhaustive]
#[derive(PartialEq, Eq)]
pub enum PushError<T> {
    /// The allocator returned null for a node of the given layout.
    AllocationFailed {
        /// The value that was not inserted.
        value: T,
        /// Layout of the node that could not be allocated.
        layout: Layout,
    },
}

impl<T> PushError<T> {
    /// Returns the value that was not inserted.
    pub fn into_inner(self) -> T {
        match self {
            Self::AllocationFailed { value, .. } => value,
        }
    }

    /// Layout of the allocation that failed.
    pub fn layout(&self) -> Layout {
        match self {
            Self::AllocationFailed { layout, .. } => *layout,
        }
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { layout, .. } => f
                .debug_struct("AllocationFailed")
                .field("layout", layout)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { layout, .. } => write!(
                f,
                "failed to allocate {} bytes for a list node",
                layout.size()
            ),
        }
    }
}

impl<T> std::error::Error for PushError<T> {}
