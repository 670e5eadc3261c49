use std::alloc;
use std::fmt;
use std::ops::ControlFlow;

use crate::data_structures::internal::{Coupling, Node, OwnedNode};
use crate::error::PushError;
use crate::tracing_helpers::{debug_log, trace_log, warn_log};

/// Concurrent singly-linked list with one mutex per node.
///
/// Every operation walks the chain with hand-over-hand locking: the lock of
/// the next node is taken before the lock of the current node is released,
/// and locks are only ever taken from head towards tail. There is no global
/// lock; the head sentinel's lock is the single contention point for
/// insertion.
///
/// Traversals are weakly consistent. They see a live structure, not a
/// snapshot. Values handed back to callers are clones, never references into
/// a node, because the node may be unlinked as soon as its lock is released.
///
/// Callbacks passed to [`for_each`](Self::for_each),
/// [`find_first_if`](Self::find_first_if) and [`remove_if`](Self::remove_if)
/// run while node locks are held and must not call back into the same list.
/// If a callback panics, the locks it held are released during unwinding and
/// the list stays valid; the operation is simply cut short.
///
/// ```
/// use starfish_coupled::data_structures::CoupledList;
///
/// let list = CoupledList::new();
/// list.push_front(1);
/// list.push_front(2);
/// list.push_front(3);
///
/// assert_eq!(list.to_vec(), vec![3, 2, 1]);
/// assert_eq!(list.find_first_if(|v| v % 2 == 0), Some(2));
///
/// list.remove_if(|v| *v == 2);
/// assert_eq!(list.to_vec(), vec![3, 1]);
/// ```
pub struct CoupledList<T> {
    head: Node<T>,
}

impl<T> CoupledList<T> {
    /// Creates an empty list: a head sentinel without element or successor.
    pub fn new() -> Self {
        CoupledList {
            head: Node::new_sentinel(),
        }
    }

    /// Inserts `value` directly after the head sentinel.
    ///
    /// Concurrent calls serialize on the head lock. Allocation failure is
    /// fatal, as for any other collection; use
    /// [`try_push_front`](Self::try_push_front) to observe it instead.
    pub fn push_front(&self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            alloc::handle_alloc_error(err.layout());
        }
    }

    /// Inserts `value` directly after the head sentinel, reporting
    /// allocation failure instead of aborting.
    ///
    /// The node is allocated before the head lock is taken, so a failed
    /// insertion leaves the list untouched.
    pub fn try_push_front(&self, value: T) -> Result<(), PushError<T>> {
        let mut node = OwnedNode::try_new(value).map_err(|(value, layout)| {
            warn_log!(size = layout.size(), "list node allocation failed");
            PushError::AllocationFailed { value, layout }
        })?;

        let mut head = self.head.lock();
        node.state_mut().next = head.next.take();
        head.next = Some(node);
        drop(head);

        trace_log!("pushed node at front");
        Ok(())
    }

    /// Calls `visit` on every element, front to back, under that element's lock.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.traverse(|element| {
            visit(element);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Like [`for_each`](Self::for_each), with mutable access to each element.
    pub fn for_each_mut<F>(&self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        self.traverse(|element| {
            visit(element);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Returns a clone of the first element matching `predicate`.
    ///
    /// The clone is taken while the node is locked and stays valid whatever
    /// happens to the node afterwards. Store `Arc<_>` elements to hand out
    /// shared handles instead of deep copies.
    pub fn find_first_if<P>(&self, mut predicate: P) -> Option<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.find_map(|element| predicate(element).then(|| element.clone()))
    }

    /// Applies `f` to elements front to back and returns the first `Some`.
    pub fn find_map<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(&T) -> Option<R>,
    {
        self.traverse(|element| match f(element) {
            Some(found) => ControlFlow::Break(found),
            None => ControlFlow::Continue(()),
        })
    }

    /// Returns true if an element equal to `value` is reachable.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find_map(|element| (element == value).then_some(()))
            .is_some()
    }

    /// Unlinks and drops every element matching `predicate`.
    ///
    /// The predecessor stays locked while the predicate looks at its
    /// successor, because unlinking rewrites the predecessor's link. After an
    /// unlink the cursor stays put and examines the new successor, so runs of
    /// matching elements are removed in one pass. Returns the number of
    /// elements removed.
    pub fn remove_if<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = Coupling::new(&self.head);

        while let Some(next) = cursor.lock_next() {
            let matched = next
                .element
                .as_ref()
                .is_some_and(|element| predicate(element));

            if matched {
                drop(cursor.unlink_next(next));
                removed += 1;
            } else {
                cursor.advance(next);
            }
        }

        debug_log!(removed, "remove_if finished");
        removed
    }

    /// Removes every element. Safe to call while other threads use the list.
    pub fn clear(&self) -> usize {
        self.remove_if(|_| true)
    }

    /// Returns true if the head sentinel has no successor.
    pub fn is_empty(&self) -> bool {
        self.head.lock().next.is_none()
    }

    /// Counts the elements with a full traversal.
    ///
    /// Concurrent updates may or may not be counted.
    pub fn len(&self) -> usize {
        let mut len = 0;
        self.for_each(|_| len += 1);
        len
    }

    /// Clones the elements, front to back, into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut elements = Vec::new();
        self.for_each(|element| elements.push(element.clone()));
        elements
    }

    // Read-only traversal shared by for_each, find_map and friends.
    // Each step runs with only the visited node locked.
    fn traverse<R, F>(&self, mut step: F) -> Option<R>
    where
        F: FnMut(&mut T) -> ControlFlow<R>,
    {
        let mut cursor = Coupling::new(&self.head);

        while let Some(next) = cursor.lock_next() {
            cursor.advance(next);

            // Only the head has no element, and the cursor never lands on it again.
            if let Some(element) = cursor.current().element.as_mut() {
                if let ControlFlow::Break(found) = step(element) {
                    return Some(found);
                }
            }
        }

        None
    }
}

impl<T> Default for CoupledList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CoupledList<T> {
    // `&mut self` rules out concurrent users, so teardown skips the locks and
    // unlinks iteratively from the head. Each node is freed with its `next`
    // already detached, so no drop ever recurses down the chain.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables, unused_assignments))]
    fn drop(&mut self) {
        let mut link = self.head.state_mut().next.take();
        let mut freed = 0usize;

        while let Some(mut node) = link {
            link = node.state_mut().next.take();
            freed += 1;
        }

        debug_log!(freed, "coupled list torn down");
    }
}

impl<T: fmt::Debug> fmt::Debug for CoupledList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.for_each(|element| {
            list.entry(element);
        });
        list.finish()
    }
}

/// Pushes each element to the front, so the list holds them in reverse order.
impl<T> Extend<T> for CoupledList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_front(element);
        }
    }
}

/// Builds a list whose front is the last element yielded.
impl<T> FromIterator<T> for CoupledList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = CoupledList::new();
        list.extend(iter);
        list
    }
}
