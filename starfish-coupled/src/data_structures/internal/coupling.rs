use crate::preemptive_synchronization::node_mutex::NodeGuard;

use super::node::{Node, NodeState, OwnedNode};

// =============================================================================
// HAND-OVER-HAND TRAVERSAL
// =============================================================================
//
//   locked:   [pred]                      step a: lock succ while pred is held
//             pred ──────► succ ──────► ...
//   locked:   [pred]      [succ]
//
//   locked:               [succ]           step b: release pred (advance)
//
// Locks are only ever taken predecessor-before-successor and a cursor holds
// at most two of them, so two cursors can never wait on each other in a cycle.
//
// NODE LIFETIME:
// A node is freed only by `unlink_next`, which runs with the predecessor
// locked and has itself held the node's lock. Until the predecessor is
// released nobody else can reach the node at all, so a thread that holds a
// node's lock (or its predecessor's) may dereference it.
//
// =============================================================================

/// A cursor that walks the chain with lock coupling.
///
/// `current` is always locked. Dropping the cursor, including while
/// unwinding out of a user callback, releases whatever it holds.
pub(crate) struct Coupling<'a, T> {
    current: NodeGuard<'a, NodeState<T>>,
}

pub(crate) type Link<'a, T> = NodeGuard<'a, NodeState<T>>;

impl<'a, T> Coupling<'a, T> {
    /// Starts a traversal at the head sentinel.
    pub(crate) fn new(head: &'a Node<T>) -> Self {
        Coupling {
            current: head.lock(),
        }
    }

    /// Locks the successor of `current` without releasing `current`.
    ///
    /// Returns `None` once `current` is the tail.
    pub(crate) fn lock_next(&self) -> Option<Link<'a, T>> {
        let next = self.current.next.as_ref()?.as_ptr();

        // SAFETY: `next` is owned by `current`, which is locked, so it is
        // alive here. The returned guard keeps it alive after `current` is
        // released: freeing it requires taking its lock first (see NODE
        // LIFETIME above). Both borrows end before the list itself (`'a`).
        let node: &'a Node<T> = unsafe { next.as_ref() };
        Some(node.lock())
    }

    /// Moves the cursor onto `next`, releasing the previous node.
    ///
    /// `next` must come from [`lock_next`](Self::lock_next) on this cursor.
    pub(crate) fn advance(&mut self, next: Link<'a, T>) {
        // Assignment drops the old guard only after `next` is already held.
        self.current = next;
    }

    /// Unlinks the locked successor and returns ownership of it.
    ///
    /// `current` adopts the successor's `next` and stays locked, so the
    /// caller re-examines the new successor without advancing.
    pub(crate) fn unlink_next(&mut self, mut next: Link<'a, T>) -> Option<OwnedNode<T>> {
        let successor = next.next.take();
        drop(next);
        std::mem::replace(&mut self.current.next, successor)
    }

    pub(crate) fn current(&mut self) -> &mut NodeState<T> {
        &mut self.current
    }
}
