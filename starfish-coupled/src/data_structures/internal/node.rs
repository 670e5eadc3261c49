use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::preemptive_synchronization::node_mutex::{NodeGuard, NodeMutex};

// Chain layout:
//
//  ┌────────┐    ┌────────┐    ┌────────┐
//  │  HEAD  │───►│   v3   │───►│   v2   │───► None
//  │ (None) │    │        │    │        │
//  └────────┘    └────────┘    └────────┘
//    embedded     OwnedNode     OwnedNode
//
// Each `next` link is the only owner of the node it points to. The head
// sentinel lives inside the list itself and never carries an element.

/// Fields of a node that its mutex guards.
pub(crate) struct NodeState<T> {
    /// `None` only for the head sentinel.
    pub(crate) element: Option<T>,
    pub(crate) next: Option<OwnedNode<T>>,
}

pub(crate) struct Node<T> {
    state: NodeMutex<NodeState<T>>,
}

impl<T> Node<T> {
    pub(crate) fn new_sentinel() -> Self {
        Node {
            state: NodeMutex::new(NodeState {
                element: None,
                next: None,
            }),
        }
    }

    fn with_element(element: T) -> Self {
        Node {
            state: NodeMutex::new(NodeState {
                element: Some(element),
                next: None,
            }),
        }
    }

    pub(crate) fn lock(&self) -> NodeGuard<'_, NodeState<T>> {
        self.state.lock()
    }

    pub(crate) fn state_mut(&mut self) -> &mut NodeState<T> {
        self.state.get_mut()
    }
}

/// Uniquely owning pointer to a heap allocated [`Node`].
///
/// Behaves like `Box<Node<T>>`, but the allocation is fallible and the
/// pointer carries no uniqueness assumption, so other threads may keep
/// `&Node<T>` derived from it while they hold the node's lock.
pub(crate) struct OwnedNode<T> {
    ptr: NonNull<Node<T>>,
    _owns: PhantomData<Node<T>>,
}

// SAFETY: `OwnedNode<T>` owns its node exactly like `Box<Node<T>>` does.
unsafe impl<T: Send> Send for OwnedNode<T> {}

impl<T> OwnedNode<T> {
    fn layout() -> Layout {
        Layout::new::<Node<T>>()
    }

    /// Allocates a detached node holding `element`.
    ///
    /// On allocation failure the element is returned together with the
    /// layout that could not be satisfied.
    pub(crate) fn try_new(element: T) -> Result<Self, (T, Layout)> {
        let layout = Self::layout();
        debug_assert_ne!(layout.size(), 0, "nodes embed a mutex");

        // SAFETY: `Node<T>` embeds a mutex, so `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let Some(ptr) = NonNull::new(raw) else {
            return Err((element, layout));
        };

        // SAFETY: `ptr` was just allocated with the layout of `Node<T>`.
        unsafe { ptr.as_ptr().write(Node::with_element(element)) };

        Ok(OwnedNode {
            ptr,
            _owns: PhantomData,
        })
    }

    pub(crate) fn as_ptr(&self) -> NonNull<Node<T>> {
        self.ptr
    }

    /// Unlocked access for the sole owner of a node that no other thread can reach.
    pub(crate) fn state_mut(&mut self) -> &mut NodeState<T> {
        // SAFETY: `&mut self` is the unique owner of the allocation.
        unsafe { self.ptr.as_mut() }.state_mut()
    }
}

impl<T> Drop for OwnedNode<T> {
    fn drop(&mut self) {
        // Detach the tail first and free it one node at a time. Letting
        // `drop_in_place` reach `next` would recurse once per node.
        let mut successor = self.state_mut().next.take();
        while let Some(mut node) = successor {
            successor = node.state_mut().next.take();
        }

        // SAFETY: the node was allocated in `try_new` with this layout, is
        // initialized, and `self` is its only owner.
        unsafe {
            ptr::drop_in_place(self.ptr.as_ptr());
            alloc::dealloc(self.ptr.as_ptr().cast(), Self::layout());
        }
    }
}
