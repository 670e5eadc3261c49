//! Per-thread accounting of held node locks.
//!
//! Every [`NodeGuard`](super::node_mutex::NodeGuard) carries a [`LockAudit`]
//! token. In debug builds the token keeps a thread-local count of node locks
//! the current thread holds, plus the peak since the last [`reset_peak`].
//! Release builds (and shuttle builds, whose threads share one OS thread)
//! compile the token down to nothing and always report zero.

#[cfg(all(debug_assertions, not(feature = "shuttle")))]
mod imp {
    use std::cell::Cell;
    use std::marker::PhantomData;

    thread_local! {
        static HELD: Cell<usize> = const { Cell::new(0) };
        static PEAK: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts one held node lock for as long as it lives.
    ///
    /// Not `Send`: the count must be released on the thread that took it.
    pub(crate) struct LockAudit {
        _not_send: PhantomData<*const ()>,
    }

    impl LockAudit {
        pub(crate) fn acquire() -> Self {
            let held = HELD.with(|held| {
                let now = held.get() + 1;
                held.set(now);
                now
            });
            PEAK.with(|peak| {
                if held > peak.get() {
                    peak.set(held);
                }
            });
            LockAudit {
                _not_send: PhantomData,
            }
        }
    }

    impl Drop for LockAudit {
        fn drop(&mut self) {
            HELD.with(|held| held.set(held.get().saturating_sub(1)));
        }
    }

    pub(crate) fn held() -> usize {
        HELD.with(Cell::get)
    }

    pub(crate) fn peak() -> usize {
        PEAK.with(Cell::get)
    }

    pub(crate) fn reset_peak() {
        let held = held();
        PEAK.with(|peak| peak.set(held));
    }
}

#[cfg(not(all(debug_assertions, not(feature = "shuttle"))))]
mod imp {
    pub(crate) struct LockAudit;

    impl LockAudit {
        #[inline(always)]
        pub(crate) fn acquire() -> Self {
            LockAudit
        }
    }

    pub(crate) fn held() -> usize {
        0
    }

    pub(crate) fn peak() -> usize {
        0
    }

    pub(crate) fn reset_peak() {}
}

pub(crate) use imp::{LockAudit, held, peak, reset_peak};

#[cfg(all(test, debug_assertions, not(feature = "shuttle")))]
mod tests {
    use super::*;

    #[test]
    fn test_counts_nested_tokens() {
        reset_peak();
        assert_eq!(held(), 0);
        {
            let _outer = LockAudit::acquire();
            let _inner = LockAudit::acquire();
            assert_eq!(held(), 2);
        }
        assert_eq!(held(), 0);
        assert_eq!(peak(), 2);

        reset_peak();
        assert_eq!(peak(), 0);
    }
}
