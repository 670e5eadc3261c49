use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A latch that releases its waiters once it has been signalled `count` times.
///
/// Stress tests hand one to every worker and wait on it with a deadline, so a
/// deadlocked worker shows up as a timeout instead of a hung test binary.
pub struct CountdownEvent {
    count: Mutex<usize>,
    condvar: Condvar,
}

impl CountdownEvent {
    // Create a new CountdownEvent with initial count.
    //
    pub fn new(count: usize) -> Self {
        CountdownEvent {
            count: Mutex::new(count),
            condvar: Condvar::new(),
        }
    }

    // Signal the event, decrementing count by one.
    // Returns true for the signal that released the waiters.
    //
    pub fn signal(&self) -> bool {
        let mut count = self.count.lock();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        if *count == 0 {
            self.condvar.notify_all();
            true
        } else {
            false
        }
    }

    /// Number of signals still outstanding.
    pub fn remaining(&self) -> usize {
        *self.count.lock()
    }

    // Wait until count reaches zero.
    //
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.condvar.wait(&mut count);
        }
    }

    /// Waits until the count reaches zero or `timeout` elapses.
    ///
    /// Returns `true` if the event was released in time.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.count.lock();
        while *count > 0 {
            if self.condvar.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}
