use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Counting semaphore bounding how many generation tasks are in flight.
pub struct Semaphore {
    permits: Mutex<usize>,
    freed: Condvar,
    capacity: usize,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        let capacity = permits.max(1);
        Self { permits: Mutex::new(capacity), freed: Condvar::new(), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        *self.permits.lock()
    }

    fn take(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.freed.wait(&mut permits);
        }
        *permits -= 1;
    }

    fn give(&self) {
        *self.permits.lock() += 1;
        self.freed.notify_one();
    }

    /// Blocks until a permit is free. The permit is returned on drop.
    pub fn acquire(&self) -> Permit<'_> {
        self.take();
        Permit { sem: self }
    }

    /// Like [`acquire`](Self::acquire), but the permit can travel to another thread.
    pub fn acquire_owned(self: &Arc<Self>) -> OwnedPermit {
        self.take();
        OwnedPermit { sem: Arc::clone(self) }
    }

    pub fn try_acquire(&self) -> Option<Permit<'_>> {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return None;
        }
        *permits -= 1;
        Some(Permit { sem: self })
    }
}

pub struct Permit<'a> {
    sem: &'a Semaphore,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.sem.give();
    }
}

pub struct OwnedPermit {
    sem: Arc<Semaphore>,
}

impl Drop for OwnedPermit {
    fn drop(&mut self) {
        self.sem.give();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn permits_are_returned_on_drop() {
        let sem = Semaphore::new(2);
        let a = sem.acquire();
        let b = sem.try_acquire();
        assert!(b.is_some());
        assert!(sem.try_acquire().is_none());
        drop(a);
        assert_eq!(sem.available(), 1);
        drop(b);
        assert_eq!(sem.available(), 2);
    }

    #[test]
    fn zero_permits_still_admit_one() {
        let sem = Semaphore::new(0);
        assert_eq!(sem.capacity(), 1);
        let _p = sem.acquire();
        assert!(sem.try_acquire().is_none());
    }

    #[test]
    fn owned_permits_cross_threads() {
        let sem = Arc::new(Semaphore::new(1));
        let permit = sem.acquire_owned();
        let handle = thread::spawn(move || drop(permit));
        // blocks until the other thread lets go
        let _again = sem.acquire();
        handle.join().expect("permit thread");
        assert_eq!(sem.available(), 0);
    }
}
