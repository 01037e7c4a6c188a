use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use strata_world::Overworld;

/// Reuses generator instances across worker jobs. Noise fields are owned
/// per instance, so a job always has one to itself; instances are forked
/// from `base` on demand up to the capacity.
pub struct GeneratorPool {
    base: Overworld,
    available_tx: Sender<Overworld>,
    available_rx: Receiver<Overworld>,
    allocated: AtomicUsize,
    max_generators: usize,
}

impl GeneratorPool {
    pub fn new(base: Overworld, max_generators: usize) -> Self {
        let max_generators = max_generators.max(1);
        let (tx, rx) = bounded(max_generators);
        Self { base, available_tx: tx, available_rx: rx, allocated: AtomicUsize::new(0), max_generators }
    }

    pub fn with_capacity_from_workers(base: Overworld, worker_count: usize) -> Self {
        Self::new(base, worker_count.max(1))
    }

    /// The instance forks are made from; never handed to jobs.
    pub fn base(&self) -> &Overworld {
        &self.base
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Overworld {
        if let Ok(generator) = self.available_rx.try_recv() {
            return generator;
        }
        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_generators {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_generators {
                    log::debug!(target: "runtime", "forking generator {} of {}", prev + 1, self.max_generators);
                    return self.base.fork();
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }
            if let Ok(generator) = self.available_rx.recv() {
                return generator;
            }
        }
    }

    fn release(&self, generator: Overworld) {
        let _ = self.available_tx.send(generator);
    }

    /// Runs `f` with a generator checked out for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&Overworld) -> R) -> R {
        let generator = self.acquire();
        let out = f(&generator);
        self.release(generator);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_chunk::ChunkStore;
    use strata_world::GeneratorSettings;

    fn pool(cap: usize) -> GeneratorPool {
        let store = Arc::new(ChunkStore::new());
        GeneratorPool::new(Overworld::new(store, 3, GeneratorSettings::default()), cap)
    }

    #[test]
    fn sequential_use_reuses_one_instance() {
        let pool = pool(4);
        for _ in 0..5 {
            pool.with(|g| assert_eq!(g.seed(), 3));
        }
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn nested_use_forks_up_to_capacity() {
        let pool = pool(2);
        pool.with(|a| {
            pool.with(|b| {
                assert!(a.build_chunk(0, 0) == b.build_chunk(0, 0));
            })
        });
        assert_eq!(pool.allocated(), 2);
    }
}
