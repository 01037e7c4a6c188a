//! Worker pool running the generate/populate pipeline over chunk regions.
#![forbid(unsafe_code)]

mod config;
mod generator_pool;
mod semaphore;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use strata_structures::StructureKind;
use strata_world::{GenError, Generator, Overworld};

pub use config::RuntimeConfig;
pub use generator_pool::GeneratorPool;
pub use semaphore::{OwnedPermit, Permit, Semaphore};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
    #[error("worker pool shut down before job ({cx}, {cz}) finished")]
    WorkersGone { cx: i32, cz: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Generate,
    Populate,
}

struct Job {
    kind: JobKind,
    cx: i32,
    cz: i32,
    permit: OwnedPermit,
}

#[derive(Debug)]
pub struct JobOut {
    pub kind: JobKind,
    pub cx: i32,
    pub cz: i32,
    pub result: Result<(), GenError>,
    pub elapsed: Duration,
}

/// What one `generate_region` call did.
#[derive(Clone, Debug)]
pub struct RegionReport {
    pub generated: usize,
    pub populated: usize,
    pub deferred: usize,
    pub chunks: usize,
    pub histogram: [u64; 256],
    pub structures: Vec<(StructureKind, usize)>,
    pub generate_time: Duration,
    pub populate_time: Duration,
}

impl RegionReport {
    /// Most common block ids, largest first.
    pub fn top_blocks(&self, n: usize) -> Vec<(u8, u64)> {
        let mut out: Vec<(u8, u64)> =
            self.histogram.iter().enumerate().filter(|(_, c)| **c > 0).map(|(id, c)| (id as u8, *c)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out.truncate(n);
        out
    }
}

pub struct Runtime {
    config: RuntimeConfig,
    generators: Arc<GeneratorPool>,
    inflight: Arc<Semaphore>,
    job_tx: Sender<Job>,
    done_rx: Receiver<JobOut>,
    queued: Arc<AtomicUsize>,
    _pool: ThreadPool,
}

impl Runtime {
    pub fn new(overworld: Overworld, config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let workers = config.worker_count();
        let pool = ThreadPoolBuilder::new().num_threads(workers).thread_name(|i| format!("strata-worker-{i}")).build()?;
        let generators = Arc::new(GeneratorPool::with_capacity_from_workers(overworld, workers));
        let inflight = Arc::new(Semaphore::new(config.inflight_limit()));
        let (job_tx, job_rx) = unbounded::<Job>();
        let (done_tx, done_rx) = unbounded::<JobOut>();
        let queued = Arc::new(AtomicUsize::new(0));
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = done_tx.clone();
            let generators = Arc::clone(&generators);
            let queued = Arc::clone(&queued);
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    let out = run_job(&generators, job);
                    if tx.send(out).is_err() {
                        break;
                    }
                }
            });
        }
        log::info!(target: "runtime", "started {} workers, {} jobs in flight at most", workers, inflight.capacity());
        Ok(Self { config, generators, inflight, job_tx, done_rx, queued, _pool: pool })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn overworld(&self) -> &Overworld {
        self.generators.base()
    }

    pub fn queue_len(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    fn submit(&self, kind: JobKind, cx: i32, cz: i32) -> Result<(), RuntimeError> {
        let permit = self.inflight.acquire_owned();
        self.queued.fetch_add(1, Ordering::Relaxed);
        self.job_tx.send(Job { kind, cx, cz, permit }).map_err(|_| RuntimeError::WorkersGone { cx, cz })
    }

    fn wait(&self, cx: i32, cz: i32) -> Result<JobOut, RuntimeError> {
        self.done_rx.recv().map_err(|_| RuntimeError::WorkersGone { cx, cz })
    }

    /// Generates every chunk in the inclusive rectangle, then populates each
    /// chunk whose 2x2 window lies inside it.
    ///
    /// Chunks already in the store are not regenerated. Generation fans out
    /// across the workers; population starts only after every generate job
    /// has finished and runs one chunk at a time in ascending `(cx, cz)`
    /// order, so the result matches a single-threaded run.
    pub fn generate_region(&self, cx0: i32, cz0: i32, cx1: i32, cz1: i32) -> Result<RegionReport, RuntimeError> {
        let (x0, x1) = (cx0.min(cx1), cx0.max(cx1));
        let (z0, z1) = (cz0.min(cz1), cz0.max(cz1));
        let manager = Arc::clone(self.overworld().manager());

        let t0 = Instant::now();
        let mut submitted = 0usize;
        for cx in x0..=x1 {
            for cz in z0..=z1 {
                if manager.has_chunk(cx, cz) {
                    continue;
                }
                self.submit(JobKind::Generate, cx, cz)?;
                submitted += 1;
            }
        }
        // barrier: population reads neighbours, so every generate job must land first
        let mut slowest = Duration::ZERO;
        for _ in 0..submitted {
            let out = self.wait(x0, z0)?;
            slowest = slowest.max(out.elapsed);
        }
        let generate_time = t0.elapsed();
        log::debug!(target: "runtime", "generated {} chunks in {:?} (slowest {:?})", submitted, generate_time, slowest);

        let t1 = Instant::now();
        let (mut populated, mut deferred) = (0usize, 0usize);
        for cx in x0..x1 {
            for cz in z0..z1 {
                self.submit(JobKind::Populate, cx, cz)?;
                let out = self.wait(cx, cz)?;
                match out.result {
                    Ok(()) => populated += 1,
                    Err(e) => {
                        log::debug!(target: "runtime", "population of ({}, {}) deferred: {}", cx, cz, e);
                        deferred += 1;
                    }
                }
            }
        }
        let populate_time = t1.elapsed();

        let mut histogram = [0u64; 256];
        let mut chunks = 0usize;
        for cx in x0..=x1 {
            for cz in z0..=z1 {
                if let Some(chunk) = manager.get_chunk(cx, cz, false) {
                    chunks += 1;
                    for (acc, n) in histogram.iter_mut().zip(chunk.lock().histogram()) {
                        *acc += u64::from(n);
                    }
                }
            }
        }
        let report = RegionReport {
            generated: submitted,
            populated,
            deferred,
            chunks,
            histogram,
            structures: self.overworld().structures().counts(),
            generate_time,
            populate_time,
        };
        log::info!(
            target: "runtime",
            "region ({}, {})..=({}, {}): {} generated, {} populated, {} deferred in {:?}",
            x0, z0, x1, z1, report.generated, report.populated, report.deferred, generate_time + populate_time
        );
        Ok(report)
    }
}

fn run_job(generators: &GeneratorPool, job: Job) -> JobOut {
    let Job { kind, cx, cz, permit } = job;
    let start = Instant::now();
    let result = generators.with(|g| match kind {
        JobKind::Generate => {
            g.generate_chunk(cx, cz);
            Ok(())
        }
        JobKind::Populate => g.populate_chunk(cx, cz),
    });
    drop(permit);
    JobOut { kind, cx, cz, result, elapsed: start.elapsed() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::ids;
    use strata_chunk::{ChunkManager, ChunkStore};
    use strata_world::GeneratorSettings;

    fn runtime(seed: i64, workers: usize) -> (Arc<ChunkStore>, Runtime) {
        let store = Arc::new(ChunkStore::new());
        let overworld = Overworld::new(store.clone(), seed, GeneratorSettings::default());
        let rt = Runtime::new(overworld, RuntimeConfig::with_workers(workers)).expect("pool");
        (store, rt)
    }

    #[test]
    fn region_counts_add_up() {
        let (store, rt) = runtime(9, 2);
        let report = rt.generate_region(1, 1, -1, -1).expect("region");
        assert_eq!(report.generated, 9);
        assert_eq!(report.chunks, 9);
        assert_eq!(report.populated, 4);
        assert_eq!(report.deferred, 0);
        assert_eq!(store.len(), 9);
        assert!(report.top_blocks(3).iter().any(|(id, _)| *id == ids::STONE));
        assert_eq!(rt.queue_len(), 0);
    }

    #[test]
    fn existing_chunks_are_kept() {
        let (store, rt) = runtime(9, 2);
        rt.generate_region(0, 0, 1, 1).expect("first");
        let before = store.get_chunk(0, 0, false).map(|c| c.lock().clone()).expect("generated");
        let again = rt.generate_region(0, 0, 2, 1).expect("second");
        assert_eq!(again.generated, 2);
        let after = store.get_chunk(0, 0, false).map(|c| c.lock().clone()).expect("generated");
        assert!(before == after);
    }
}
