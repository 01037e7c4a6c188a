use std::thread;

use serde::Deserialize;

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

/// Worker pool sizing. `max_inflight` of zero means twice the worker count.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub max_inflight: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { workers: default_workers(), max_inflight: 0 }
    }
}

impl RuntimeConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers, ..Self::default() }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    pub fn inflight_limit(&self) -> usize {
        if self.max_inflight == 0 { self.worker_count() * 2 } else { self.max_inflight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflight_defaults_to_twice_the_workers() {
        let cfg = RuntimeConfig::with_workers(3);
        assert_eq!(cfg.inflight_limit(), 6);
        let cfg = RuntimeConfig { workers: 0, max_inflight: 5 };
        assert_eq!(cfg.worker_count(), 1);
        assert_eq!(cfg.inflight_limit(), 5);
    }
}
