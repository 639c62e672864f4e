//! Workload collaborator: where arrivals and process attributes come from.

use super::types::{Process, ProcessId, Timestamp};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Uniform;

/// Source of arrivals consumed by the engine
///
/// Implementations own their own random stream, separate from the engine's.
pub trait Workload: Send {
    /// Gap between the previous arrival and the next one
    fn next_interarrival_gap(&mut self) -> Timestamp;

    /// Build the process arriving at `arrival_time`
    fn create_process(&mut self, id: ProcessId, arrival_time: Timestamp) -> Process;
}

/// Seeded uniform workload
///
/// Per arrival it draws the gap first, then burst, priority and
/// memory-access rate, always in that order.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
    gap: Uniform<u64>,
    burst: Uniform<u64>,
    priority: Uniform<u8>,
}

impl WorkloadGenerator {
    /// Largest memory-access rate a generated process can get
    pub const MAX_MEMORY_ACCESS_RATE: f64 = 0.4;

    pub fn new(seed: u64, mean_interarrival_time: u64) -> Self {
        let mean = mean_interarrival_time.max(1);
        Self {
            rng: StdRng::seed_from_u64(seed),
            gap: Uniform::new_inclusive(1, 2 * mean),
            burst: Uniform::new_inclusive(2, 19),
            priority: Uniform::new_inclusive(1, 10),
        }
    }
}

impl Workload for WorkloadGenerator {
    fn next_interarrival_gap(&mut self) -> Timestamp {
        self.rng.sample(&self.gap)
    }

    fn create_process(&mut self, id: ProcessId, arrival_time: Timestamp) -> Process {
        let burst = self.rng.sample(&self.burst);
        let priority = self.rng.sample(&self.priority);
        let memory_access_rate = self.rng.gen::<f64>() * Self::MAX_MEMORY_ACCESS_RATE;

        Process::new(id, arrival_time, burst, priority, memory_access_rate)
    }
}
