//! Configuration for a scheduling simulation run
//!
//! This module provides the run parameters consumed by the engine, plus the
//! concurrency settings used when running several independent replications.

use crate::core::errors::SimulationError;
use crate::core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes for replications
///
/// A single run is always sequential; this only controls how independent
/// runs are spread across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Runs execute one after another on the calling thread
    Sequential,
    /// Runs are distributed over a Rayon thread pool
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Sequential
    }
}

/// Parameters of one simulation run
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed of the engine's cache/memory-access stream
    pub seed: u64,
    /// Seed of the workload stream; `None` reuses `seed`
    pub workload_seed: Option<u64>,
    /// Horizon: no event later than this is executed
    pub end_time: Timestamp,
    pub context_switch_cost: u64,
    pub cache_hit_probability: f64,
    pub cache_miss_penalty: u64,
    pub mean_interarrival_time: u64,
    pub process_count_target: usize,
    /// Round-Robin quantum used when the binary builds that policy
    pub time_quantum: u64,
    /// Label for the report; empty means the policy's own name
    pub policy_name: String,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    pub fn new() -> Self {
        Self {
            seed: 1,
            workload_seed: None,
            end_time: 500,
            context_switch_cost: 1,
            cache_hit_probability: 0.9,
            cache_miss_penalty: 3,
            mean_interarrival_time: 6,
            process_count_target: 50,
            time_quantum: 4,
            policy_name: String::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_workload_seed(mut self, seed: u64) -> Self {
        self.workload_seed = Some(seed);
        self
    }

    pub fn with_end_time(mut self, end_time: Timestamp) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_context_switch_cost(mut self, cost: u64) -> Self {
        self.context_switch_cost = cost;
        self
    }

    /// Set the cache behaviour
    ///
    /// # Arguments
    /// * `hit_probability` - Probability in [0, 1] that an access hits
    /// * `miss_penalty` - Delay charged per miss
    pub fn with_cache(mut self, hit_probability: f64, miss_penalty: u64) -> Self {
        self.cache_hit_probability = hit_probability;
        self.cache_miss_penalty = miss_penalty;
        self
    }

    pub fn with_mean_interarrival_time(mut self, mean: u64) -> Self {
        self.mean_interarrival_time = mean;
        self
    }

    pub fn with_process_count(mut self, count: usize) -> Self {
        self.process_count_target = count;
        self
    }

    pub fn with_time_quantum(mut self, quantum: u64) -> Self {
        self.time_quantum = quantum;
        self
    }

    pub fn with_policy_name(mut self, name: impl Into<String>) -> Self {
        self.policy_name = name.into();
        self
    }

    /// The seed actually used for the workload stream
    pub fn effective_workload_seed(&self) -> u64 {
        self.workload_seed.unwrap_or(self.seed)
    }

    /// Reject values that have no sensible clamp
    ///
    /// Zero quantum, zero horizon and zero mean interarrival time are
    /// accepted; they are clamped or produce zeroed rates downstream.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(0.0..=1.0).contains(&self.cache_hit_probability) {
            return Err(SimulationError::InvalidConfig(format!(
                "cache_hit_probability must be within [0, 1], got {}",
                self.cache_hit_probability
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
