//! Independent replications of one configuration over several seeds.
//!
//! Each replication is its own single-threaded run with its own pair of
//! random streams, so running them in parallel cannot change any report.

use crate::core::errors::SimulationError;
use crate::core::execution::config::{ConcurrencyMode, SimulationConfig};
use crate::core::execution::simulation_engine::SimulationEngine;
use crate::core::metrics::SimulationReport;
use crate::core::scheduling::SchedulingPolicy;
use crate::core::workload::WorkloadGenerator;
use log::info;
use rayon::prelude::*;

/// Which seeds to run and how to spread the runs over threads
#[derive(Debug, Clone)]
pub struct ReplicationPlan {
    pub seeds: Vec<u64>,
    pub concurrency_mode: ConcurrencyMode,
    /// Only relevant when `concurrency_mode` is Rayon; `None` uses the global pool
    pub thread_pool_size: Option<usize>,
}

impl ReplicationPlan {
    pub fn new(seeds: Vec<u64>) -> Self {
        Self {
            seeds,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
        }
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}

/// Run one replication per seed; reports come back in seed order
///
/// Each seed replaces both the engine seed and the workload seed of `config`.
pub fn run_replications<F>(
    config: &SimulationConfig,
    plan: &ReplicationPlan,
    make_policy: F,
) -> Result<Vec<SimulationReport>, SimulationError>
where
    F: Fn() -> Box<dyn SchedulingPolicy> + Sync,
{
    config.validate()?;
    info!(
        "Running {} replications ({:?})",
        plan.seeds.len(),
        plan.concurrency_mode
    );

    let run_one = |seed: u64| -> Result<SimulationReport, SimulationError> {
        let mut run_config = config.clone().with_seed(seed);
        run_config.workload_seed = None;
        let workload =
            WorkloadGenerator::new(run_config.effective_workload_seed(), run_config.mean_interarrival_time);
        let mut engine = SimulationEngine::new(run_config, make_policy(), Box::new(workload))?;
        Ok(engine.run())
    };

    match plan.concurrency_mode {
        ConcurrencyMode::Sequential => plan.seeds.iter().map(|&seed| run_one(seed)).collect(),
        ConcurrencyMode::Rayon => match plan.thread_pool_size {
            Some(size) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(size)
                    .build()
                    .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
                pool.install(|| plan.seeds.par_iter().map(|&seed| run_one(seed)).collect())
            }
            None => plan.seeds.par_iter().map(|&seed| run_one(seed)).collect(),
        },
    }
}

/// Mean of the headline metrics across replications
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationSummary {
    pub runs: usize,
    pub average_wait_time: f64,
    pub average_turnaround_time: f64,
    pub cpu_utilization: f64,
    pub context_switches: f64,
    pub cache_hit_rate: f64,
}

impl ReplicationSummary {
    pub fn from_reports(reports: &[SimulationReport]) -> Self {
        let runs = reports.len();
        let mean_of = |f: fn(&SimulationReport) -> f64| {
            if runs == 0 {
                0.0
            } else {
                reports.iter().map(f).sum::<f64>() / runs as f64
            }
        };

        Self {
            runs,
            average_wait_time: mean_of(|r| r.average_wait_time),
            average_turnaround_time: mean_of(|r| r.average_turnaround_time),
            cpu_utilization: mean_of(|r| r.cpu_utilization),
            context_switches: mean_of(|r| r.context_switches as f64),
            cache_hit_rate: mean_of(|r| r.cache_hit_rate),
        }
    }
}

impl std::fmt::Display for ReplicationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} runs: wait {:.2}, turnaround {:.2}, utilization {:.2}%, switches {:.1}, hit rate {:.2}%",
            self.runs,
            self.average_wait_time,
            self.average_turnaround_time,
            self.cpu_utilization * 100.0,
            self.context_switches,
            self.cache_hit_rate * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduling::{FcfsPolicy, RoundRobinPolicy};

    fn small_config() -> SimulationConfig {
        SimulationConfig::new()
            .with_end_time(200)
            .with_process_count(15)
    }

    #[test]
    fn test_rayon_matches_sequential() {
        let config = small_config();
        let seeds: Vec<u64> = (1..=8).collect();
        let make = || Box::new(RoundRobinPolicy::new(3)) as Box<dyn SchedulingPolicy>;

        let sequential = run_replications(&config, &ReplicationPlan::new(seeds.clone()), make).unwrap();
        let parallel = run_replications(
            &config,
            &ReplicationPlan::new(seeds)
                .with_concurrency(ConcurrencyMode::Rayon)
                .with_thread_pool_size(2),
            make,
        )
        .unwrap();

        assert_eq!(sequential.len(), 8);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = small_config().with_cache(2.0, 1);
        let result = run_replications(&config, &ReplicationPlan::new(vec![1]), || {
            Box::new(FcfsPolicy::new()) as Box<dyn SchedulingPolicy>
        });
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = ReplicationSummary::from_reports(&[]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.cpu_utilization, 0.0);
    }

    #[test]
    fn test_summary_averages_reports() {
        let config = small_config();
        let reports = run_replications(&config, &ReplicationPlan::new(vec![3, 4]), || {
            Box::new(FcfsPolicy::new()) as Box<dyn SchedulingPolicy>
        })
        .unwrap();
        let summary = ReplicationSummary::from_reports(&reports);
        let expected = (reports[0].average_wait_time + reports[1].average_wait_time) / 2.0;
        assert_eq!(summary.runs, 2);
        assert!((summary.average_wait_time - expected).abs() < 1e-12);
    }
}
