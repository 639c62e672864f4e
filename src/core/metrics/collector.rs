use super::report::SimulationReport;
use crate::core::types::{Process, Timestamp};

/// Running aggregator of the quantities a [`SimulationReport`] is built from
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    wait_times: Vec<i64>,
    turnaround_times: Vec<u64>,
    response_times: Vec<u64>,
    /// Charged run lengths, cache stalls included
    busy_time: u64,
    context_switches: u64,
    cache_hits: u64,
    cache_misses: u64,
}

impl MetricsCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge CPU-occupied time
    pub fn add_cpu_busy(&mut self, amount: u64) {
        self.busy_time = self.busy_time.saturating_add(amount);
    }

    pub fn record_context_switch(&mut self) {
        self.context_switches += 1;
    }

    pub fn record_cache_access(&mut self, hit: bool) {
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
    }

    /// Record the turnaround/wait sample of a terminated process
    ///
    /// Processes without a finish time are ignored.
    pub fn record_completion(&mut self, process: &Process) {
        let (Some(turnaround), Some(wait)) = (process.turnaround(), process.wait_time()) else {
            return;
        };
        self.turnaround_times.push(turnaround);
        self.wait_times.push(wait);
        if let Some(response) = process.response_time() {
            self.response_times.push(response);
        }
    }

    pub fn busy_time(&self) -> u64 {
        self.busy_time
    }

    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    pub fn completed(&self) -> usize {
        self.turnaround_times.len()
    }

    /// Snapshot the accumulated metrics for a run ending at `end_time`
    pub fn build_report(&self, policy_name: &str, end_time: Timestamp) -> SimulationReport {
        let accesses = self.cache_hits + self.cache_misses;

        SimulationReport {
            policy_name: policy_name.to_string(),
            end_time,
            completed_processes: self.completed(),
            average_wait_time: mean(self.wait_times.iter().map(|&w| w as f64)),
            average_turnaround_time: mean(self.turnaround_times.iter().map(|&t| t as f64)),
            average_response_time: mean(self.response_times.iter().map(|&r| r as f64)),
            cpu_utilization: if end_time > 0 {
                self.busy_time as f64 / end_time as f64
            } else {
                0.0
            },
            context_switches: self.context_switches,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            cache_hit_rate: if accesses > 0 {
                self.cache_hits as f64 / accesses as f64
            } else {
                0.0
            },
        }
    }
}

fn mean(samples: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = samples.len();
    if count == 0 {
        return 0.0;
    }
    samples.sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ProcessId, ProcessState};

    fn finished(arrival: Timestamp, burst: u64, start: Timestamp, finish: Timestamp) -> Process {
        let mut p = Process::new(ProcessId::new(0), arrival, burst, 1, 0.0);
        p.state = ProcessState::Terminated;
        p.remaining_time = 0;
        p.first_start_time = Some(start);
        p.finish_time = Some(finish);
        p
    }

    #[test]
    fn test_empty_report_uses_safe_defaults() {
        let report = MetricsCollector::new().build_report("FCFS", 100);
        assert_eq!(report.completed_processes, 0);
        assert_eq!(report.average_wait_time, 0.0);
        assert_eq!(report.average_turnaround_time, 0.0);
        assert_eq!(report.cpu_utilization, 0.0);
        assert_eq!(report.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_zero_horizon_gives_zero_utilization() {
        let mut metrics = MetricsCollector::new();
        metrics.add_cpu_busy(10);
        assert_eq!(metrics.build_report("FCFS", 0).cpu_utilization, 0.0);
    }

    #[test]
    fn test_averages_and_rates() {
        let mut metrics = MetricsCollector::new();
        metrics.record_completion(&finished(0, 5, 0, 5));
        metrics.record_completion(&finished(2, 3, 5, 8));
        metrics.add_cpu_busy(8);
        metrics.record_context_switch();
        metrics.record_cache_access(true);
        metrics.record_cache_access(true);
        metrics.record_cache_access(true);
        metrics.record_cache_access(false);

        let report = metrics.build_report("FCFS", 16);
        assert_eq!(report.completed_processes, 2);
        assert_eq!(report.average_wait_time, 1.5);
        assert_eq!(report.average_turnaround_time, 5.5);
        assert_eq!(report.average_response_time, 1.5);
        assert_eq!(report.cpu_utilization, 0.5);
        assert_eq!(report.context_switches, 1);
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert_eq!(report.cache_hit_rate, 0.75);
    }

    #[test]
    fn test_unfinished_process_is_ignored() {
        let mut metrics = MetricsCollector::new();
        metrics.record_completion(&Process::new(ProcessId::new(0), 0, 4, 1, 0.0));
        assert_eq!(metrics.completed(), 0);
    }
}
