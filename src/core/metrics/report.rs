use crate::core::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable snapshot of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub policy_name: String,
    pub end_time: Timestamp,
    pub completed_processes: usize,
    pub average_wait_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    /// Busy time over horizon, in [0, 1]
    pub cpu_utilization: f64,
    pub context_switches: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
}

impl SimulationReport {
    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scheduler: {}", self.policy_name)?;
        writeln!(f, "Simulated Time: 0..{}", self.end_time)?;
        writeln!(f, "Completed Processes: {}", self.completed_processes)?;
        writeln!(f)?;
        writeln!(f, "Avg Wait Time: {:.2}", self.average_wait_time)?;
        writeln!(f, "Avg Turnaround Time: {:.2}", self.average_turnaround_time)?;
        writeln!(f, "Avg Response Time: {:.2}", self.average_response_time)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.cpu_utilization * 100.0)?;
        writeln!(f, "Context Switches: {}", self.context_switches)?;
        writeln!(f, "Cache Hit Rate: {:.2}%", self.cache_hit_rate * 100.0)?;
        write!(f, "Cache Misses: {}", self.cache_misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationReport {
        SimulationReport {
            policy_name: "FCFS".to_string(),
            end_time: 16,
            completed_processes: 2,
            average_wait_time: 1.5,
            average_turnaround_time: 5.5,
            average_response_time: 1.5,
            cpu_utilization: 0.5,
            context_switches: 1,
            cache_hits: 3,
            cache_misses: 1,
            cache_hit_rate: 0.75,
        }
    }

    #[test]
    fn test_display_lists_headline_metrics() {
        let text = sample().to_string();
        assert!(text.contains("Scheduler: FCFS"));
        assert!(text.contains("Avg Wait Time: 1.50"));
        assert!(text.contains("CPU Utilization: 50.00%"));
        assert!(text.contains("Cache Hit Rate: 75.00%"));
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy_name"], "FCFS");
        assert_eq!(value["completed_processes"], 2);
        assert_eq!(value["cache_hit_rate"], 0.75);
    }
}
