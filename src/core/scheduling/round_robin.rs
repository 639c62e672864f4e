use super::{ReadyQueue, SchedulingPolicy};
use crate::core::types::ProcessId;

/// Round-Robin: FIFO ready queue with a fixed time quantum
#[derive(Debug, Clone)]
pub struct RoundRobinPolicy {
    ready: ReadyQueue,
    quantum: u64,
}

impl RoundRobinPolicy {
    /// Create a Round-Robin policy; a zero quantum is raised to 1
    pub fn new(quantum: u64) -> Self {
        Self {
            ready: ReadyQueue::new(),
            quantum: quantum.max(1),
        }
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn name(&self) -> String {
        format!("Round Robin (q={})", self.quantum)
    }

    fn enqueue(&mut self, process: ProcessId) {
        self.ready.push(process);
    }

    fn dequeue(&mut self) -> Option<ProcessId> {
        self.ready.pop()
    }

    fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }

    fn time_slice(&self) -> u64 {
        self.quantum
    }
}
