use super::{ReadyQueue, SchedulingPolicy};
use crate::core::types::ProcessId;

/// First-Come-First-Served: processes run to completion in arrival order
#[derive(Debug, Default, Clone)]
pub struct FcfsPolicy {
    ready: ReadyQueue,
}

impl FcfsPolicy {
    pub fn new() -> Self {
        Self {
            ready: ReadyQueue::new(),
        }
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn name(&self) -> String {
        "FCFS".to_string()
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
        // Effectively unbounded; a run ends only when the burst does
        u64::MAX
    }
}
