//! Ready-queue admission and selection strategies.
//!
//! A policy owns only the ordering of ready processes; it never sees
//! simulated time or process bodies, only [`ProcessId`] handles into the
//! engine's process table.

pub mod fcfs;
pub mod round_robin;

pub use fcfs::FcfsPolicy;
pub use round_robin::RoundRobinPolicy;

use crate::core::types::ProcessId;
use std::collections::VecDeque;

/// Capability interface for a scheduling discipline
pub trait SchedulingPolicy: Send {
    /// Human readable name, used in reports
    fn name(&self) -> String;

    /// Admit a ready process
    fn enqueue(&mut self, process: ProcessId);

    /// Remove and return the next process to run
    fn dequeue(&mut self) -> Option<ProcessId>;

    /// Whether any process is waiting to run
    fn has_ready(&self) -> bool;

    /// Maximum contiguous run length before forced preemption
    fn time_slice(&self) -> u64;
}

/// FIFO ready set shared by the FIFO-ordered policies
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, process: ProcessId) {
        self.queue.push_back(process);
    }

    pub fn pop(&mut self) -> Option<ProcessId> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
