/// Simulated time, in abstract CPU time units
pub type Timestamp = u64;

/// Process identifier; doubles as the index into the engine's process table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub(crate) usize);

impl ProcessId {
    /// Create a new process ID
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Lifecycle state of a simulated process
///
/// Transitions only along `New -> Ready -> Running -> {Ready | Terminated}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Terminated,
}

/// A simulated process
#[derive(Debug, Clone)]
pub struct Process {
    pub(crate) id: ProcessId,
    pub(crate) arrival_time: Timestamp,
    pub(crate) total_burst: u64,
    pub(crate) remaining_time: u64,
    pub(crate) priority: u8,
    /// Probability that a memory access check happens in one time unit
    pub(crate) memory_access_rate: f64,
    pub(crate) state: ProcessState,
    pub(crate) first_start_time: Option<Timestamp>,
    pub(crate) finish_time: Option<Timestamp>,
    /// Scratch for preemptive policies
    pub(crate) quantum_remaining: u64,
}

impl Process {
    /// Create a new process in the `New` state
    pub fn new(
        id: ProcessId,
        arrival_time: Timestamp,
        total_burst: u64,
        priority: u8,
        memory_access_rate: f64,
    ) -> Self {
        Self {
            id,
            arrival_time,
            total_burst,
            remaining_time: total_burst,
            priority,
            memory_access_rate: memory_access_rate.clamp(0.0, 1.0),
            state: ProcessState::New,
            first_start_time: None,
            finish_time: None,
            quantum_remaining: 0,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn total_burst(&self) -> u64 {
        self.total_burst
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn memory_access_rate(&self) -> f64 {
        self.memory_access_rate
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn first_start_time(&self) -> Option<Timestamp> {
        self.first_start_time
    }

    pub fn finish_time(&self) -> Option<Timestamp> {
        self.finish_time
    }

    pub fn quantum_remaining(&self) -> u64 {
        self.quantum_remaining
    }

    /// Finish time minus arrival time, once terminated
    pub fn turnaround(&self) -> Option<u64> {
        self.finish_time
            .map(|finish| finish.saturating_sub(self.arrival_time))
    }

    /// Turnaround minus total burst, once terminated
    ///
    /// Signed: nothing in the model forbids a negative sample, even though
    /// none arises from a single CPU.
    pub fn wait_time(&self) -> Option<i64> {
        self.turnaround()
            .map(|turnaround| turnaround as i64 - self.total_burst as i64)
    }

    /// First start time minus arrival time, once the process has run
    pub fn response_time(&self) -> Option<u64> {
        self.first_start_time
            .map(|start| start.saturating_sub(self.arrival_time))
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_defaults() {
        let p = Process::new(ProcessId::new(3), 10, 7, 5, 0.25);
        assert_eq!(p.state(), ProcessState::New);
        assert_eq!(p.remaining_time(), 7);
        assert_eq!(p.first_start_time(), None);
        assert_eq!(p.turnaround(), None);
        assert_eq!(p.wait_time(), None);
        assert_eq!(p.id().to_string(), "P3");
    }

    #[test]
    fn test_memory_access_rate_is_clamped() {
        assert_eq!(Process::new(ProcessId::new(0), 0, 1, 1, 1.7).memory_access_rate(), 1.0);
        assert_eq!(Process::new(ProcessId::new(0), 0, 1, 1, -0.2).memory_access_rate(), 0.0);
    }

    #[test]
    fn test_derived_times() {
        let mut p = Process::new(ProcessId::new(1), 2, 3, 1, 0.0);
        p.first_start_time = Some(5);
        p.finish_time = Some(8);
        assert_eq!(p.turnaround(), Some(6));
        assert_eq!(p.wait_time(), Some(3));
        assert_eq!(p.response_time(), Some(3));
    }
}
