use super::types::{ProcessId, Timestamp};

/// What a scheduled event does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A process enters the system
    Arrival(ProcessId),
    /// Re-evaluate whether the CPU should pick up a ready process
    Dispatch,
    /// Context switch has elapsed; run the next ready process
    StartRun,
    /// A running process used up its slice and goes back to the ready set
    SliceComplete(ProcessId),
    /// A running process finished its burst
    Complete(ProcessId),
}

impl EventKind {
    /// Short name used in logs and traces
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Arrival(_) => "Arrival",
            EventKind::Dispatch => "Dispatch",
            EventKind::StartRun => "StartRun",
            EventKind::SliceComplete(_) => "SliceComplete",
            EventKind::Complete(_) => "Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub kind: EventKind,
}

impl Event {
    pub fn new(timestamp: Timestamp, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    /// The process this event refers to, if any
    pub fn process(&self) -> Option<ProcessId> {
        match self.kind {
            EventKind::Arrival(pid) | EventKind::SliceComplete(pid) | EventKind::Complete(pid) => {
                Some(pid)
            }
            EventKind::Dispatch | EventKind::StartRun => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.process() {
            Some(pid) => write!(f, "t={} {}({})", self.timestamp, self.kind.name(), pid),
            None => write!(f, "t={} {}", self.timestamp, self.kind.name()),
        }
    }
}
