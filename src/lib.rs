pub mod core;

// Re-export commonly used types
pub use crate::core::errors::SimulationError;
pub use crate::core::event::{Event, EventKind};
pub use crate::core::execution::{SimulationConfig, SimulationEngine};
pub use crate::core::metrics::SimulationReport;
pub use crate::core::scheduling::{FcfsPolicy, RoundRobinPolicy, SchedulingPolicy};
pub use crate::core::types::{Process, ProcessId, ProcessState, Timestamp};
pub use crate::core::workload::{Workload, WorkloadGenerator};
