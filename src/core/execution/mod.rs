pub mod config;
pub mod replication;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use replication::{run_replications, ReplicationPlan, ReplicationSummary};
pub use simulation_engine::{RunSlice, SimulationEngine, SimulationObserver};
