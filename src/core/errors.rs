use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A configuration value that cannot be clamped into range
    InvalidConfig(String),
    /// The replication thread pool could not be built
    ThreadPool(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            SimulationError::ThreadPool(msg) => write!(f, "thread pool error: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {}
