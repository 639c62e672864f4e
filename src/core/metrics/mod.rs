pub mod collector;
pub mod report;

// Re-export commonly used types
pub use collector::MetricsCollector;
pub use report::SimulationReport;
