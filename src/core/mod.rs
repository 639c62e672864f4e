pub mod cache_model;
pub mod errors;
pub mod event;
pub mod event_queue;
pub mod execution;
pub mod metrics;
pub mod scheduling;
pub mod types;
pub mod workload;
