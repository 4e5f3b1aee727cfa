// src/health/mod.rs
mod checker;
mod status;

pub use checker::HealthAggregator;
pub use status::{format_uptime, CheckName, HealthRecord, HealthStatus};
