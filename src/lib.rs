// src/lib.rs
pub mod config;
pub mod health;
pub mod probe;
pub mod report;
pub mod server;
pub mod validation;
