// src/validation/mod.rs
pub mod rules;
mod validator;

pub use rules::RuleSpec;
pub use validator::{
    DeploymentValidator, Finding, PassedCheck, Section, Severity, ValidationIssue,
    ValidationReport,
};
