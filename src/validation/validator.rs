// src/validation/validator.rs
use super::rules::{RuleSpec, ENV_RULES, PLATFORM_DESCRIPTORS, REQUIRED_ARTIFACTS};
use crate::config::BotConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    RequiredEnv,
    OptionalEnv,
    RequiredFiles,
    Platform,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::RequiredEnv,
        Section::OptionalEnv,
        Section::RequiredFiles,
        Section::Platform,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::RequiredEnv => "Required Environment Variables",
            Section::OptionalEnv => "Optional Environment Variables",
            Section::RequiredFiles => "Required Files",
            Section::Platform => "Platform Configuration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub section: Section,
    pub field: String,
    pub severity: Severity,
    pub message: String,
}

/// A check that passed; kept so reports can list successes too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassedCheck {
    pub section: Section,
    pub field: String,
    pub message: String,
}

/// Result of one rule, file or platform check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Passed(PassedCheck),
    Issue(ValidationIssue),
}

impl Finding {
    pub fn section(&self) -> Section {
        match self {
            Finding::Passed(check) => check.section,
            Finding::Issue(issue) => issue.section,
        }
    }
}

/// Findings in check order: environment rules, artifacts, platform.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    valid: bool,
}

impl ValidationReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        let valid = !findings
            .iter()
            .any(|f| matches!(f, Finding::Issue(i) if i.severity == Severity::Error));
        Self { findings, valid }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.findings.iter().filter_map(|finding| match finding {
            Finding::Issue(issue) => Some(issue),
            Finding::Passed(_) => None,
        })
    }

    pub fn passed(&self) -> impl Iterator<Item = &PassedCheck> {
        self.findings.iter().filter_map(|finding| match finding {
            Finding::Passed(check) => Some(check),
            Finding::Issue(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues().filter(|i| i.severity == Severity::Warning)
    }
}

/// Checks a deployment's configuration and files before launch.
#[derive(Debug, Clone)]
pub struct DeploymentValidator {
    root: PathBuf,
}

impl DeploymentValidator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn validate(&self, config: &BotConfig) -> ValidationReport {
        let mut findings: Vec<Finding> = ENV_RULES
            .iter()
            .map(|rule| check_rule(rule, config))
            .collect();
        findings.extend(
            REQUIRED_ARTIFACTS
                .iter()
                .map(|path| self.check_artifact(path)),
        );
        findings.push(self.check_platform());

        let report = ValidationReport::new(findings);
        debug!(
            "Validated deployment at {}: {} passed, {} issues",
            self.root.display(),
            report.passed().count(),
            report.issues().count()
        );
        report
    }

    fn check_artifact(&self, path: &str) -> Finding {
        if self.root.join(path).exists() {
            Finding::Passed(PassedCheck {
                section: Section::RequiredFiles,
                field: path.to_string(),
                message: format!("{} exists", path),
            })
        } else {
            Finding::Issue(ValidationIssue {
                section: Section::RequiredFiles,
                field: path.to_string(),
                severity: Severity::Error,
                message: format!("{} not found", path),
            })
        }
    }

    fn check_platform(&self) -> Finding {
        let found = PLATFORM_DESCRIPTORS
            .iter()
            .find(|path| self.root.join(path).exists());

        match found {
            Some(path) => Finding::Passed(PassedCheck {
                section: Section::Platform,
                field: path.to_string(),
                message: format!("{} exists", path),
            }),
            None => Finding::Issue(ValidationIssue {
                section: Section::Platform,
                field: "platform".to_string(),
                severity: Severity::Warning,
                message: "No platform configuration file found (optional)".to_string(),
            }),
        }
    }
}

fn check_rule(rule: &RuleSpec, config: &BotConfig) -> Finding {
    let section = if rule.required {
        Section::RequiredEnv
    } else {
        Section::OptionalEnv
    };
    let issue = |severity, message: String| {
        Finding::Issue(ValidationIssue {
            section,
            field: rule.field.to_string(),
            severity,
            message,
        })
    };

    match (rule.value)(config) {
        None if rule.required => issue(Severity::Error, format!("{} is not set", rule.field)),
        None => issue(
            Severity::Warning,
            format!("{} is optional and not set", rule.field),
        ),
        Some(value) if !(rule.predicate)(value) => issue(
            Severity::Error,
            format!("{} has invalid format", rule.field),
        ),
        Some(_) => Finding::Passed(PassedCheck {
            section,
            field: rule.field.to_string(),
            message: format!("{} is configured", rule.field),
        }),
    }
}
