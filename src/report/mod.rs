// src/report/mod.rs
//
// Terminal rendering of a validation report for the pre-launch CLI.
use crate::validation::{Finding, Section, Severity, ValidationReport};
use colored::Colorize;
use std::fmt::Write;
use std::process::ExitCode;

const RULE: &str = "==================================================";

/// Render the grouped listing, summary and verdict.
pub fn render(report: &ValidationReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &ValidationReport) -> std::fmt::Result {
    writeln!(out, "{}", RULE.blue())?;
    writeln!(out, "{}", "Deployment Validator".blue())?;
    writeln!(out, "{}", RULE.blue())?;
    writeln!(out)?;

    for section in Section::ALL {
        let heading = format!("Checking {}:", section.title());
        writeln!(out, "{}", heading.yellow())?;
        for finding in report.findings().iter().filter(|f| f.section() == section) {
            let line = match finding {
                Finding::Passed(check) => format!("  ✓ {}", check.message).green(),
                Finding::Issue(issue) => match issue.severity {
                    Severity::Error => format!("  ✗ {}", issue.message).red(),
                    Severity::Warning => format!("  ⚠ {}", issue.message).yellow(),
                },
            };
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
    }

    let errors: Vec<_> = report.errors().collect();
    let warnings: Vec<_> = report.warnings().collect();

    writeln!(out, "{}", RULE.blue())?;
    writeln!(out, "{}", "Validation Summary:".blue())?;
    writeln!(out, "{}", RULE.blue())?;
    writeln!(out)?;
    writeln!(out, "Success: {} checks passed", report.passed().count())?;
    writeln!(out, "Warnings: {} warnings", warnings.len())?;
    writeln!(out, "Errors: {} errors", errors.len())?;
    writeln!(out)?;

    if report.is_valid() {
        writeln!(out, "{}", "Deployment validation PASSED!".green().bold())?;
        if !warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Warnings (optional):".yellow())?;
            for warning in warnings {
                writeln!(out, "{}", format!("  - {}", warning.message).yellow())?;
            }
        }
    } else {
        writeln!(out, "{}", "Deployment validation FAILED!".red().bold())?;
        writeln!(out, "{}", "Please fix the following errors:".red())?;
        for error in errors {
            writeln!(out, "{}", format!("  - {}", error.message).red())?;
        }
    }

    Ok(())
}

pub fn exit_code(report: &ValidationReport) -> ExitCode {
    if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
