// src/bin/validate_deployment.rs
//
// Pre-launch check: exits 0 when the deployment may start, 1 otherwise.
use std::path::PathBuf;
use std::process::ExitCode;

use bot_health::{config, report, validation::DeploymentValidator};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let bot = config::load_bot_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        config::BotConfig::default()
    });

    let root = std::env::var_os("DEPLOY_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let report = DeploymentValidator::new(root).validate(&bot);
    print!("{}", report::render(&report));
    report::exit_code(&report)
}
