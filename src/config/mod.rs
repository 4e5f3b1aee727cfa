// src/config/mod.rs
mod models;

pub use models::*;

use ::config::{Config, Environment};
use url::Url;

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment file: {}", path.display());
    }
}

/// Load settings from the process environment, after an optional `.env`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_dotenv();
    load_settings_from(Environment::default())
}

/// Load only the bot's variables. Server and health-check values are not
/// read, so a malformed `PORT` or `PROBE_TIMEOUT_SECS` cannot fail it.
pub fn load_bot_config() -> Result<BotConfig, ConfigError> {
    load_dotenv();
    load_bot_config_from(Environment::default())
}

pub fn load_bot_config_from(env: Environment) -> Result<BotConfig, ConfigError> {
    let source = Config::builder().add_source(env).build()?;
    Ok(source.try_deserialize()?)
}

/// Load settings from an explicit environment source.
pub fn load_settings_from(env: Environment) -> Result<Settings, ConfigError> {
    let source = Config::builder()
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("service_name", DEFAULT_SERVICE_NAME)?
        .set_default("probe_timeout_secs", DEFAULT_PROBE_TIMEOUT_SECS as i64)?
        .set_default("bot_api_url", DEFAULT_BOT_API_URL)?
        .add_source(env)
        .build()?;

    let bot: BotConfig = source.clone().try_deserialize()?;
    let server = ServerConfig {
        port: source.get("port")?,
        name: source.get("service_name")?,
    };
    let health = HealthCheckConfig {
        timeout_secs: source.get("probe_timeout_secs")?,
        bot_api_url: Url::parse(&source.get::<String>("bot_api_url")?)?,
    };

    let settings = Settings {
        bot,
        server,
        health,
    };
    settings.validate()?;
    Ok(settings)
}
