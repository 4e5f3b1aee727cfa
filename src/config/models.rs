// src/config/models.rs
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SERVICE_NAME: &str = "Media Bot";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";

/// Bot credentials and deployment values, read from the environment.
///
/// Every field is optional at load time; the validator decides which
/// absences are fatal. Empty strings are treated as absent everywhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    pub api_id: Option<String>,
    pub api_hash: Option<String>,
    pub bot_token: Option<String>,
    pub mongo_db_uri: Option<String>,
    pub owner_id: Option<String>,
    pub string_session: Option<String>,
    pub string_session2: Option<String>,
    pub string_session3: Option<String>,
    pub logger_id: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub support_channel: Option<String>,
    pub support_chat: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BotConfig {
    pub fn api_id(&self) -> Option<&str> {
        present(&self.api_id)
    }

    pub fn api_hash(&self) -> Option<&str> {
        present(&self.api_hash)
    }

    pub fn bot_token(&self) -> Option<&str> {
        present(&self.bot_token)
    }

    pub fn mongo_db_uri(&self) -> Option<&str> {
        present(&self.mongo_db_uri)
    }

    pub fn owner_id(&self) -> Option<&str> {
        present(&self.owner_id)
    }

    pub fn string_session(&self) -> Option<&str> {
        present(&self.string_session)
    }

    pub fn string_session2(&self) -> Option<&str> {
        present(&self.string_session2)
    }

    pub fn string_session3(&self) -> Option<&str> {
        present(&self.string_session3)
    }

    pub fn logger_id(&self) -> Option<&str> {
        present(&self.logger_id)
    }

    pub fn spotify_client_id(&self) -> Option<&str> {
        present(&self.spotify_client_id)
    }

    pub fn spotify_client_secret(&self) -> Option<&str> {
        present(&self.spotify_client_secret)
    }

    pub fn support_channel(&self) -> Option<&str> {
        present(&self.support_channel)
    }

    pub fn support_chat(&self) -> Option<&str> {
        present(&self.support_chat)
    }

    /// At least one assistant account has a session string.
    pub fn has_assistant_session(&self) -> bool {
        self.string_session().is_some()
            || self.string_session2().is_some()
            || self.string_session3().is_some()
    }

    /// Credentials the bot cannot start without.
    pub fn has_api_credentials(&self) -> bool {
        self.api_id().is_some()
            && self.api_hash().is_some()
            && self.bot_token().is_some()
            && self.mongo_db_uri().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthCheckConfig {
    pub timeout_secs: u64,
    pub bot_api_url: Url,
}

impl HealthCheckConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub health: HealthCheckConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("invalid BOT_API_URL: {0}")]
    BotApiUrl(#[from] url::ParseError),

    #[error("PROBE_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
