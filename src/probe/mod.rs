// src/probe/mod.rs
//
// Narrow views of the bot's external collaborators. The health checker only
// ever asks two questions: "who am I" of the messaging backend and "are you
// there" of the datastore.
mod mongo;
mod telegram;

pub use mongo::TcpDatastoreProbe;
pub use telegram::BotApiClient;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: Option<String>,
}

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.username.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("probe returned an empty identity")]
    EmptyIdentity,

    #[error("invalid datastore URI: {0}")]
    InvalidUri(String),

    #[error("unsupported datastore URI: {0}")]
    Unsupported(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("probe timed out")]
    Timeout,
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn get_self_identity(&self) -> Result<Identity, ProbeError>;
}

#[async_trait]
pub trait Datastore: Send + Sync {
    async fn server_info(&self) -> Result<ServerInfo, ProbeError>;
}
