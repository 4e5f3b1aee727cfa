// src/health/checker.rs
use super::status::{CheckName, HealthRecord};
use crate::config::BotConfig;
use crate::probe::{Datastore, MessagingClient, ProbeError};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Builds a fresh [`HealthRecord`] on every call.
///
/// The only state is the start instant and the collaborators, so one value
/// is created at startup and shared behind an `Arc`.
pub struct HealthAggregator {
    config: Arc<BotConfig>,
    messaging: Arc<dyn MessagingClient>,
    datastore: Arc<dyn Datastore>,
    probe_timeout: Duration,
    started: Instant,
}

impl HealthAggregator {
    pub fn new(
        config: Arc<BotConfig>,
        messaging: Arc<dyn MessagingClient>,
        datastore: Arc<dyn Datastore>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            config,
            messaging,
            datastore,
            probe_timeout,
            started: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run every check and fold the results. Never fails: a probe that
    /// errors, times out or panics only marks its own check as failed.
    pub async fn evaluate(&self) -> HealthRecord {
        let messaging = self.messaging.clone();
        let bot = self.spawn_probe(CheckName::Bot, async move {
            let identity = messaging.get_self_identity().await?;
            if identity.is_empty() {
                return Err(ProbeError::EmptyIdentity);
            }
            debug!("Bot identity: {:?}", identity);
            Ok(())
        });

        let datastore = self.datastore.clone();
        let database = self.spawn_probe(CheckName::Database, async move {
            let info = datastore.server_info().await?;
            debug!("Datastore server: {}", info.address);
            Ok(())
        });

        let (bot, database) = tokio::join!(bot, database);
        let assistants = self.config.has_assistant_session();
        let apis = self.config.has_api_credentials();

        let record = HealthRecord::new(
            [
                (CheckName::Bot, bot),
                (CheckName::Database, database),
                (CheckName::Assistants, assistants),
                (CheckName::Apis, apis),
            ],
            self.uptime(),
            Utc::now(),
        );

        for (name, ok) in record.checks() {
            if !ok {
                warn!(check = %name, "Health check failed");
            }
        }
        info!(
            "Health evaluation complete: {:?} (uptime {}s)",
            record.status(),
            record.uptime_seconds()
        );

        record
    }

    async fn spawn_probe<F>(&self, name: CheckName, probe: F) -> bool
    where
        F: Future<Output = Result<(), ProbeError>> + Send + 'static,
    {
        let limit = self.probe_timeout;
        let task = tokio::spawn(async move {
            match timeout(limit, probe).await {
                Ok(result) => result,
                Err(_) => Err(ProbeError::Timeout),
            }
        });

        match task.await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(check = %name, error = %e, "Probe failed");
                false
            }
            Err(e) => {
                warn!(check = %name, error = %e, "Probe task aborted");
                false
            }
        }
    }
}
