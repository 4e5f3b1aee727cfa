// src/health/status.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The named checks, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckName {
    Bot,
    Database,
    Assistants,
    Apis,
}

impl CheckName {
    pub const ALL: [CheckName; 4] = [
        CheckName::Bot,
        CheckName::Database,
        CheckName::Assistants,
        CheckName::Apis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::Bot => "bot",
            CheckName::Database => "database",
            CheckName::Assistants => "assistants",
            CheckName::Apis => "apis",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Snapshot produced by one evaluation. Immutable once built.
#[derive(Debug, Clone)]
pub struct HealthRecord {
    checks: BTreeMap<CheckName, bool>,
    status: HealthStatus,
    uptime: Duration,
    timestamp: DateTime<Utc>,
}

impl HealthRecord {
    /// Checks missing from `checks` are recorded as failed.
    pub fn new(
        checks: impl IntoIterator<Item = (CheckName, bool)>,
        uptime: Duration,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut all: BTreeMap<CheckName, bool> =
            CheckName::ALL.iter().map(|name| (*name, false)).collect();
        all.extend(checks);

        let status = if all.values().all(|ok| *ok) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            checks: all,
            status,
            uptime,
            timestamp,
        }
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    pub fn checks(&self) -> &BTreeMap<CheckName, bool> {
        &self.checks
    }

    pub fn check(&self, name: CheckName) -> bool {
        self.checks.get(&name).copied().unwrap_or(false)
    }

    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.uptime.as_secs()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// `"{h}h {m}m {s}s"`, hours unbounded.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, remainder) = (total / 3600, total % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);
    format!("{}h {}m {}s", hours, minutes, seconds)
}

impl Serialize for HealthRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HealthRecord", 5)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("uptime", &format_uptime(self.uptime))?;
        state.serialize_field("uptime_seconds", &self.uptime_seconds())?;
        state.serialize_field("checks", &self.checks)?;
        state.serialize_field(
            "timestamp",
            &self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
        state.end()
    }
}
