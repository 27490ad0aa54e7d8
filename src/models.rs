// Data models for Taskpad

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task priority levels
///
/// Variant order gives `Low < Medium < High`, so sorting descending on
/// priority puts high-priority tasks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid priority: '{0}' (expected low, medium or high)")]
pub struct InvalidPriority(pub String);

impl std::str::FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }
}

/// A single to-do item
///
/// Serialized with the portable document field names; `time` and `date`
/// are free-form strings where empty means unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    /// ISO-8601 creation instant, immutable after creation. Only used as
    /// a sort tiebreaker.
    #[serde(default, rename = "createdAt")]
    pub created_at: String,
}

impl Task {
    pub fn new(
        id: i64,
        text: impl Into<String>,
        time: impl Into<String>,
        date: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            time: time.into(),
            date: date.into(),
            priority,
            completed: false,
            created_at: now_iso(),
        }
    }

    /// Sort key for the creation timestamp. Unparseable stamps sort as
    /// the epoch.
    pub fn created_key(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}

/// Current instant as an ISO-8601 string with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
