pub mod config;
pub mod poller;
pub mod sink;
pub mod source;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time reading of an agent's resource utilization.
///
/// Snapshots are immutable values. No history is kept anywhere in this crate;
/// each snapshot simply replaces the previous one in whatever sink consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu_percent: f64,
    pub memory: MemoryUsage,
    pub disk: DiskUsage,

    /// When the agent took the reading. Older agents omit this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub percent: f64,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub used: Option<u64>,
    #[serde(default)]
    pub available: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub percent: f64,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub used: Option<u64>,
    #[serde(default)]
    pub free: Option<u64>,
}

/// Coarse classification of a utilization percentage, for display sinks that
/// want to color-code readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    /// At or below 60%
    Normal,
    /// Above 60%
    Elevated,
    /// Above 80%
    Critical,
}

impl UsageLevel {
    pub fn classify(percent: f64) -> Self {
        if percent > 80.0 {
            UsageLevel::Critical
        } else if percent > 60.0 {
            UsageLevel::Elevated
        } else {
            UsageLevel::Normal
        }
    }
}
