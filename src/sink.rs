//! Output seams of the poller: rendering and user-visible notifications
//!
//! Real dashboards implement [`RenderSink`] and [`Notifier`] on top of their
//! UI layer. The log-backed implementations here are what the viewer binary
//! uses and double as a reasonable default for headless deployments.

use tracing::{error, info, warn};

use crate::{MetricsSnapshot, UsageLevel};

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Synchronous display update for one snapshot
///
/// Must be idempotent and side-effect-free beyond presentation; the poller
/// calls it once per successful fetch with no guarantee about timing beyond
/// the configured interval.
pub trait RenderSink: Send + Sync {
    fn render(&self, subject: &str, snapshot: &MetricsSnapshot);
}

/// User-visible failure/status reporting
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Renders snapshots as structured log lines
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn render(&self, subject: &str, snapshot: &MetricsSnapshot) {
        info!(
            subject,
            cpu_percent = snapshot.cpu_percent,
            memory_percent = snapshot.memory.percent,
            disk_percent = snapshot.disk.percent,
            cpu_level = ?UsageLevel::classify(snapshot.cpu_percent),
            "metrics updated"
        );
    }
}

/// Maps notification severities onto log levels
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}
