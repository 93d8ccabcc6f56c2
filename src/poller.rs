//! LiveMetricsPoller - periodic fetch-and-render loop with bounded lifecycle
//!
//! One poller instance drives the live-metrics view for at most one subject at
//! a time. A session starts with an immediate fetch-and-render cycle, repeats
//! on a fixed interval, and ends when the injected visibility predicate turns
//! false, when `stop` is called, or when a new `start` supersedes it.
//!
//! ## Session Flow
//!
//! ```text
//! start(subject) → tick → visible? ── no ──→ session ends
//!                    ↑        │ yes
//!                    │        └→ fetch → render (or notify on failure)
//!                    └──────── interval ────────┘
//! ```
//!
//! Fetch failures are reported through the [`Notifier`] and otherwise
//! swallowed; the next tick retries. This is a best-effort telemetry stream,
//! not a transactional operation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, instrument, trace, warn};

use crate::sink::{Notifier, RenderSink, Severity};
use crate::source::MetricsSource;

/// Refresh interval used by the dashboard when none is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// The one active polling loop, if any
struct PollSession {
    subject: String,
    task: JoinHandle<()>,
}

/// Drives a recurring fetch-and-render loop for one subject's metrics
///
/// The collaborators are injected once at construction and shared by every
/// session. `start` and `stop` take `&mut self`; the poller is meant to be
/// owned by a single caller (e.g. the view controller), not shared.
pub struct LiveMetricsPoller {
    source: Arc<dyn MetricsSource>,
    sink: Arc<dyn RenderSink>,
    notifier: Arc<dyn Notifier>,
    session: Option<PollSession>,
}

impl LiveMetricsPoller {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        sink: Arc<dyn RenderSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            sink,
            notifier,
            session: None,
        }
    }

    /// Start a poll session for `subject`
    ///
    /// Performs one fetch-and-render cycle immediately, then repeats every
    /// `period` until `visible` returns false or the session is stopped.
    /// Any session already running is cancelled before the new timer is
    /// installed, so at most one timer ever ticks per poller instance.
    pub fn start<V>(&mut self, subject: impl Into<String>, visible: V, period: Duration)
    where
        V: Fn() -> bool + Send + Sync + 'static,
    {
        let subject = subject.into();

        // supersession, not stacking
        self.stop();

        debug!(subject, ?period, "starting poll session");

        let task = tokio::spawn(drive(
            subject.clone(),
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
            Arc::clone(&self.notifier),
            visible,
            period,
        ));

        self.session = Some(PollSession { subject, task });
    }

    /// Cancel the active session, if any
    ///
    /// Idempotent; once this returns, no further ticks fire. A fetch already
    /// in flight may still complete its render, matching the behavior of a
    /// cancelled repeating timer.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.task.abort();
            debug!(subject = %session.subject, "poll session stopped");
        }
    }

    /// Whether a session is currently polling
    ///
    /// Returns false once a session has self-terminated on visibility loss,
    /// even though `stop` was never called.
    pub fn is_active(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.task.is_finished())
    }

    /// Subject of the current or most recent session
    pub fn subject(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.subject.as_str())
    }
}

impl Drop for LiveMetricsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Main loop of one poll session
///
/// The first tick of the interval fires immediately, which gives the view its
/// initial data without waiting a full period. Each cycle is spawned as its
/// own task so a slow fetch never delays the ticker; overlapping cycles are
/// accepted since fetches are idempotent reads.
#[instrument(skip_all, fields(subject = %subject))]
async fn drive<V>(
    subject: String,
    source: Arc<dyn MetricsSource>,
    sink: Arc<dyn RenderSink>,
    notifier: Arc<dyn Notifier>,
    visible: V,
    period: Duration,
) where
    V: Fn() -> bool + Send + Sync + 'static,
{
    let mut ticker = interval(period);

    loop {
        ticker.tick().await;

        if !visible() {
            debug!("subject no longer visible, ending poll session");
            break;
        }

        trace!("tick");

        let subject = subject.clone();
        let source = Arc::clone(&source);
        let sink = Arc::clone(&sink);
        let notifier = Arc::clone(&notifier);

        tokio::spawn(async move {
            match source.fetch(&subject).await {
                Ok(snapshot) => {
                    trace!("received metrics for {subject}");
                    sink.render(&subject, &snapshot);
                }
                Err(e) => {
                    warn!("{subject}: failed to fetch metrics: {e}");
                    notifier.notify("Failed to load metrics", Severity::Error);
                }
            }
        });
    }
}
