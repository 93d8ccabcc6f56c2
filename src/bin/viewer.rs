use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use agent_pulse::{
    config::read_config_file,
    poller::LiveMetricsPoller,
    sink::{LogNotifier, LogRenderSink},
    source::HttpMetricsSource,
};
use clap::Parser;
use tracing::{debug, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: String,

    /// Agent to watch
    subject: String,

    /// Stop after this many seconds instead of running until ctrl-c
    #[arg(long)]
    for_secs: Option<u64>,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("agent_pulse", LevelFilter::TRACE),
        ("pulse_viewer", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = read_config_file(&args.file)?;

    let display_name = config.display.clone().unwrap_or_else(|| config.base_url.clone());
    debug!(
        "watching {} on {} every {}ms",
        args.subject, display_name, config.interval_ms
    );

    let source = Arc::new(HttpMetricsSource::new(
        config.base_url.clone(),
        config.token.clone(),
    ));

    let mut poller =
        LiveMetricsPoller::new(source, Arc::new(LogRenderSink), Arc::new(LogNotifier));

    let visible = Arc::new(AtomicBool::new(true));
    let watched = Arc::clone(&visible);

    poller.start(
        args.subject.as_str(),
        move || watched.load(Ordering::Relaxed),
        Duration::from_millis(config.interval_ms),
    );

    match args.for_secs {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => tokio::signal::ctrl_c().await?,
    }

    visible.store(false, Ordering::Relaxed);
    poller.stop();

    Ok(())
}
