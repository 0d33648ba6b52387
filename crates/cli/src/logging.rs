use featuredev_protocol::new_id;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{BridgeConfig, LogFormat};

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "bridge.log";

pub struct LoggingHandle {
    pub run_id: String,
    pub guard: WorkerGuard,
}

/// Logs go to stderr so stdout stays clean for JSON output, or to
/// `<data dir>/logs/bridge.log` when file logging is on.
pub fn init_logging(config: &BridgeConfig) -> anyhow::Result<LoggingHandle> {
    let settings = &config.log;

    let (filter, rejected_filter) = build_filter(settings.filter.as_deref());

    let (writer, guard) = if settings.to_file {
        let log_dir = config.log_dir();
        std::fs::create_dir_all(&log_dir)?;
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME))
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    let registry = tracing_subscriber::registry().with(filter);
    match settings.format {
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .pretty()
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .json()
                        .flatten_event(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .with_current_span(true),
                )
                .try_init()?;
        }
    }

    let run_id = std::env::var("FEATUREDEV_RUN_ID")
        .unwrap_or_else(|_| format!("pid-{}-{}", std::process::id(), new_id()));

    tracing::info!(
        component = "logging",
        event = "logging.initialized",
        run_id = %run_id,
        to_file = settings.to_file,
        format = settings.format.as_str(),
        filter = %settings
            .filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
    );

    if let Some(error) = rejected_filter {
        tracing::warn!(
            component = "logging",
            event = "logging.filter.rejected",
            filter = settings.filter.as_deref().unwrap_or_default(),
            error = %error,
            "Ignoring invalid log filter, using RUST_LOG or the default"
        );
    }

    Ok(LoggingHandle { run_id, guard })
}

/// Configured filter > `RUST_LOG` > default. The second value is the parse
/// error when a configured filter had to be dropped.
fn build_filter(configured: Option<&str>) -> (EnvFilter, Option<String>) {
    let mut rejected = None;
    if let Some(value) = configured {
        match EnvFilter::try_new(value) {
            Ok(filter) => return (filter, None),
            Err(e) => rejected = Some(e.to_string()),
        }
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    (filter, rejected)
}
