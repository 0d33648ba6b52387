//! featuredev-bridge
//!
//! Drives the feature-development connector from the command line:
//! replays recorded host traffic and encodes UI commands for the host.

mod config;
mod encode;
mod logging;
mod replay;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{LogFormat, Overrides};
use crate::encode::EncodeAction;
use crate::replay::ReplayOptions;

#[derive(Debug, Parser)]
#[command(name = "featuredev-bridge", version, about)]
struct Cli {
    /// Data directory (config file and logs)
    #[arg(long, global = true, env = "FEATUREDEV_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `featuredev_connector=trace`
    #[arg(long, global = true, env = "FEATUREDEV_LOG_FILTER")]
    log_filter: Option<String>,

    #[arg(long, global = true, value_enum, env = "FEATUREDEV_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Write logs to `<data dir>/logs/bridge.log` instead of stderr
    #[arg(long, global = true)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Feed an NDJSON log of host messages through a connector
    Replay {
        file: PathBuf,
        /// Print per-kind counts to stderr when done
        #[arg(long)]
        summary: bool,
        /// Fail on the first malformed line
        #[arg(long)]
        strict: bool,
    },
    /// Print the host-bound JSON for a single UI action
    Encode {
        #[command(subcommand)]
        action: EncodeAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load(Overrides {
        data_dir: cli.data_dir,
        log_filter: cli.log_filter,
        log_format: cli.log_format,
        log_to_file: cli.log_to_file,
    })?;
    let logging = logging::init_logging(&config)?;

    info!(
        component = "bridge",
        event = "bridge.start",
        run_id = %logging.run_id,
        data_dir = %config.data_dir.display(),
        "Starting featuredev bridge"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Replay {
            file,
            summary,
            strict,
        } => {
            let result = replay::replay_file(&file, ReplayOptions { strict }, &mut out).await?;
            if summary {
                eprintln!("{}", result.table());
            }
        }
        Command::Encode { action } => {
            let message = encode::encode(&action)?;
            serde_json::to_writer(&mut out, &message)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(())
}
