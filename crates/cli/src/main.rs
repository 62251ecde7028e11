//! Demo driver that writes leveled records through a zlog backend.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zlog_logger::{ConsoleLogger, Logger, Severity};
use zlog_logger_file::{DEFAULT_MAX_FILE_SIZE, FileLogger, FileLoggerConfig};

/// CLI-specific error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File logger error
    #[error(transparent)]
    FileLogger(#[from] zlog_logger_file::Error),

    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Minimum severity to write
    #[arg(long, default_value = "info", env = "ZLOG_LEVEL")]
    level: Severity,

    /// Main log file name
    #[arg(long, default_value = "file_logger.log", env = "ZLOG_FILE_NAME")]
    file_name: String,

    /// Directory holding the log files
    #[arg(long, default_value = "./logs", env = "ZLOG_DIR")]
    dir: PathBuf,

    /// Rotation threshold in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "ZLOG_MAX_FILE_SIZE")]
    max_file_size: u64,

    /// TOML file with a full file logger config; overrides the file options
    #[arg(long, env = "ZLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Log to the console instead of files
    #[arg(long)]
    console: bool,

    /// Pause between rounds in milliseconds
    #[arg(long, default_value_t = 1000, env = "ZLOG_INTERVAL_MS")]
    interval_ms: u64,

    /// Number of rounds; runs until interrupted when omitted
    #[arg(long)]
    iterations: Option<u64>,
}

impl Args {
    fn file_logger_config(&self) -> Result<FileLoggerConfig, Error> {
        match &self.config {
            Some(path) => {
                let source =
                    std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
                        path: path.clone(),
                        source,
                    })?;
                Ok(FileLoggerConfig::from_toml_str(&source)?)
            }
            None => Ok(FileLoggerConfig::builder(&self.dir, &self.file_name)
                .min_severity(self.level)
                .max_file_size(self.max_file_size)
                .build()?),
        }
    }
}

/// One round of records at every severity
fn emit_round<L: Logger + ?Sized>(logger: &L, round: u64) {
    let id = 10010 + round;

    zlog_logger::debug!(logger, "debug log...");
    zlog_logger::info!(logger, "info log...");
    zlog_logger::warn!(logger, "warn log...");
    zlog_logger::error!(logger, "error log: id={id}");
    zlog_logger::fatal!(logger, "fatal log...");
}

async fn run<L: Logger + ?Sized>(logger: &L, args: &Args, shutdown: CancellationToken) {
    let interval = Duration::from_millis(args.interval_ms);
    let mut round = 0u64;

    while args.iterations.is_none_or(|iterations| round < iterations) {
        emit_round(logger, round);
        round += 1;

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = shutdown.cancelled() => break,
        }
    }

    info!(rounds = round, "demo finished");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let shutdown_token = CancellationToken::new();
    let signal_shutdown_token = shutdown_token.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received interrupt signal");
        signal_shutdown_token.cancel();
    });

    if args.console {
        let logger = ConsoleLogger::new(args.level);
        run(&logger, &args, shutdown_token).await;
        return Ok(());
    }

    let logger = FileLogger::new(args.file_logger_config()?)?;
    run(&logger, &args, shutdown_token).await;

    let stats = logger.stats();
    info!(
        enqueued = stats.enqueued,
        dropped = stats.dropped,
        "shutting down file logger"
    );
    logger.shutdown()?;

    Ok(())
}
