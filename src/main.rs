// navstate - interaction state for a landing page nav bar and hero
//
// The library holds the controllers (scroll, reveal, dropdown, mobile menu)
// and the plumbing they run on. This binary gives them two front ends:
// - Preview (ratatui): the page rendered in a terminal, driven by real input
// - Replay: a JSON timeline executed headlessly, snapshots as JSON lines

use anyhow::{Context, Result};
use clap::Parser;
use navstate::cli::{self, Cli, Commands};
use navstate::config::{Config, LogRotation, LoggingConfig};
use navstate::logging::{LogBuffer, PreviewLogLayer};
use navstate::{preview, replay};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where human-readable log output goes
enum LogSink {
    /// Captured in memory; the preview owns the screen
    Buffer(LogBuffer),
    /// Plain lines on stderr, keeping stdout free for replay output
    Stderr,
}

/// Initialize tracing
///
/// Precedence: RUST_LOG env var > config file > default "info". File logging
/// writes JSON lines through a non-blocking rolling appender; the returned
/// guard must stay alive for pending lines to flush.
fn init_tracing(logging: &LoggingConfig, sink: LogSink) -> Option<WorkerGuard> {
    let default_filter = format!("navstate={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (buffer_layer, stderr_layer) = match sink {
        LogSink::Buffer(buffer) => (Some(PreviewLogLayer::new(buffer)), None),
        LogSink::Stderr => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
        ),
    };

    let mut guard = None;
    let file_layer = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let file_appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };
                let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
                guard = Some(worker);
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Preview);
    if let Commands::Config {
        show,
        reset,
        edit,
        path,
    } = command
    {
        return cli::handle_config(show, reset, edit, path);
    }

    // Ensure config template exists (helps users discover options)
    if let Err(e) = Config::ensure_config_exists() {
        eprintln!("Warning: {:#}", e);
    }

    let config = Config::load()?;

    match command {
        Commands::Replay { script, output } => {
            let _file_guard = init_tracing(&config.logging, LogSink::Stderr);

            let script = replay::Script::from_path(&script)?;
            let steps = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating output file {}", path.display()))?;
                    replay::run_to(&script, &config, BufWriter::new(file))?
                }
                None => replay::run_to(&script, &config, io::stdout().lock())?,
            };
            tracing::info!("Replayed {} steps", steps);
            Ok(())
        }
        Commands::Preview | Commands::Config { .. } => {
            let log_buffer = LogBuffer::new();
            let _file_guard = init_tracing(&config.logging, LogSink::Buffer(log_buffer.clone()));

            let result = preview::run_preview(config, log_buffer).await;
            if let Err(e) = &result {
                tracing::error!("Preview error: {:?}", e);
            }
            result
        }
    }
}
