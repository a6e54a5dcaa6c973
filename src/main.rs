// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Kraken Logger - KrakenSDR data logger for Elasticsearch export
//!
//! Writes KrakenSDR records as NDJSON for Filebeat ingestion, once or on a
//! fixed interval.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kraken_logger::{Config, Engine, Scheduler, VERSION};

/// Kraken Logger - KrakenSDR data logger for Elasticsearch export
#[derive(Parser, Debug)]
#[command(name = "kraken-logger")]
#[command(author = "Kraken Logger Project")]
#[command(version = VERSION)]
#[command(about = "Converts KrakenSDR data to NDJSON for Filebeat ingestion")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write one full sample batch and exit
    #[arg(long)]
    generate_samples: bool,

    /// Write a batch every interval until interrupted
    #[arg(long)]
    continuous: bool,

    /// Seconds between batches in continuous mode
    #[arg(long)]
    interval: Option<u64>,

    /// Log output directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Never attempt hardware captures
    #[arg(long)]
    no_hardware: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is configured from the file, so load it first
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    let directive = config.log_directive(args.debug, args.trace);
    let filter = if args.debug || args.trace {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Kraken Logger v{}", VERSION);

    if let Some(log_dir) = args.log_dir.clone() {
        config.log_dir = log_dir;
    }
    if let Some(interval) = args.interval {
        config.batch.interval_secs = interval;
    }
    if args.no_hardware {
        config.hardware.use_real_data = false;
    }

    info!("Configuration loaded from {:?}", config_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> Result<()> {
    let interval = Duration::from_secs(config.batch.interval_secs);
    let mut engine = Engine::new(config).await?;
    info!(
        "RTL-SDR devices available: {}",
        engine.inventory().device_count
    );

    if args.continuous {
        let (tx, rx) = broadcast::channel(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, finishing current batch...");
                let _ = tx.send(());
            }
        });

        let batches = Scheduler::new(interval).run(&mut engine, rx).await?;
        info!("Kraken Logger stopped after {} batches", batches);
    } else if args.generate_samples {
        engine.generate_sample_data().await?;
    } else {
        info!("KrakenSDR Data Logger initialized");
        info!("Log directory: {}", engine.writer().dir().display());
        info!("Use --generate-samples to create test data, --continuous to keep logging");
    }

    Ok(())
}
