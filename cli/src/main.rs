//! CLI entrypoint for AI Werewolf
//!
//! This is the main binary that wires together all layers using
//! dependency injection. The tournament runs on a spawned worker task while
//! the main task drains the event channel and renders it.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use werewolf_application::{
    EngineParams, MatchOrchestrator, TournamentConfig, event_channel, parse_matches,
};
use werewolf_domain::OutputFormat;
use werewolf_infrastructure::{ConfigLoader, FileConfig, SeatRouter};
use werewolf_presentation::{
    Cli, ConsoleFormatter, EventConsumer, EventFormatter, JsonFormatter, ProgressReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_overrides(&cli, &mut config)?;
    config.validate().context("invalid configuration")?;

    info!("Starting AI Werewolf");

    // === Dependency Injection ===
    let params = EngineParams::default()
        .with_decision_timeout(config.engine.decision_timeout())
        .with_phase_delay(config.engine.phase_delay())
        .with_max_days(config.engine.max_days)
        .with_seed(config.engine.seed);
    let tournament =
        TournamentConfig::new(config.tournament.matches).with_seat_names(config.seat_names())?;
    let provider = Arc::new(SeatRouter::from_config(&config)?);

    let (events, receiver) = event_channel();
    let orchestrator = MatchOrchestrator::new(provider, tournament, params, events);
    let worker = tokio::spawn(orchestrator.run());

    // Present on the main task
    let format = config.presentation.format;
    let formatter: Box<dyn EventFormatter> = match format {
        OutputFormat::Text => Box::new(ConsoleFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    let reporter = if cli.quiet || format == OutputFormat::Json {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new(config.tournament.matches)
    };
    let consumer = EventConsumer::new(receiver, formatter, reporter)
        .with_tick(Duration::from_millis(config.presentation.tick_millis));
    let (board, _) = consumer.run().await;

    let report = worker.await.context("tournament worker panicked")?;
    if !report.aborted.is_empty() {
        warn!(
            "{} match(es) aborted and left unscored: {:?}",
            report.aborted.len(),
            report.aborted
        );
    }
    if !board.finished {
        warn!("Event stream closed before the tournament result arrived");
    }
    info!(
        "Tournament finished, champion seat {} after {} match(es)",
        report.champion,
        report.matches.len()
    );

    Ok(())
}

/// Command-line values take precedence over every config file
fn apply_overrides(cli: &Cli, config: &mut FileConfig) -> Result<()> {
    if let Some(raw) = cli.matches_arg() {
        config.tournament.matches = parse_matches(Some(raw))?;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(timeout) = cli.timeout {
        config.engine.decision_timeout_seconds = timeout;
    }
    if let Some(tick) = cli.tick_millis {
        config.presentation.tick_millis = tick;
    }
    if let Some(output) = cli.output {
        config.presentation.format = output.into();
    }
    if cli.no_color {
        config.presentation.color = false;
    }
    if !config.presentation.color {
        ConsoleFormatter::disable_color();
    }
    Ok(())
}

/// Initialize logging based on verbosity level
///
/// Logs go to stderr so stdout carries only the event stream. With
/// `--log-file`, a non-blocking file writer is added; keep the returned
/// guard alive until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
