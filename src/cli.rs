use crate::{
    config::Config,
    credentials::parse_credentials,
    portal::http::HttpPortal,
    reporter::Reporter,
    tally::RunReport,
    util::ensure_parent,
};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "health-reporter")]
#[command(about = "Submit the daily health self-report for a batch of students")]
pub struct Args {
    /// Session cookies joined by the delimiter, e.g. "JSESSIONID=a#JSESSIONID=b".
    pub credentials: String,

    /// Path to config TOML. If omitted, uses ./health-reporter.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override the credential delimiter.
    #[arg(long)]
    pub delimiter: Option<String>,
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = Config::resolve(args.config.as_deref())?;
    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
    run(&args, &cfg)
}

fn run(args: &Args, cfg: &Config) -> Result<()> {
    let delimiter = args
        .delimiter
        .as_deref()
        .unwrap_or(cfg.input.delimiter.as_str());
    let credentials = parse_credentials(&args.credentials, delimiter);
    if credentials.is_empty() {
        warn!("no credentials given; nothing to report");
    }
    info!(count = credentials.len(), "starting daily report");

    let portal = HttpPortal::new(&cfg.http)?;
    let reporter = Reporter::new(cfg, portal);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = reporter.run(&credentials, &mut out);

    if !cfg.output.report_path.is_empty() {
        if let Err(err) = write_report(Path::new(&cfg.output.report_path), &report) {
            warn!("{err:#}");
        }
    }
    Ok(())
}

/// One-line description of a startup failure, context chain included.
pub fn fatal_message(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("writing report: {}", path.display()))?;
    info!("report written to {}", path.display());
    Ok(())
}

fn init_logging(
    args: &Args,
    cfg: &Config,
    file_path: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file || cfg.logging.file_path.is_empty() {
        return None;
    }
    Some(PathBuf::from(&cfg.logging.file_path))
}
