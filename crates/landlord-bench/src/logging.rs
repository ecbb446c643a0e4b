use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Level, event};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Routes bot decisions and bench requests to `telemetry.jsonl` beside the summary.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_dir(&outputs.summary_md)?.join(TELEMETRY_FILE);
    let (writer, guard) = open_writer(&telemetry_path)?;

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // Tests may have installed a subscriber already.
    let _ = tracing::subscriber::set_global_default(subscriber);

    event!(
        target: "landlord_bench::run",
        Level::INFO,
        run_id,
        level = level.as_str(),
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

fn telemetry_dir(summary_md: &Path) -> Result<PathBuf> {
    let dir = summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    Ok(dir)
}

fn open_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file = File::create(path)
        .with_context(|| format!("creating telemetry file at {}", path.display()))?;
    Ok(NonBlockingBuilder::default().lossy(false).finish(file))
}
