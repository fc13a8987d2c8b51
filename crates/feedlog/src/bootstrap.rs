use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.feedlog/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing
/// parents):
/// - `~/.feedlog/`
/// - `~/.feedlog/logs/`
/// - `~/.feedlog/data/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let feedlog_dir = home.join(".feedlog");
    std::fs::create_dir_all(&feedlog_dir)?;
    std::fs::create_dir_all(feedlog_dir.join("logs"))?;
    std::fs::create_dir_all(feedlog_dir.join("data"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-directory discovery ───────────────────────────────────────────────────

/// The default location for stored feeding logs.
pub fn default_data_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".feedlog").join("data")
}

/// Attempt to locate an existing data directory on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `~/.feedlog/data/`
/// 2. `~/.local/share/feedlog/`
///
/// Returns `None` when neither path exists.
pub fn discover_data_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let candidates = [
        home.join(".feedlog").join("data"),
        home.join(".local").join("share").join("feedlog"),
    ];
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
