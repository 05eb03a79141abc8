use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the log file for TUI mode.
pub const LOG_ENV: &str = "OPENCODE_MANAGER_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for the TUI.
///
/// Logging is off unless `OPENCODE_MANAGER_LOG` names a file, so nothing is
/// written over the screen. The file gets a `{path}.{timestamp}.{pid}` name
/// so concurrent instances do not share one.
pub fn init_tracing_for_tui() {
    let Some(log_path) = std::env::var(LOG_ENV).ok() else {
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .init();
}

/// Initialize tracing for the headless subcommands: stderr, UTC timestamps.
pub fn init_tracing_stderr() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(stderr_layer)
        .init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
