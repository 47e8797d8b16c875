//! File-based tracing setup
//!
//! The terminal belongs to the UI, so events only ever go to a file, and only
//! when [`LOG_ENV`] is set.

use std::ffi::OsStr;
use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the base path of the log file
pub const LOG_ENV: &str = "ALGOSCOPE_LOG";

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "algoscope=info";

/// Install a file subscriber if [`LOG_ENV`] is set.
///
/// Each run writes its own `{base}.{timestamp}.{pid}` file so a TUI and a
/// `--narrate` run started side by side never interleave. Returns the path
/// written, or `None` when logging stays off.
pub fn init_tracing() -> Option<PathBuf> {
    let base = std::env::var_os(LOG_ENV)?;
    let path = log_file_path(&base, SystemTime::now(), std::process::id());

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot create log file {}: {}", path.display(), e);
            return None;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %path.display(),
        "logging started"
    );
    Some(path)
}

fn log_file_path(base: &OsStr, now: SystemTime, pid: u32) -> PathBuf {
    // a clock before the epoch still yields a usable name
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.to_os_string();
    name.push(format!(".{}.{}", secs, pid));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_file_path_appends_timestamp_and_pid() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let path = log_file_path(OsStr::new("/tmp/algoscope.log"), now, 42);
        assert_eq!(path, PathBuf::from("/tmp/algoscope.log.1700000000.42"));
    }

    #[test]
    fn test_clock_before_epoch_uses_zero() {
        let now = UNIX_EPOCH - Duration::from_secs(5);
        let path = log_file_path(OsStr::new("run.log"), now, 7);
        assert_eq!(path, PathBuf::from("run.log.0.7"));
    }
}
