use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Session logs kept besides `latest.log`.
const MAX_SESSIONS: usize = 10;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbosity`. When `log_dir` is set, events are also
/// written to `<log_dir>/latest.log`; the previous session's log is rotated
/// first. A second call is a no-op.
pub fn init_logging(verbosity: u8, log_dir: Option<&Path>) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("acc_console_lib={level},acc_console={level}")));

    let file_layer = log_dir
        .and_then(|dir| match open_session_log(dir) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Could not open log file in {}: {e}", dir.display());
                None
            }
        })
        .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(file_layer)
        .try_init();
}

/// Rotate `latest.log` to `session-<unix>.log`, prune old sessions, and open
/// a fresh `latest.log`.
pub fn open_session_log(logs_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(logs_dir)?;

    let latest = logs_dir.join("latest.log");
    if latest.exists() {
        let rotated = logs_dir.join(format!("session-{}.log", unix_timestamp()));
        let _ = fs::rename(&latest, &rotated);
    }

    cleanup_old_sessions(logs_dir);

    OpenOptions::new().create(true).append(true).open(&latest)
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Keep only the [`MAX_SESSIONS`] most recent `session-*.log` files.
fn cleanup_old_sessions(logs_dir: &Path) {
    let Ok(entries) = fs::read_dir(logs_dir) else {
        return;
    };

    let mut session_files: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with("session-") && name.ends_with(".log")
        })
        .map(|entry| entry.path())
        .collect();

    // Timestamp is embedded, so lexicographic = chronological.
    session_files.sort();

    let excess = session_files.len().saturating_sub(MAX_SESSIONS);
    for oldest in &session_files[..excess] {
        let _ = fs::remove_file(oldest);
    }
}
