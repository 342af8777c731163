use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Where log lines go.
///
/// A full-screen terminal host owns stdout and stderr, so it logs to a file
/// or nowhere; headless tools log to stderr.
#[derive(Debug)]
pub enum LogTarget {
    File(File),
    Stderr,
    Discard,
}

impl LogTarget {
    /// Open (appending) the log file at `path`.
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File(file))
    }
}

/// Install a compact fmt subscriber writing to `target`. Safe to call
/// multiple times; subsequent calls are no-ops for the global subscriber.
pub fn init(target: LogTarget, level: Level) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_names(false);
    let _ = match target {
        LogTarget::File(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::Discard => builder.with_writer(io::sink).try_init(),
    };
}
