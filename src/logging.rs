//! Process logging bootstrap
//!
//! The pipeline writes hand-formatted, message-only log lines to the
//! console and, when asked, to `<logstem>.log` as well. Configuration is an
//! explicit [`Logger`] value rather than hidden global state: build it
//! once at start-up, then either install it process-wide or enter it as
//! the scoped default for the current thread. Installing again swaps the
//! process-wide sinks in place, so the last install wins.
//!
//! Verbosity follows `RUST_LOG` when set, otherwise `info` (or `debug`
//! with [`LogConfig::debug`]).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::dispatcher::DefaultGuard;
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Filter and sinks of one logger, as a single swappable layer
type SinkLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Handle onto the installed process-wide sinks
static GLOBAL_SINKS: Mutex<Option<reload::Handle<SinkLayer, Registry>>> = Mutex::new(None);

/// Horizontal rule used to frame stage headers in the run log
pub const LOG_SPACER: &str =
    "==============================================================================================================";

/// Extension given to the log-file stem
pub const LOG_EXTENSION: &str = "log";

/// Errors raised while setting up logging
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create log directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("A global logger was installed by another library")]
    AlreadyInstalled,

    #[error("Failed to swap the global logger: {0}")]
    Reload(#[from] reload::Error),
}

/// Result type for logging setup
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Where and how verbosely to log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Stem of the log file; the `.log` extension replaces any existing one
    pub logstem: Option<PathBuf>,
    /// Emit `debug` events as well as `info`
    pub debug: bool,
}

impl LogConfig {
    /// Console logging only
    pub fn console() -> Self {
        Self::default()
    }

    /// Console logging plus a file at `<logstem>.log`
    pub fn with_file(logstem: impl Into<PathBuf>) -> Self {
        Self {
            logstem: Some(logstem.into()),
            debug: false,
        }
    }

    /// Toggle debug verbosity
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Path of the log file, if file logging is requested
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logstem
            .as_ref()
            .map(|stem| stem.with_extension(LOG_EXTENSION))
    }

    fn default_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }
}

/// A configured logging pipeline, ready to be installed or entered
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
    level: LevelFilter,
    file: Option<Arc<File>>,
    log_path: Option<PathBuf>,
}

impl Logger {
    /// Build the console sink and, if configured, create the log directory
    /// and open the log file for appending
    pub fn new(config: &LogConfig) -> Result<Self> {
        let log_path = config.log_path();
        let file = log_path
            .as_deref()
            .map(open_log_file)
            .transpose()?
            .map(Arc::new);
        let level = config.default_level();

        let dispatch = Dispatch::new(Registry::default().with(sinks(level, file.clone())));

        Ok(Self {
            dispatch,
            level,
            file,
            log_path,
        })
    }

    /// Path of the log file this logger writes to, if any
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// The underlying dispatcher, for handing to worker threads
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Install as the process-wide default
    ///
    /// The first call sets the global subscriber; later calls replace its
    /// filter and sinks with this logger's. Must not race with other
    /// installs or with concurrent pipeline work.
    pub fn install(&self) -> Result<()> {
        let mut global = GLOBAL_SINKS.lock().unwrap_or_else(PoisonError::into_inner);
        let layer = sinks(self.level, self.file.clone());

        match global.as_ref() {
            Some(handle) => handle.reload(layer)?,
            None => {
                let (layer, handle) = reload::Layer::new(layer);
                tracing::subscriber::set_global_default(Registry::default().with(layer))
                    .map_err(|_| LoggingError::AlreadyInstalled)?;
                *global = Some(handle);
            }
        }
        Ok(())
    }

    /// Make this logger the default for the current thread until the guard
    /// drops; nested calls stack, so the latest one wins
    pub fn set_default(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }
}

/// Message-only console sink, optional file sink, behind a level filter
fn sinks(level: LevelFilter, file: Option<Arc<File>>) -> SinkLayer {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false);

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_ansi(false)
    });

    filter.and_then(console).and_then(file_layer).boxed()
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggingError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
