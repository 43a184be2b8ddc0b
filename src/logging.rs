//! Logging collaborator handed to pipelines.
//!
//! Components never reach for a global logger; callers pass a `PipelineLog`.
//! The binary uses `TracingLog`, which forwards to `tracing` (subscriber set up
//! in `app::run`). `MemoryLog` keeps events in memory for inspection.

use std::cell::RefCell;

use tracing::Level;

pub trait PipelineLog {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

/// Forwards to the `tracing` subscriber installed by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl PipelineLog for TracingLog {
    fn log(&self, level: Level, message: &str) {
        // `tracing` macros need the level at compile time.
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else if level == Level::INFO {
            tracing::info!("{message}");
        } else if level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
    }
}

/// Records events in order; single-threaded like the pipeline itself.
#[derive(Debug, Default)]
pub struct MemoryLog {
    events: RefCell<Vec<(Level, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.borrow().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl PipelineLog for MemoryLog {
    fn log(&self, level: Level, message: &str) {
        self.events.borrow_mut().push((level, message.to_string()));
    }
}

/// Install the stderr `tracing` subscriber for the binary.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A subscriber may already be set (e.g. when embedded); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
