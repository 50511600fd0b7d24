use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, Once, PoisonError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Destination for the events emitted through a [`Logger`].
pub trait LogSink: Send + Sync {
    fn record(&self, level: Level, message: &str);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!("{}", message);
        } else if level == Level::WARN {
            tracing::warn!("{}", message);
        } else if level == Level::INFO {
            tracing::info!("{}", message);
        } else if level == Level::DEBUG {
            tracing::debug!("{}", message);
        } else {
            tracing::trace!("{}", message);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
}

/// Keeps events in memory so callers can inspect what a run reported.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .map(|event| event.message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEvent {
                level,
                message: message.to_string(),
            });
    }
}

/// Prefix-aware logger handed to every pipeline component.
#[derive(Clone)]
pub struct Logger {
    prefixes: VecDeque<String>,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            prefixes: VecDeque::new(),
            sink,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn emit(&self, level: Level, message: &str) {
        let prefix = self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>();
        self.sink.record(level, &format!("{}{}", prefix, message));
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::INFO, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::ERROR, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::WARN, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::DEBUG, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefixes", &self.prefixes)
            .finish_non_exhaustive()
    }
}

/// Installs the global `tracing` subscriber once (`RUST_LOG` overrides the `info` default).
pub fn init_logging() -> Logger {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_prepended() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(sink.clone())
            .with_prefix("[page 1]")
            .with_prefix("[post 2]");

        logger.warn("no content");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].message, "[page 1] [post 2] no content");
    }

    #[test]
    fn test_messages_filter_by_level() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(sink.clone()).with_prefix("[run]");

        logger.info("done");
        logger.error("boom");

        assert_eq!(sink.messages(Level::INFO), vec!["[run] done".to_string()]);
        assert_eq!(sink.messages(Level::ERROR), vec!["[run] boom".to_string()]);
    }

    #[test]
    fn test_clones_share_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(sink.clone());
        let child = logger.clone().with_prefix("[child]");

        logger.debug("parent");
        child.debug("child");

        assert_eq!(sink.events().len(), 2);
    }
}
