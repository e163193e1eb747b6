use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Severity of a log entry, numbered as in the engine logging callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
    Epic = 6,
}

impl LogLevel {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(LogLevel::None),
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warning),
            3 => Some(LogLevel::Info),
            4 => Some(LogLevel::Debug),
            5 => Some(LogLevel::Verbose),
            6 => Some(LogLevel::Epic),
            _ => None,
        }
    }

    /// Parse a level from its name ("info", "DEBUG", ...) or its number.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<u8>() {
            return Self::from_raw(raw);
        }
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(LogLevel::None),
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "verbose" => Some(LogLevel::Verbose),
            "epic" => Some(LogLevel::Epic),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Epic => "epic",
        };
        f.write_str(name)
    }
}

/// One line of the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub text: String,
}

/// Entries already drained from the queue, as one string.
#[derive(Default)]
struct LogBuffer {
    text: String,
    entries: usize,
}

struct Shared {
    queue_tx: Sender<LogEntry>,
    queue_rx: Receiver<LogEntry>,
    changed_tx: Sender<()>,
    observer: Mutex<Option<Receiver<()>>>,
    buffer: Mutex<LogBuffer>,
    max_level: LogLevel,
}

/// Ordered multi-producer, single-consumer text log.
///
/// Producers push entries onto a lock-free queue and raise a change marker.
/// The marker channel holds at most one pending signal, so a burst of
/// appends is seen by the observer as a single notification. The observer
/// re-reads the whole log with `snapshot()`.
#[derive(Clone)]
pub struct LogAggregator {
    shared: Arc<Shared>,
}

/// Cloneable producer handle onto a `LogAggregator`. Entries above
/// `max_level` are dropped.
#[derive(Clone, Debug)]
pub struct LogSink {
    queue_tx: Sender<LogEntry>,
    changed_tx: Sender<()>,
    max_level: LogLevel,
}

impl LogSink {
    /// Append `text` at `level`. Never blocks.
    pub fn log(&self, level: LogLevel, text: impl Into<String>) {
        if level == LogLevel::None || level > self.max_level {
            return;
        }
        let entry = LogEntry {
            level,
            text: text.into(),
        };
        if self.queue_tx.send(entry).is_ok() {
            // Full means a notification is already pending.
            let _ = self.changed_tx.try_send(());
        }
    }

    pub fn error(&self, text: impl Into<String>) {
        self.log(LogLevel::Error, text)
    }

    pub fn info(&self, text: impl Into<String>) {
        self.log(LogLevel::Info, text)
    }

    pub fn debug(&self, text: impl Into<String>) {
        self.log(LogLevel::Debug, text)
    }

    pub fn max_level(&self) -> LogLevel {
        self.max_level
    }
}

impl Default for LogAggregator {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl LogAggregator {
    /// Create an empty log whose default sinks keep entries up to `max_level`.
    pub fn new(max_level: LogLevel) -> Self {
        let (queue_tx, queue_rx) = unbounded();
        let (changed_tx, changed_rx) = bounded(1);
        Self {
            shared: Arc::new(Shared {
                queue_tx,
                queue_rx,
                changed_tx,
                observer: Mutex::new(Some(changed_rx)),
                buffer: Mutex::new(LogBuffer::default()),
                max_level,
            }),
        }
    }

    /// A producer handle using the aggregator's level filter.
    pub fn sink(&self) -> LogSink {
        self.sink_with_level(self.shared.max_level)
    }

    /// A producer handle with its own level filter.
    pub fn sink_with_level(&self, max_level: LogLevel) -> LogSink {
        LogSink {
            queue_tx: self.shared.queue_tx.clone(),
            changed_tx: self.shared.changed_tx.clone(),
            max_level,
        }
    }

    /// Append a line unconditionally.
    pub fn append(&self, line: impl Into<String>) {
        self.sink_with_level(LogLevel::Epic).info(line)
    }

    /// The change notification receiver. Only one observer exists, so
    /// every call after the first returns `None`.
    pub fn observer(&self) -> Option<Receiver<()>> {
        lock(&self.shared.observer).take()
    }

    /// Move pending queue entries into the buffer, returning the guard.
    fn drain(&self) -> MutexGuard<'_, LogBuffer> {
        let mut buffer = lock(&self.shared.buffer);
        while let Ok(entry) = self.shared.queue_rx.try_recv() {
            buffer.text.push_str(&entry.text);
            buffer.text.push('\n');
            buffer.entries += 1;
        }
        buffer
    }

    /// The concatenation of all entries, one per line, in queue order.
    pub fn snapshot(&self) -> String {
        self.drain().text.clone()
    }

    /// Wipe the log.
    pub fn clear(&self) {
        let mut buffer = self.drain();
        buffer.text.clear();
        buffer.entries = 0;
    }

    /// Number of entries currently in the log.
    pub fn len(&self) -> usize {
        self.drain().entries
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
