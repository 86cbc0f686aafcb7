//! Operator-facing output.
//!
//! [`OutputSink`] is wherever the operator reads from: a terminal, a log
//! buffer, a remote console. A [`Relay`] is the write end a capability call
//! gets for the lifetime of its capture scope.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which standard stream a line was emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Operator output channel.
pub trait OutputSink: Send + Sync {
    /// A line produced by a capability call. `source` names the call.
    fn relay(&self, source: &str, stream: Stream, line: &str);

    /// A report produced by the dispatcher itself.
    fn report(&self, level: Report, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Info,
    Success,
    Warning,
    Error,
}

/// Write end of a capture scope.
///
/// Cloning is cheap. Once the scope that handed it out ends, the relay is
/// closed and further writes are dropped, so a call abandoned mid-flight
/// cannot write past its scope.
#[derive(Clone)]
pub struct Relay {
    sink: Arc<dyn OutputSink>,
    source: Arc<str>,
    open: Arc<AtomicBool>,
}

impl Relay {
    pub fn new(sink: Arc<dyn OutputSink>, source: impl Into<Arc<str>>) -> Self {
        Self {
            sink,
            source: source.into(),
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn stdout(&self, line: &str) {
        self.write(Stream::Stdout, line);
    }

    pub fn stderr(&self, line: &str) {
        self.write(Stream::Stderr, line);
    }

    /// Forwards `text` line by line; a trailing newline does not produce an
    /// empty line.
    pub fn write(&self, stream: Stream, text: &str) {
        if !self.is_open() {
            return;
        }
        for line in text.lines() {
            self.sink.relay(&self.source, stream, line);
        }
    }

    /// Closes this relay and every clone of it.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
