//! # Operator Session
//!
//! Explicit handle to the operator's output, owned by the caller and passed
//! into every dispatch. It also tracks who currently owns the output: the
//! operator, or one of the capture scopes opened by [`crate::redirect`].

use std::sync::{Arc, Mutex, MutexGuard};

use rdpctl_common::session::{OutputSink, Report};

/// Snapshot of the capture bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureStats {
    /// Capture scopes opened so far.
    pub acquired: u64,
    /// Capture scopes that handed the output back.
    pub restored: u64,
    /// Capture scopes currently open.
    pub active: usize,
}

#[derive(Default)]
struct Owners {
    next_id: u64,
    /// Open scopes, oldest first. Empty means the operator owns the output.
    stack: Vec<(u64, String)>,
    acquired: u64,
    restored: u64,
}

pub struct OperatorSession {
    sink: Arc<dyn OutputSink>,
    owners: Mutex<Owners>,
}

impl OperatorSession {
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            owners: Mutex::new(Owners::default()),
        }
    }

    pub fn sink(&self) -> Arc<dyn OutputSink> {
        Arc::clone(&self.sink)
    }

    pub fn report(&self, level: Report, message: &str) {
        self.sink.report(level, message);
    }

    /// Label of the innermost open capture scope, `None` when the operator
    /// owns the output.
    pub fn owner(&self) -> Option<String> {
        self.lock().stack.last().map(|(_, label)| label.clone())
    }

    pub fn capture_stats(&self) -> CaptureStats {
        let owners = self.lock();
        CaptureStats {
            acquired: owners.acquired,
            restored: owners.restored,
            active: owners.stack.len(),
        }
    }

    pub(crate) fn acquire(&self, label: &str) -> u64 {
        let mut owners = self.lock();
        let id = owners.next_id;
        owners.next_id += 1;
        owners.acquired += 1;
        owners.stack.push((id, label.to_string()));
        id
    }

    /// Hands the output back from scope `id`. Scopes may end out of order
    /// when sweep calls overlap; releasing an unknown id is a no-op.
    pub(crate) fn release(&self, id: u64) -> bool {
        let mut owners = self.lock();
        let Some(pos) = owners.stack.iter().position(|(open, _)| *open == id) else {
            return false;
        };
        owners.stack.remove(pos);
        owners.restored += 1;
        true
    }

    // A panic inside a capture scope must not wedge the session.
    fn lock(&self) -> MutexGuard<'_, Owners> {
        self.owners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
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
