use std::sync::Mutex;

use rdpctl_common::log::REPORT_TARGET;
use rdpctl_common::session::{OutputSink, Report, Stream};
use rdpctl_common::{error, info, success, warn};
use tracing::Span;

use crate::terminal::{print, progress};

/// Operator output on the terminal.
///
/// Relayed lines are always printed. Reports follow the quiet level: `-q`
/// keeps per-host results, `-qq` keeps only errors.
pub struct TerminalSink {
    quiet: u8,
    progress: Mutex<Option<Span>>,
}

impl TerminalSink {
    pub fn new(quiet: u8) -> Self {
        Self {
            quiet,
            progress: Mutex::new(None),
        }
    }

    /// Advances `span`'s bar once per finished host until [`Self::untrack`].
    pub fn track(&self, span: Span) {
        if let Ok(mut slot) = self.progress.lock() {
            *slot = Some(span);
        }
    }

    pub fn untrack(&self) {
        if let Ok(mut slot) = self.progress.lock() {
            *slot = None;
        }
    }

    fn tick(&self) {
        if let Ok(slot) = self.progress.lock()
            && let Some(span) = slot.as_ref()
        {
            progress::advance(span);
        }
    }
}

impl OutputSink for TerminalSink {
    fn relay(&self, source: &str, stream: Stream, line: &str) {
        print::relay_line(source, stream, line);
    }

    fn report(&self, level: Report, message: &str) {
        match level {
            Report::Info if self.quiet == 0 => info!(target: REPORT_TARGET, "{message}"),
            Report::Info => {}
            Report::Success => {
                self.tick();
                if self.quiet < 2 {
                    success!("{message}");
                }
            }
            Report::Warning if self.quiet < 2 => warn!(target: REPORT_TARGET, "{message}"),
            Report::Warning => {}
            Report::Error => {
                self.tick();
                error!(target: REPORT_TARGET, "{message}");
            }
        }
    }
}
