//! # Output Redirector
//!
//! Scopes the capture of a capability call's output.
//!
//! A [`Capture`] takes the session output on creation and hands it back when
//! dropped. Dropping happens exactly once on every exit path: normal return,
//! an error bubbling up with `?`, or the enclosing future being dropped on
//! cancellation. The relay handed to the call is closed at the same moment.

use std::future::Future;

use rdpctl_common::session::Relay;

use crate::session::OperatorSession;

pub struct Capture<'s> {
    session: &'s OperatorSession,
    id: u64,
    relay: Relay,
}

impl<'s> Capture<'s> {
    /// Redirects the session output to a new scope labelled `label`.
    pub fn open(session: &'s OperatorSession, label: impl Into<String>) -> Self {
        let label: String = label.into();
        let id = session.acquire(&label);
        tracing::trace!(capture = id, %label, "output captured");
        let relay = Relay::new(session.sink(), label);
        Self { session, id, relay }
    }

    pub fn relay(&self) -> Relay {
        self.relay.clone()
    }
}

impl Drop for Capture<'_> {
    fn drop(&mut self) {
        self.relay.close();
        if self.session.release(self.id) {
            tracing::trace!(capture = self.id, "output restored");
        }
    }
}

/// Runs `body` with the session output redirected to it.
pub async fn with_capture<T, F, Fut>(
    session: &OperatorSession,
    label: impl Into<String>,
    body: F,
) -> T
where
    F: FnOnce(Relay) -> Fut,
    Fut: Future<Output = T>,
{
    let capture = Capture::open(session, label);
    let output = body(capture.relay()).await;
    drop(capture);
    output
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
