//! Single capability call: capture scope, deadline and cancellation.

use std::future::Future;
use std::time::Duration;

use rdpctl_common::capability::Capability;
use rdpctl_common::error::{BridgeError, DispatchError};
use rdpctl_common::session::Relay;
use tokio_util::sync::CancellationToken;

use crate::redirect;
use crate::session::OperatorSession;

/// Everything a bridge call needs besides its arguments.
#[derive(Clone, Copy)]
pub struct CallScope<'a> {
    pub session: &'a OperatorSession,
    pub cancel: &'a CancellationToken,
    pub timeout: Duration,
}

impl<'a> CallScope<'a> {
    pub fn new(session: &'a OperatorSession, cancel: &'a CancellationToken, timeout: Duration) -> Self {
        Self {
            session,
            cancel,
            timeout,
        }
    }

    /// Invokes `body` inside its own capture scope.
    ///
    /// Cancellation wins over a result that is ready at the same time. Either
    /// way the body future is dropped before the scope closes.
    pub async fn invoke<T, F, Fut>(
        &self,
        capability: Capability,
        label: impl Into<String>,
        body: F,
    ) -> Result<T, DispatchError>
    where
        F: FnOnce(Relay) -> Fut,
        Fut: Future<Output = Result<T, BridgeError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(DispatchError::Cancelled { capability });
        }

        let cancel = self.cancel;
        let timeout = self.timeout;
        redirect::with_capture(self.session, label, |out| async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(DispatchError::Cancelled { capability }),
                result = tokio::time::timeout(timeout, body(out)) => match result {
                    Ok(inner) => inner.map_err(|e| DispatchError::from_bridge(capability, e)),
                    Err(_elapsed) => Err(DispatchError::Timeout {
                        capability,
                        after: timeout,
                    }),
                },
            }
        })
        .await
    }
}
