//! # Dispatcher
//!
//! Top-level orchestration of one operator command.
//!
//! * **Local**: validate the toggle flags, ask the [`CapabilityGate`], then
//!   perform exactly one mutating call.
//! * **Remote**: expand the target and check credentials host by host, see
//!   [`sweep`].
//!
//! The dispatcher keeps no state between runs. Everything a run touches is
//! passed in: the operator session, the endpoint and the cancellation token.

use std::sync::Arc;

use rdpctl_common::capability::{CapabilityProvider, ManagedEndpoint};
use rdpctl_common::command::{Command, ToggleAction};
use rdpctl_common::config::DispatchConfig;
use rdpctl_common::error::DispatchError;
use rdpctl_common::session::Report;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::call::CallScope;
use crate::gate::{self, Authorization, CapabilityGate};
use crate::session::OperatorSession;

pub mod sweep;

pub use sweep::{HostOutcome, SweepReport};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Toggled(ToggleAction),
    Swept(SweepReport),
}

pub struct Dispatcher {
    provider: Arc<dyn CapabilityProvider>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn CapabilityProvider>, config: DispatchConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Runs `command` against `endpoint`.
    ///
    /// Every error returned here has already been reported to the operator
    /// once. Per-host failures of a sweep are not errors; they are part of the
    /// returned [`SweepReport`].
    pub async fn run(
        &self,
        session: &OperatorSession,
        endpoint: &ManagedEndpoint,
        command: Command,
        cancel: &CancellationToken,
    ) -> Result<Outcome, DispatchError> {
        let scope = CallScope::new(session, cancel, self.config.call_timeout);
        let result = match command {
            Command::LocalToggle { enable, disable } => self
                .toggle(scope, endpoint, enable, disable)
                .await
                .map(Outcome::Toggled),
            Command::RemoteProbe(probe) => {
                let report = sweep::run(
                    self.provider.as_ref(),
                    &self.config,
                    scope,
                    endpoint,
                    &probe,
                )
                .await;
                Ok(Outcome::Swept(report))
            }
        };

        if let Err(e) = &result {
            session.report(Report::Error, &e.to_string());
        }
        result
    }

    async fn toggle(
        &self,
        scope: CallScope<'_>,
        endpoint: &ManagedEndpoint,
        enable: bool,
        disable: bool,
    ) -> Result<ToggleAction, DispatchError> {
        let action = ToggleAction::from_flags(enable, disable)?;

        let gate = CapabilityGate::new(self.provider.as_ref());
        if let Authorization::Denied(denial) = gate.authorize(scope, endpoint).await? {
            debug!(endpoint = %endpoint.id, ?denial, "local toggle denied");
            return Err(denial.into());
        }

        let provider = self.provider.as_ref();
        let capability = action.capability();
        scope
            .invoke(capability, gate::label(capability, endpoint), |out| async move {
                match action {
                    ToggleAction::Enable => provider.enable_remote_desktop(endpoint, &out).await,
                    ToggleAction::Disable => provider.disable_remote_desktop(endpoint, &out).await,
                }
            })
            .await?;

        scope.session.report(
            Report::Success,
            &format!("remote desktop {action}d on {}", endpoint.id),
        );
        Ok(action)
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
