//! Credential sweep over every host of a target.
//!
//! Hosts are dispatched in resolution order on a bounded pool of
//! `concurrency` in-flight calls. Results are buffered so the report, and the
//! per-host lines sent to the operator, always follow resolution order;
//! only the relayed capability output of overlapping calls may interleave.
//!
//! A failing host is reported and skipped. Cancellation stops dispatching new
//! hosts and abandons the calls in flight.

use std::future;
use std::pin::pin;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use rdpctl_common::capability::{Capability, CapabilityProvider, ManagedEndpoint};
use rdpctl_common::command::RemoteProbe;
use rdpctl_common::config::DispatchConfig;
use rdpctl_common::error::DispatchError;
use rdpctl_common::session::Report;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

use crate::call::CallScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOutcome {
    pub host: String,
    pub result: Result<(), DispatchError>,
}

impl HostOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.result, Err(DispatchError::Cancelled { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub target: String,
    /// Number of hosts the target expands to.
    pub planned: u128,
    /// One entry per dispatched host, in resolution order.
    pub outcomes: Vec<HostOutcome>,
    pub cancelled: bool,
}

impl SweepReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err() && !o.is_cancelled())
            .count()
    }

    /// Hosts planned but never completed because of cancellation.
    pub fn skipped(&self) -> u128 {
        let completed = (self.succeeded() + self.failed()) as u128;
        self.planned.saturating_sub(completed)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|o| o.host.as_str())
    }
}

pub(crate) async fn run(
    provider: &dyn CapabilityProvider,
    config: &DispatchConfig,
    scope: CallScope<'_>,
    endpoint: &ManagedEndpoint,
    probe: &RemoteProbe,
) -> SweepReport {
    let hosts = probe.target.hosts();
    let planned = hosts.len();
    let target = probe.target.to_string();
    let session = scope.session;

    let noun = if planned == 1 { "host" } else { "hosts" };
    session.report(
        Report::Info,
        &format!("checking credentials of {}\\{} on {planned} {noun}", probe.domain, probe.username),
    );

    let span = info_span!("sweep", %target, planned = %planned);
    let cancel = scope.cancel;
    let base = config.pacing;
    // paced ahead of the pool: spacing holds at any concurrency
    let checks = stream::iter(&hosts)
        .enumerate()
        .then(move |(idx, host)| async move {
            if idx > 0 {
                pace(base, cancel).await;
            }
            host
        })
        .take_while(|_| future::ready(!cancel.is_cancelled()))
        .map(|host| check_host(provider, scope, endpoint, probe, host))
        .buffered(config.workers());
    let mut checks = pin!(checks);

    let mut outcomes: Vec<HostOutcome> = Vec::new();
    async {
        while let Some(outcome) = checks.next().await {
            report_host(scope, &outcome);
            outcomes.push(outcome);
        }
    }
    .instrument(span)
    .await;

    let cancelled = cancel.is_cancelled();
    let report = SweepReport {
        target,
        planned,
        outcomes,
        cancelled,
    };

    if cancelled {
        session.report(
            Report::Warning,
            &format!("sweep cancelled, {} host(s) not checked", report.skipped()),
        );
    }
    report
}

/// Waits out one pacing interval, or less if the sweep is cancelled.
async fn pace(base: Duration, cancel: &CancellationToken) {
    if let Some(pause) = pacing(base) {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(pause) => {}
        }
    }
}

async fn check_host(
    provider: &dyn CapabilityProvider,
    scope: CallScope<'_>,
    endpoint: &ManagedEndpoint,
    probe: &RemoteProbe,
    host: String,
) -> HostOutcome {
    let capability = Capability::CheckRemoteCredentials;

    debug!(%host, "checking credentials");
    let check = probe.check_for(&host);
    let result = scope
        .invoke(capability, host.clone(), |out| async move {
            provider.check_remote_credentials(endpoint, &check, &out).await
        })
        .await;

    HostOutcome { host, result }
}

/// Pause before a dispatch: `base` plus up to `base` of random jitter.
fn pacing(base: Duration) -> Option<Duration> {
    if base.is_zero() {
        return None;
    }
    let base_ms = base.as_millis().min(u128::from(u64::MAX)) as u64;
    let jitter_ms: u64 = rand::random_range(0..=base_ms);
    Some(base + Duration::from_millis(jitter_ms))
}

fn report_host(scope: CallScope<'_>, outcome: &HostOutcome) {
    let session = scope.session;
    match &outcome.result {
        Ok(()) => session.report(Report::Success, &format!("{}: check completed", outcome.host)),
        Err(DispatchError::Cancelled { .. }) => {
            session.report(Report::Warning, &format!("{}: abandoned", outcome.host))
        }
        Err(e) => session.report(Report::Error, &format!("{}: {e}", outcome.host)),
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
