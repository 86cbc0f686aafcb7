//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rdpctl_common::capability::{Capability, CapabilityProvider, CredentialCheck, ManagedEndpoint};
use rdpctl_common::error::BridgeError;
use rdpctl_common::session::{OutputSink, Relay, Report, Stream};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct RecordingSink {
    relayed: Mutex<Vec<(String, Stream, String)>>,
    reports: Mutex<Vec<(Report, String)>>,
}

impl RecordingSink {
    pub fn relayed(&self) -> Vec<(String, Stream, String)> {
        self.relayed.lock().unwrap().clone()
    }

    pub fn reported(&self, level: Report) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn relay(&self, source: &str, stream: Stream, line: &str) {
        self.relayed
            .lock()
            .unwrap()
            .push((source.to_string(), stream, line.to_string()));
    }

    fn report(&self, level: Report, message: &str) {
        self.reports.lock().unwrap().push((level, message.to_string()));
    }
}

/// Scriptable provider that records every call it receives.
#[derive(Default)]
pub struct StubProvider {
    elevated: bool,
    privilege_error: Option<BridgeError>,
    toggle_error: Option<BridgeError>,
    failing: HashMap<String, BridgeError>,
    slow: HashMap<String, Duration>,
    cancel_on: HashMap<String, CancellationToken>,
    calls: Mutex<Vec<Capability>>,
    checks: Mutex<Vec<CredentialCheck>>,
    starts: Mutex<Vec<(String, Instant)>>,
}

impl StubProvider {
    pub fn elevated() -> Self {
        Self {
            elevated: true,
            ..Self::default()
        }
    }

    pub fn unprivileged() -> Self {
        Self::default()
    }

    pub fn with_privilege_error(mut self, err: BridgeError) -> Self {
        self.privilege_error = Some(err);
        self
    }

    pub fn with_toggle_error(mut self, err: BridgeError) -> Self {
        self.toggle_error = Some(err);
        self
    }

    pub fn failing_host(mut self, host: &str, err: BridgeError) -> Self {
        self.failing.insert(host.to_string(), err);
        self
    }

    pub fn slow_host(mut self, host: &str, delay: Duration) -> Self {
        self.slow.insert(host.to_string(), delay);
        self
    }

    /// Fires `cancel` as soon as `host` is checked.
    pub fn cancel_on(mut self, host: &str, cancel: CancellationToken) -> Self {
        self.cancel_on.insert(host.to_string(), cancel);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.is_mutating()).count()
    }

    pub fn credential_checks(&self) -> Vec<CredentialCheck> {
        self.checks.lock().unwrap().clone()
    }

    pub fn checked_hosts(&self) -> Vec<String> {
        self.credential_checks().into_iter().map(|c| c.host).collect()
    }

    /// When each credential check started, in call order.
    pub fn check_starts(&self) -> Vec<(String, Instant)> {
        self.starts.lock().unwrap().clone()
    }

    fn record(&self, capability: Capability) {
        self.calls.lock().unwrap().push(capability);
    }

    fn toggle(&self, capability: Capability, out: &Relay) -> Result<(), BridgeError> {
        self.record(capability);
        if let Some(err) = &self.toggle_error {
            return Err(err.clone());
        }
        out.stdout(&format!("{capability} done"));
        Ok(())
    }
}

#[async_trait]
impl CapabilityProvider for StubProvider {
    async fn check_admin_privilege(
        &self,
        _endpoint: &ManagedEndpoint,
        _out: &Relay,
    ) -> Result<bool, BridgeError> {
        self.record(Capability::CheckAdminPrivilege);
        match &self.privilege_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.elevated),
        }
    }

    async fn enable_remote_desktop(
        &self,
        _endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.toggle(Capability::EnableRemoteDesktop, out)
    }

    async fn disable_remote_desktop(
        &self,
        _endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.toggle(Capability::DisableRemoteDesktop, out)
    }

    async fn check_remote_credentials(
        &self,
        _endpoint: &ManagedEndpoint,
        check: &CredentialCheck,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.record(Capability::CheckRemoteCredentials);
        self.checks.lock().unwrap().push(check.clone());
        self.starts
            .lock()
            .unwrap()
            .push((check.host.clone(), Instant::now()));

        if let Some(cancel) = self.cancel_on.get(&check.host) {
            cancel.cancel();
        }
        if let Some(delay) = self.slow.get(&check.host) {
            tokio::time::sleep(*delay).await;
        }

        out.stdout(&format!("{}:3389 {}\\{}", check.host, check.domain, check.username));
        match self.failing.get(&check.host) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
