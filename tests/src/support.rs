use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rdpctl_common::capability::{
    Capability, CapabilityProvider, CredentialCheck, ManagedEndpoint, Platform,
};
use rdpctl_common::command::Command;
use rdpctl_common::config::DispatchConfig;
use rdpctl_common::error::{BridgeError, DispatchError};
use rdpctl_common::session::{OutputSink, Relay, Report, Stream};
use rdpctl_core::dispatcher::{Dispatcher, Outcome};
use rdpctl_core::session::OperatorSession;
use tokio_util::sync::CancellationToken;

/// Every call the dispatcher made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Privilege,
    Enable,
    Disable,
    Credentials(CredentialCheck),
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(self, Call::Enable | Call::Disable)
    }
}

/// Bridge double: a configurable admin flag and a set of hosts that reject
/// the credentials.
pub struct Bridge {
    pub admin: bool,
    pub rejecting: HashSet<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl Bridge {
    pub fn admin() -> Self {
        Self {
            admin: true,
            rejecting: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(mut self, host: &str) -> Self {
        self.rejecting.insert(host.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CapabilityProvider for Bridge {
    async fn check_admin_privilege(
        &self,
        _endpoint: &ManagedEndpoint,
        _out: &Relay,
    ) -> Result<bool, BridgeError> {
        self.push(Call::Privilege);
        Ok(self.admin)
    }

    async fn enable_remote_desktop(
        &self,
        _endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.push(Call::Enable);
        out.stdout("fDenyTSConnections = 0");
        Ok(())
    }

    async fn disable_remote_desktop(
        &self,
        _endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.push(Call::Disable);
        out.stdout("fDenyTSConnections = 1");
        Ok(())
    }

    async fn check_remote_credentials(
        &self,
        _endpoint: &ManagedEndpoint,
        check: &CredentialCheck,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.push(Call::Credentials(check.clone()));
        if self.rejecting.contains(&check.host) {
            out.stderr("STATUS_LOGON_FAILURE");
            return Err(BridgeError::Remote("STATUS_LOGON_FAILURE".into()));
        }
        out.stdout(&format!("{} (Pwn3d!)", check.host));
        Ok(())
    }
}

/// Operator console double.
#[derive(Default)]
pub struct Console {
    pub lines: Mutex<Vec<(String, Stream, String)>>,
    pub reports: Mutex<Vec<(Report, String)>>,
}

impl Console {
    pub fn lines(&self) -> Vec<(String, Stream, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn reports(&self, level: Report) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl OutputSink for Console {
    fn relay(&self, source: &str, stream: Stream, line: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((source.to_string(), stream, line.to_string()));
    }

    fn report(&self, level: Report, message: &str) {
        self.reports.lock().unwrap().push((level, message.to_string()));
    }
}

pub struct Run {
    pub bridge: Arc<Bridge>,
    pub console: Arc<Console>,
    pub session: OperatorSession,
    pub outcome: Result<Outcome, DispatchError>,
}

/// Runs one command end to end against `bridge` on an endpoint of `platform`.
pub async fn run(bridge: Bridge, platform: Platform, command: Command, config: DispatchConfig) -> Run {
    let bridge = Arc::new(bridge);
    let console = Arc::new(Console::default());
    let session = OperatorSession::new(console.clone());
    let endpoint = ManagedEndpoint::new("ws-042", platform);
    let dispatcher = Dispatcher::new(bridge.clone(), config);

    let outcome = dispatcher
        .run(&session, &endpoint, command, &CancellationToken::new())
        .await;

    Run {
        bridge,
        console,
        session,
        outcome,
    }
}

pub fn credential_hosts(calls: &[Call]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            Call::Credentials(check) => Some(check.host.clone()),
            _ => None,
        })
        .collect()
}

pub fn capability_of(call: &Call) -> Capability {
    match call {
        Call::Privilege => Capability::CheckAdminPrivilege,
        Call::Enable => Capability::EnableRemoteDesktop,
        Call::Disable => Capability::DisableRemoteDesktop,
        Call::Credentials(_) => Capability::CheckRemoteCredentials,
    }
}
