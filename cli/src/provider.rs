//! Capability provider of the standalone binary.
//!
//! The managed endpoint is this machine. Privilege is read from the
//! effective user; every other capability runs an external provider program
//! with the capability name as its only argument. Arguments travel in
//! `RDPCTL_*` environment variables so credentials stay out of the process
//! list.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use rdpctl_common::capability::{
    Capability, CapabilityProvider, CredentialCheck, ManagedEndpoint, Platform,
};
use rdpctl_common::error::BridgeError;
use rdpctl_common::session::Relay;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

pub const ENV_ENDPOINT: &str = "RDPCTL_ENDPOINT";
pub const ENV_HOST: &str = "RDPCTL_HOST";
pub const ENV_USERNAME: &str = "RDPCTL_USERNAME";
pub const ENV_PASSWORD: &str = "RDPCTL_PASSWORD";
pub const ENV_DOMAIN: &str = "RDPCTL_DOMAIN";
pub const ENV_HASHES: &str = "RDPCTL_HASHES";

pub fn local_endpoint() -> ManagedEndpoint {
    let id = sys_info::hostname().unwrap_or_else(|_| "localhost".to_string());
    ManagedEndpoint::new(id, Platform::current())
}

pub struct ProcessProvider {
    program: PathBuf,
}

impl ProcessProvider {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs the provider program once, streaming its output into `out`.
    ///
    /// The child is killed if this future is dropped before it exits.
    async fn run(
        &self,
        capability: Capability,
        endpoint: &ManagedEndpoint,
        vars: &[(&str, &str)],
        out: &Relay,
    ) -> Result<(), BridgeError> {
        debug!(program = %self.program.display(), %capability, "spawning provider");

        let mut child = Command::new(&self.program)
            .arg(capability.name())
            .env(ENV_ENDPOINT, &endpoint.id)
            .envs(vars.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                BridgeError::Channel(format!("cannot start {}: {e}", self.program.display()))
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(BridgeError::Channel("provider output is not captured".into()));
        };
        let mut stdout = BufReader::new(stdout).lines();
        let mut stderr = BufReader::new(stderr).lines();

        let mut last_error: Option<String> = None;
        let (mut stdout_open, mut stderr_open) = (true, true);
        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout.next_line(), if stdout_open => match line {
                    Ok(Some(line)) => out.stdout(&line),
                    Ok(None) => stdout_open = false,
                    Err(e) => return Err(BridgeError::Channel(e.to_string())),
                },
                line = stderr.next_line(), if stderr_open => match line {
                    Ok(Some(line)) => {
                        out.stderr(&line);
                        if !line.trim().is_empty() {
                            last_error = Some(line);
                        }
                    }
                    Ok(None) => stderr_open = false,
                    Err(e) => return Err(BridgeError::Channel(e.to_string())),
                },
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| BridgeError::Channel(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(BridgeError::Remote(
                last_error.unwrap_or_else(|| format!("provider exited with {status}")),
            ))
        }
    }
}

#[async_trait]
impl CapabilityProvider for ProcessProvider {
    async fn check_admin_privilege(
        &self,
        endpoint: &ManagedEndpoint,
        _out: &Relay,
    ) -> Result<bool, BridgeError> {
        let elevated = is_root::is_root();
        debug!(endpoint = %endpoint.id, elevated, "effective user checked");
        Ok(elevated)
    }

    async fn enable_remote_desktop(
        &self,
        endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.run(Capability::EnableRemoteDesktop, endpoint, &[], out).await
    }

    async fn disable_remote_desktop(
        &self,
        endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        self.run(Capability::DisableRemoteDesktop, endpoint, &[], out).await
    }

    async fn check_remote_credentials(
        &self,
        endpoint: &ManagedEndpoint,
        check: &CredentialCheck,
        out: &Relay,
    ) -> Result<(), BridgeError> {
        let mut vars = vec![
            (ENV_HOST, check.host.as_str()),
            (ENV_USERNAME, check.username.as_str()),
            (ENV_PASSWORD, check.password.as_str()),
            (ENV_DOMAIN, check.domain.as_str()),
        ];
        if let Some(hashes) = check.hashes.as_deref() {
            vars.push((ENV_HASHES, hashes));
        }
        self.run(Capability::CheckRemoteCredentials, endpoint, &vars, out)
            .await
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
