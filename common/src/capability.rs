//! # Capability Provider Boundary
//!
//! The remote execution bridge, expressed as a fixed set of capabilities.
//!
//! The dispatcher never looks capabilities up by name on a live connection;
//! whatever sits behind the channel (an RPC client, a helper program, a test
//! stub) implements [`CapabilityProvider`] and is injected.

use std::fmt;

use async_trait::async_trait;

use crate::error::BridgeError;
use crate::session::Relay;

/// Operating system family reported by a managed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    Other(String),
}

impl Platform {
    /// Maps an OS identifier such as [`std::env::consts::OS`].
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::Darwin,
            other => Self::Other(other.to_string()),
        }
    }

    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Only Windows hosts the remote-desktop service the local toggle controls.
    pub fn hosts_remote_desktop(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::Linux => f.write_str("linux"),
            Self::Darwin => f.write_str("darwin"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Borrowed handle to an already established control channel.
///
/// Created and torn down by the session manager; the dispatcher only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedEndpoint {
    pub id: String,
    pub platform: Platform,
}

impl ManagedEndpoint {
    pub fn new(id: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: id.into(),
            platform,
        }
    }
}

/// Every capability the dispatcher may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CheckAdminPrivilege,
    EnableRemoteDesktop,
    DisableRemoteDesktop,
    CheckRemoteCredentials,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Self::CheckAdminPrivilege => "check_admin_privilege",
            Self::EnableRemoteDesktop => "enable_remote_desktop",
            Self::DisableRemoteDesktop => "disable_remote_desktop",
            Self::CheckRemoteCredentials => "check_remote_credentials",
        }
    }

    /// Whether invoking it changes state on the endpoint.
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::EnableRemoteDesktop | Self::DisableRemoteDesktop)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments of `check_remote_credentials`.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialCheck {
    pub host: String,
    pub username: String,
    pub password: String,
    pub domain: String,
    pub hashes: Option<String>,
}

// Secrets stay out of logs.
impl fmt::Debug for CredentialCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCheck")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .field("hashes", &self.hashes.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The remote execution bridge.
///
/// Every call may write to `out` while it runs; the dispatcher has already
/// redirected that stream to the operator when the call starts.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Reports whether the endpoint runs with elevated rights.
    async fn check_admin_privilege(
        &self,
        endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<bool, BridgeError>;

    async fn enable_remote_desktop(
        &self,
        endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError>;

    async fn disable_remote_desktop(
        &self,
        endpoint: &ManagedEndpoint,
        out: &Relay,
    ) -> Result<(), BridgeError>;

    /// Validates credentials against `check.host`, which is independent of
    /// the endpoint the call is routed through.
    async fn check_remote_credentials(
        &self,
        endpoint: &ManagedEndpoint,
        check: &CredentialCheck,
        out: &Relay,
    ) -> Result<(), BridgeError>;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
