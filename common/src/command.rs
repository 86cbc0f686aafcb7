//! # Operator Commands
//!
//! What the operator asked for, after argument parsing and before any
//! capability is touched.

use std::fmt;

use crate::capability::{Capability, CredentialCheck};
use crate::error::DispatchError;
use crate::network::target::TargetSpec;

pub const DEFAULT_DOMAIN: &str = "workgroup";

/// One operator invocation. Exactly one mode is active by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle remote desktop on the managed endpoint itself.
    LocalToggle { enable: bool, disable: bool },
    /// Check credentials against every host of a target.
    RemoteProbe(RemoteProbe),
}

/// The single mutation a local toggle performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Enable,
    Disable,
}

impl ToggleAction {
    /// Both flags set and no flag set are rejected alike; neither has an
    /// obvious meaning.
    pub fn from_flags(enable: bool, disable: bool) -> Result<Self, DispatchError> {
        match (enable, disable) {
            (true, false) => Ok(Self::Enable),
            (false, true) => Ok(Self::Disable),
            (true, true) => Err(DispatchError::ConflictingToggle),
            (false, false) => Err(DispatchError::NoToggleSelected),
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Self::Enable => Capability::EnableRemoteDesktop,
            Self::Disable => Capability::DisableRemoteDesktop,
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => f.write_str("enable"),
            Self::Disable => f.write_str("disable"),
        }
    }
}

/// Arguments of a credential sweep.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteProbe {
    pub target: TargetSpec,
    pub username: String,
    pub password: String,
    pub domain: String,
    pub hashes: Option<String>,
}

impl RemoteProbe {
    /// A probe with an empty password, the default domain and no hashes.
    pub fn new(target: TargetSpec, username: impl Into<String>) -> Self {
        Self {
            target,
            username: username.into(),
            password: String::new(),
            domain: DEFAULT_DOMAIN.to_string(),
            hashes: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_hashes(mut self, hashes: Option<String>) -> Self {
        self.hashes = hashes;
        self
    }

    /// The capability arguments for one host of the sweep.
    pub fn check_for(&self, host: &str) -> CredentialCheck {
        CredentialCheck {
            host: host.to_string(),
            username: self.username.clone(),
            password: self.password.clone(),
            domain: self.domain.clone(),
            hashes: self.hashes.clone(),
        }
    }
}

impl fmt::Debug for RemoteProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProbe")
            .field("target", &self.target)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .field("hashes", &self.hashes.as_ref().map(|_| "<redacted>"))
            .finish()
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
