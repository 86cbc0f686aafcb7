//! Error taxonomy of the dispatcher.
//!
//! [`BridgeError`] is what a capability provider reports about a single call.
//! [`DispatchError`] is what the dispatcher reports to the operator; bridge
//! failures are folded into it with the capability that produced them.

use std::time::Duration;

use thiserror::Error;

use crate::capability::{Capability, Platform};

/// Failure of one call across the remote execution boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The control channel is unreachable or broke mid-call.
    #[error("channel error: {0}")]
    Channel(String),

    /// The far-end capability ran and failed (e.g. authentication rejected).
    #[error("remote error: {0}")]
    Remote(String),

    /// The call did not complete within its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    // ── Input ────────────────────────────────────────────────────
    #[error("invalid target specification '{spec}': {reason}")]
    InvalidSpecification { spec: String, reason: String },

    /// Both `--enable` and `--disable` were requested.
    #[error("--enable and --disable are mutually exclusive")]
    ConflictingToggle,

    /// Neither `--enable` nor `--disable` was requested.
    #[error("one of --enable or --disable is required")]
    NoToggleSelected,

    // ── Authorization ────────────────────────────────────────────
    #[error("this option could be used only on windows hosts (endpoint reports {0})")]
    UnsupportedPlatform(Platform),

    #[error("admin privileges are required")]
    InsufficientPrivilege,

    // ── Bridge ───────────────────────────────────────────────────
    #[error("{capability}: channel error: {message}")]
    ChannelError {
        capability: Capability,
        message: String,
    },

    #[error("{capability} failed: {message}")]
    RemoteCapabilityError {
        capability: Capability,
        message: String,
    },

    #[error("{capability} timed out after {after:?}")]
    Timeout {
        capability: Capability,
        after: Duration,
    },

    #[error("{capability} was cancelled by the operator")]
    Cancelled { capability: Capability },
}

impl DispatchError {
    /// Attributes a bridge failure to the capability that produced it.
    pub fn from_bridge(capability: Capability, err: BridgeError) -> Self {
        match err {
            BridgeError::Channel(message) => Self::ChannelError {
                capability,
                message,
            },
            BridgeError::Remote(message) => Self::RemoteCapabilityError {
                capability,
                message,
            },
            BridgeError::Timeout(after) => Self::Timeout { capability, after },
        }
    }

    /// Whether this error came from an authorization decision rather than a
    /// broken call.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform(_) | Self::InsufficientPrivilege
        )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_errors_keep_their_capability() {
        let err = DispatchError::from_bridge(
            Capability::CheckAdminPrivilege,
            BridgeError::Channel("connection reset".into()),
        );
        assert!(matches!(
            err,
            DispatchError::ChannelError {
                capability: Capability::CheckAdminPrivilege,
                ..
            }
        ));
        assert!(err.to_string().contains("check_admin_privilege"));
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_denial());
    }

    #[test]
    fn timeouts_map_to_timeout() {
        let after = Duration::from_secs(3);
        let err = DispatchError::from_bridge(
            Capability::CheckRemoteCredentials,
            BridgeError::Timeout(after),
        );
        assert_eq!(
            err,
            DispatchError::Timeout {
                capability: Capability::CheckRemoteCredentials,
                after
            }
        );
    }

    #[test]
    fn denials_are_flagged() {
        assert!(DispatchError::InsufficientPrivilege.is_denial());
        assert!(DispatchError::UnsupportedPlatform(Platform::Linux).is_denial());
        assert!(!DispatchError::ConflictingToggle.is_denial());
    }
}
