//! # Capability Gate
//!
//! Preconditions of the local toggle. The platform is checked first and
//! needs no call; only a Windows endpoint is asked about its privileges.
//! A broken privilege check is an error, not a denial.

use rdpctl_common::capability::{Capability, CapabilityProvider, ManagedEndpoint, Platform};
use rdpctl_common::error::DispatchError;

use crate::call::CallScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Denied(Denial),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    UnsupportedPlatform(Platform),
    InsufficientPrivilege,
}

impl From<Denial> for DispatchError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::UnsupportedPlatform(platform) => DispatchError::UnsupportedPlatform(platform),
            Denial::InsufficientPrivilege => DispatchError::InsufficientPrivilege,
        }
    }
}

pub struct CapabilityGate<'a> {
    provider: &'a dyn CapabilityProvider,
}

impl<'a> CapabilityGate<'a> {
    pub fn new(provider: &'a dyn CapabilityProvider) -> Self {
        Self { provider }
    }

    pub async fn authorize(
        &self,
        scope: CallScope<'_>,
        endpoint: &ManagedEndpoint,
    ) -> Result<Authorization, DispatchError> {
        if !endpoint.platform.hosts_remote_desktop() {
            return Ok(Authorization::Denied(Denial::UnsupportedPlatform(
                endpoint.platform.clone(),
            )));
        }

        let provider = self.provider;
        let capability = Capability::CheckAdminPrivilege;
        let elevated = scope
            .invoke(capability, label(capability, endpoint), |out| async move {
                provider.check_admin_privilege(endpoint, &out).await
            })
            .await?;

        if elevated {
            Ok(Authorization::Authorized)
        } else {
            Ok(Authorization::Denied(Denial::InsufficientPrivilege))
        }
    }
}

pub(crate) fn label(capability: Capability, endpoint: &ManagedEndpoint) -> String {
    format!("{capability}@{}", endpoint.id)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
