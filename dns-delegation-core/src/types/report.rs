//! Result types returned by the services

use std::collections::BTreeMap;

use serde::Serialize;

use super::config::{DelegatedZone, DelegationConfig};

/// Root zone as provisioned or read back from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootZone {
    pub domain: String,
    pub zone_id: String,
    /// Normalized and sorted.
    pub nameservers: Vec<String>,
}

/// Outcome of ensuring the delegation role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOutcome {
    pub arn: String,
    /// The role could not be created or updated and `arn` is a stand-in.
    pub placeholder: bool,
    /// Reason shown to the user when `placeholder` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Permission state of one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionStatus {
    pub environment: String,
    /// `None` when no account could be resolved; such environments never have access.
    pub account_id: Option<String>,
    pub has_access: bool,
}

/// Full audit result, one entry per non-root environment in audit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAudit {
    pub statuses: Vec<PermissionStatus>,
}

impl PermissionAudit {
    #[must_use]
    pub fn by_environment(&self) -> BTreeMap<String, bool> {
        self.statuses
            .iter()
            .map(|s| (s.environment.clone(), s.has_access))
            .collect()
    }

    /// Environments without access, in audit order.
    #[must_use]
    pub fn missing(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|s| !s.has_access)
            .map(|s| s.environment.clone())
            .collect()
    }

    #[must_use]
    pub fn all_granted(&self) -> bool {
        self.statuses.iter().all(|s| s.has_access)
    }
}

/// Live nameservers of one name, or why they could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverLookupResult {
    pub name: String,
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot printed by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub config: DelegationConfig,
    pub root: NameserverLookupResult,
    pub delegated: Vec<NameserverLookupResult>,
}

/// Verdict for one delegated zone during `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneValidation {
    pub zone: DelegatedZone,
    pub observed: Vec<String>,
    pub matches: bool,
    /// Status moved from pending to active during this run.
    pub promoted: bool,
}

/// Findings of `validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub root_nameservers: Vec<String>,
    pub root_propagated: bool,
    pub zones: Vec<ZoneValidation>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }
}

/// What `remove` managed to clean up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOutcome {
    pub subdomain: String,
    pub ns_records_removed: bool,
    pub zone_deleted: bool,
    /// Non-fatal failures, in the order they happened.
    pub errors: Vec<String>,
}
