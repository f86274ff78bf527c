//! Deployment environment types

use serde::{Deserialize, Serialize};

/// Environments known to the delegation workflow, in audit order.
pub const ENVIRONMENT_NAMES: [&str; 3] = ["dev", "staging", "prod"];

/// Environment that owns the root zone.
pub const ROOT_ENVIRONMENT: &str = "prod";

/// A deployment environment read from its configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub name: String,
    /// Credential profile used to reach the environment's account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_profile: Option<String>,
    /// Account ID recorded in the file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Environment {
    #[must_use]
    pub fn is_root(&self, root_environment: &str) -> bool {
        self.name == root_environment
    }
}

/// Fields of an environment's `domain` section the orchestrator owns.
///
/// Every other key of the environment document is left as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDomainUpdate {
    pub enabled: bool,
    /// Always the bare root domain, whatever the environment.
    pub domain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    pub create_domain_zone: bool,
    pub add_env_domain_prefix: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_account_id: Option<String>,
}

impl EnvironmentDomainUpdate {
    /// Root environment: the zone already exists and serves the bare domain.
    #[must_use]
    pub fn root(root_domain: &str, zone_id: &str) -> Self {
        Self {
            enabled: true,
            domain_name: root_domain.to_string(),
            zone_id: Some(zone_id.to_string()),
            create_domain_zone: false,
            add_env_domain_prefix: false,
            root_zone_id: None,
            root_account_id: None,
        }
    }

    /// Delegated environment: creates `<env>.<root>` and self-delegates into the root zone.
    #[must_use]
    pub fn delegated(root_domain: &str, root_zone_id: &str, root_account_id: &str) -> Self {
        Self {
            enabled: true,
            domain_name: root_domain.to_string(),
            zone_id: None,
            create_domain_zone: true,
            add_env_domain_prefix: true,
            root_zone_id: Some(root_zone_id.to_string()),
            root_account_id: Some(root_account_id.to_string()),
        }
    }

    /// Freshly created root environment, before its zone exists.
    #[must_use]
    pub fn pending_root(root_domain: &str) -> Self {
        Self {
            enabled: true,
            domain_name: root_domain.to_string(),
            zone_id: None,
            create_domain_zone: true,
            add_env_domain_prefix: false,
            root_zone_id: None,
            root_account_id: None,
        }
    }
}

/// Contents of a root environment file created by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRootEnvironment {
    pub account_id: String,
    pub aws_profile: String,
    pub region: String,
    pub domain: EnvironmentDomainUpdate,
}

/// Whether `s` is a 12-digit AWS account ID.
#[must_use]
pub fn is_valid_account_id(s: &str) -> bool {
    s.len() == 12 && s.bytes().all(|b| b.is_ascii_digit())
}
