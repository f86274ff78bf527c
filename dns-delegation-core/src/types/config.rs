//! 持久化的 DNS 委派配置 (`dns.yaml`)

use serde::{Deserialize, Serialize};

/// Propagation state of a delegated subdomain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegationStatus {
    /// NS records published, public DNS not yet confirmed.
    #[default]
    PendingPropagation,
    /// Public DNS returns the recorded nameservers.
    Active,
}

impl std::fmt::Display for DelegationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPropagation => write!(f, "pending_propagation"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Root account that owns the authoritative zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootAccount {
    pub account_id: String,
    /// Hosted zone ID without the `/hostedzone/` prefix.
    pub zone_id: String,
    pub delegation_role_arn: String,
}

/// A subdomain whose zone lives in another account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedZone {
    /// Fully-qualified subdomain (`dev.example.com`).
    pub subdomain: String,
    pub account_id: String,
    pub zone_id: String,
    /// Nameservers of the subdomain zone, as published in the root zone.
    #[serde(default)]
    pub ns_records: Vec<String>,
    #[serde(default)]
    pub status: DelegationStatus,
}

/// Durable DNS state.
///
/// There is exactly one root account per configuration, and it always belongs to the
/// production environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationConfig {
    /// Root domain, no trailing dot.
    pub root_domain: String,
    pub root_account: RootAccount,
    #[serde(default)]
    pub delegated_zones: Vec<DelegatedZone>,
}

impl DelegationConfig {
    /// Configuration for a freshly provisioned root zone.
    #[must_use]
    pub fn new(root_domain: impl Into<String>, root_account: RootAccount) -> Self {
        Self {
            root_domain: root_domain.into(),
            root_account,
            delegated_zones: Vec::new(),
        }
    }

    pub fn find_delegated_zone(&self, subdomain: &str) -> Option<&DelegatedZone> {
        self.delegated_zones
            .iter()
            .find(|z| z.subdomain == subdomain)
    }

    pub fn find_delegated_zone_mut(&mut self, subdomain: &str) -> Option<&mut DelegatedZone> {
        self.delegated_zones
            .iter_mut()
            .find(|z| z.subdomain == subdomain)
    }

    /// Remove a delegated zone. Returns `false` when it was not present.
    pub fn remove_delegated_zone(&mut self, subdomain: &str) -> bool {
        let before = self.delegated_zones.len();
        self.delegated_zones.retain(|z| z.subdomain != subdomain);
        self.delegated_zones.len() != before
    }

    /// Replace the entry with the same subdomain, or append.
    pub fn upsert_delegated_zone(&mut self, zone: DelegatedZone) {
        match self.find_delegated_zone_mut(&zone.subdomain) {
            Some(existing) => *existing = zone,
            None => self.delegated_zones.push(zone),
        }
    }
}

/// Single-use marker left behind when the wizard exits for credential setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeToken {
    pub domain: String,
    #[serde(rename = "accountID")]
    pub account_id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn zone(subdomain: &str, status: DelegationStatus) -> DelegatedZone {
        DelegatedZone {
            subdomain: subdomain.to_string(),
            account_id: "222222222222".to_string(),
            zone_id: "Z2".to_string(),
            ns_records: vec!["ns-1.awsdns-01.org".to_string()],
            status,
        }
    }

    #[test]
    fn upsert_replaces_by_subdomain() {
        let mut config = DelegationConfig::new("example.com", RootAccount::default());
        config.upsert_delegated_zone(zone("dev.example.com", DelegationStatus::PendingPropagation));
        config.upsert_delegated_zone(zone("staging.example.com", DelegationStatus::PendingPropagation));
        config.upsert_delegated_zone(zone("dev.example.com", DelegationStatus::Active));

        assert_eq!(config.delegated_zones.len(), 2);
        assert_eq!(
            config.find_delegated_zone("dev.example.com").unwrap().status,
            DelegationStatus::Active
        );
    }

    #[test]
    fn remove_reports_presence() {
        let mut config = DelegationConfig::new("example.com", RootAccount::default());
        config.upsert_delegated_zone(zone("dev.example.com", DelegationStatus::Active));

        assert!(config.remove_delegated_zone("dev.example.com"));
        assert!(!config.remove_delegated_zone("dev.example.com"));
        assert!(config.find_delegated_zone("dev.example.com").is_none());
    }

    #[test]
    fn yaml_layout() {
        let mut config = DelegationConfig::new(
            "example.com",
            RootAccount {
                account_id: "111111111111".to_string(),
                zone_id: "Z1".to_string(),
                delegation_role_arn: "arn:aws:iam::111111111111:role/dns-delegation-role"
                    .to_string(),
            },
        );
        config.upsert_delegated_zone(zone("dev.example.com", DelegationStatus::PendingPropagation));

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("rootDomain: example.com"));
        assert!(yaml.contains("delegationRoleArn:"));
        assert!(yaml.contains("nsRecords:"));
        assert!(yaml.contains("status: pending_propagation"));

        let back: DelegationConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn delegated_zones_default_to_empty() {
        let yaml = "rootDomain: example.com\nrootAccount:\n  accountId: '111111111111'\n  zoneId: Z1\n  delegationRoleArn: ''\n";
        let config: DelegationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.delegated_zones.is_empty());
    }

    #[test]
    fn resume_token_keys() {
        let token = ResumeToken {
            domain: "example.com".to_string(),
            account_id: "123456789012".to_string(),
        };
        let yaml = serde_yaml::to_string(&token).unwrap();
        assert!(yaml.contains("accountID:"));
    }
}
