//! 向导会话状态
//!
//! Everything the wizard learns while it runs. Only the update layer writes to it.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use dns_delegation_core::services::SaveConfigurationRequest;
use dns_delegation_core::types::{
    DebugLog, DelegationConfig, Environment, PermissionAudit, PermissionStatus,
};
use dns_delegation_toolbox::LookupSource;

use super::steps::SetupSteps;

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub root_domain: String,
    pub root_account_id: String,
    /// Profile acting as the root account, once known.
    pub root_profile: Option<String>,
    /// Root environment file, once loaded.
    pub root_environment: Option<Environment>,
    pub zone_id: String,
    /// Root zone nameservers, normalized and sorted.
    pub nameservers: Vec<String>,
    pub delegation_role_arn: String,
    /// Set when the delegation role is a placeholder.
    pub role_warning: Option<String>,

    /// Per-environment audit results in audit order.
    pub environments: Vec<PermissionStatus>,
    pub permission_by_environment: BTreeMap<String, bool>,
    pub missing_permissions: BTreeSet<String>,
    /// Number of environments the running audit covers.
    pub audit_total: Option<usize>,
    pub audit_running: bool,
    /// Last remediation failure, shown with a retry-or-skip choice.
    pub fix_error: Option<String>,

    pub propagated: bool,
    pub observed_nameservers: Vec<String>,
    pub cache_ttl: Duration,
    /// Where the last answer came from.
    pub last_source: Option<LookupSource>,
    /// A propagation check is in flight.
    pub checking: bool,
    /// Completed propagation checks.
    pub checks: u32,
    pub debug_log: DebugLog,

    /// The configuration being viewed, when the wizard started from `dns.yaml`.
    pub existing: Option<DelegationConfig>,
    pub steps: SetupSteps,
}

impl WizardSession {
    pub fn new(debug_log_cap: usize) -> Self {
        Self {
            root_domain: String::new(),
            root_account_id: String::new(),
            root_profile: None,
            root_environment: None,
            zone_id: String::new(),
            nameservers: Vec::new(),
            delegation_role_arn: String::new(),
            role_warning: None,
            environments: Vec::new(),
            permission_by_environment: BTreeMap::new(),
            missing_permissions: BTreeSet::new(),
            audit_total: None,
            audit_running: false,
            fix_error: None,
            propagated: false,
            observed_nameservers: Vec::new(),
            cache_ttl: Duration::ZERO,
            last_source: None,
            checking: false,
            checks: 0,
            debug_log: DebugLog::with_cap(debug_log_cap),
            existing: None,
            steps: SetupSteps::default(),
        }
    }

    /// Whether the wizard is showing an existing configuration rather than creating one.
    pub fn is_existing(&self) -> bool {
        self.existing.is_some()
    }

    /// Fill the root zone fields from an existing configuration.
    pub fn load_existing(&mut self, config: DelegationConfig) {
        self.root_domain.clone_from(&config.root_domain);
        self.root_account_id
            .clone_from(&config.root_account.account_id);
        self.zone_id.clone_from(&config.root_account.zone_id);
        self.delegation_role_arn
            .clone_from(&config.root_account.delegation_role_arn);
        self.existing = Some(config);
    }

    /// Record a finished audit.
    pub fn apply_audit(&mut self, audit: &PermissionAudit) {
        self.environments.clone_from(&audit.statuses);
        self.permission_by_environment = audit.by_environment();
        self.missing_permissions = audit.missing().into_iter().collect();
        self.audit_total = Some(audit.statuses.len());
        self.audit_running = false;
    }

    /// Record one environment of a running audit.
    pub fn apply_audit_progress(&mut self, index: usize, total: usize, status: PermissionStatus) {
        self.audit_total = Some(total);
        if index < self.environments.len() {
            self.environments[index] = status;
        } else {
            self.environments.push(status);
        }
    }

    /// Reset audit state before a new audit.
    pub fn begin_audit(&mut self) {
        self.environments.clear();
        self.permission_by_environment.clear();
        self.missing_permissions.clear();
        self.audit_total = None;
        self.audit_running = true;
    }

    /// Request for the configuration checkpoint. `None` until the root profile is known.
    pub fn save_request(&self) -> Option<SaveConfigurationRequest> {
        let profile = self.root_profile.clone()?;
        Some(SaveConfigurationRequest {
            root_domain: self.root_domain.clone(),
            account_id: self.root_account_id.clone(),
            profile,
            zone_id: self.zone_id.clone(),
            delegation_role_arn: self.delegation_role_arn.clone(),
        })
    }
}
