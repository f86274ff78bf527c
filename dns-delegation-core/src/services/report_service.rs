//! Status and validation reports over the persisted configuration

use std::sync::Arc;

use dns_delegation_toolbox::{PropagationVerifier, ToolboxError, normalize_set};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{
    DelegationConfig, DelegationStatus, NameserverLookupResult, StatusReport, ValidationReport,
    ZoneValidation,
};

/// Read-mostly reports; `validate` also promotes delegations that have propagated.
pub struct ReportService {
    ctx: Arc<ServiceContext>,
    verifier: PropagationVerifier,
}

impl ReportService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, verifier: PropagationVerifier) -> Self {
        Self { ctx, verifier }
    }

    /// Configuration plus the live nameservers of every configured name.
    /// `None` when no configuration exists.
    pub async fn status(&self) -> CoreResult<Option<StatusReport>> {
        let Some(config) = self.ctx.config_store.load().await? else {
            return Ok(None);
        };

        let root = self.lookup(&config.root_domain).await;
        let mut delegated = Vec::with_capacity(config.delegated_zones.len());
        for zone in &config.delegated_zones {
            delegated.push(self.lookup(&zone.subdomain).await);
        }

        Ok(Some(StatusReport {
            config,
            root,
            delegated,
        }))
    }

    /// Check the root domain and every delegated zone against live DNS.
    ///
    /// Delegations whose live nameservers match their recorded set are promoted from
    /// pending to active and the configuration is saved. `None` when no configuration
    /// exists.
    pub async fn validate(&self) -> CoreResult<Option<ValidationReport>> {
        let Some(mut config) = self.ctx.config_store.load().await? else {
            return Ok(None);
        };
        let mut report = ValidationReport::default();

        self.validate_root(&config, &mut report).await;

        let mut promoted_any = false;
        for zone in &mut config.delegated_zones {
            let check = self
                .verifier
                .check_propagation(&zone.subdomain, &zone.ns_records)
                .await;

            if check.observed.is_empty() {
                report
                    .issues
                    .push(format!("No nameservers found for {}", zone.subdomain));
            } else if !check.propagated {
                report.warnings.push(format!(
                    "NS records for {} don't match expected values",
                    zone.subdomain
                ));
            }

            let promoted = check.propagated && zone.status == DelegationStatus::PendingPropagation;
            if promoted {
                zone.status = DelegationStatus::Active;
                promoted_any = true;
                log::info!("{} is now active", zone.subdomain);
            }
            report.zones.push(ZoneValidation {
                zone: zone.clone(),
                observed: check.observed,
                matches: check.propagated,
                promoted,
            });
        }

        if promoted_any {
            self.ctx.config_store.save(&config).await?;
        }
        Ok(Some(report))
    }

    async fn validate_root(&self, config: &DelegationConfig, report: &mut ValidationReport) {
        let root = self.lookup(&config.root_domain).await;
        match (&root.error, root.nameservers.is_empty()) {
            (Some(e), _) => report.issues.push(format!(
                "Failed to query nameservers for {}: {e}",
                config.root_domain
            )),
            (None, true) => report
                .issues
                .push(format!("No nameservers found for {}", config.root_domain)),
            (None, false) => {}
        }
        report.root_nameservers = root.nameservers;

        let expected = match self.root_zone_nameservers(config).await {
            Ok(ns) => ns,
            Err(e) => {
                report.warnings.push(format!(
                    "Could not read root zone nameservers, propagation not verified: {e}"
                ));
                return;
            }
        };

        let check = self
            .verifier
            .check_propagation(&config.root_domain, &expected)
            .await;
        report.root_propagated = check.propagated;
        if !check.propagated && !report.root_nameservers.is_empty() {
            report.issues.push(format!(
                "{} does not resolve to the root zone's nameservers yet",
                config.root_domain
            ));
        }
    }

    async fn root_zone_nameservers(&self, config: &DelegationConfig) -> CoreResult<Vec<String>> {
        let profile = self
            .ctx
            .credentials
            .require_profile_for_account(&config.root_account.account_id)
            .await?;
        let provider = self.ctx.provider(&profile).await?;
        Ok(normalize_set(
            &provider
                .list_zone_nameservers(&config.root_account.zone_id)
                .await?,
        ))
    }

    async fn lookup(&self, name: &str) -> NameserverLookupResult {
        let mut trace = Vec::new();
        match self.verifier.query_nameservers(name, &mut trace).await {
            Ok(observed) => NameserverLookupResult {
                name: name.to_string(),
                nameservers: observed.nameservers,
                error: None,
            },
            Err(ToolboxError::NoAnswer(_)) => NameserverLookupResult {
                name: name.to_string(),
                nameservers: Vec::new(),
                error: None,
            },
            Err(e) => {
                log::debug!("NS lookup for {name} failed: {}", trace.join(" | "));
                NameserverLookupResult {
                    name: name.to_string(),
                    nameservers: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
