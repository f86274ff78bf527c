//! Subdomain delegation bookkeeping

use std::sync::Arc;

use dns_delegation_provider::NsRecordRequest;
use dns_delegation_toolbox::{normalize_set, validate_domain};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{DelegatedZone, DelegationConfig, DelegationStatus, RemovalOutcome};

/// TTL of delegation NS records in the root zone.
const DELEGATION_NS_TTL: i64 = 300;

/// Publishes and withdraws subdomain delegations in the root zone.
pub struct DelegationService {
    ctx: Arc<ServiceContext>,
}

impl DelegationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Publish `subdomain`'s nameservers into the root zone and record the delegation
    /// as pending propagation.
    pub async fn delegate_subdomain(
        &self,
        root_profile: &str,
        subdomain: &str,
        account_id: &str,
        zone_id: &str,
        nameservers: &[String],
    ) -> CoreResult<DelegatedZone> {
        let subdomain = validate_domain(subdomain)?;
        let mut config = self.require_config().await?;
        if !subdomain.ends_with(&format!(".{}", config.root_domain)) {
            return Err(CoreError::ValidationError(format!(
                "{subdomain} is not a subdomain of {}",
                config.root_domain
            )));
        }
        let nameservers = normalize_set(nameservers);
        if nameservers.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "No nameservers to delegate {subdomain} to"
            )));
        }

        let provider = self.ctx.provider(root_profile).await?;
        provider
            .upsert_ns_records(&NsRecordRequest {
                zone_id: config.root_account.zone_id.clone(),
                record_name: subdomain.clone(),
                nameservers: nameservers.clone(),
                ttl: DELEGATION_NS_TTL,
                comment: Some(format!("Delegation for {subdomain}")),
            })
            .await?;

        let zone = DelegatedZone {
            subdomain,
            account_id: account_id.to_string(),
            zone_id: zone_id.to_string(),
            ns_records: nameservers,
            status: DelegationStatus::PendingPropagation,
        };
        config.upsert_delegated_zone(zone.clone());
        self.ctx.config_store.save(&config).await?;
        log::info!("Delegated {} to account {}", zone.subdomain, zone.account_id);
        Ok(zone)
    }

    /// Withdraw a delegation: delete its NS records from the root zone, delete the
    /// subdomain's hosted zone, then drop it from the configuration.
    ///
    /// A missing root profile aborts before anything is touched. Failures of the two
    /// provider steps are collected in the outcome and do not stop the removal.
    pub async fn remove_subdomain(&self, subdomain: &str) -> CoreResult<RemovalOutcome> {
        let mut config = self.require_config().await?;
        let zone = config
            .find_delegated_zone(subdomain)
            .cloned()
            .ok_or_else(|| CoreError::SubdomainNotFound(subdomain.to_string()))?;

        let root_profile = self
            .ctx
            .credentials
            .require_profile_for_account(&config.root_account.account_id)
            .await?;

        let mut outcome = RemovalOutcome {
            subdomain: subdomain.to_string(),
            ..RemovalOutcome::default()
        };

        let root_provider = self.ctx.provider(&root_profile).await?;
        match root_provider
            .delete_ns_records(&config.root_account.zone_id, subdomain)
            .await
        {
            Ok(()) => outcome.ns_records_removed = true,
            Err(e) => outcome
                .errors
                .push(format!("Failed to remove NS records: {e}")),
        }

        if !zone.zone_id.is_empty() {
            match self.delete_subdomain_zone(&zone).await {
                Ok(()) => outcome.zone_deleted = true,
                Err(e) => outcome
                    .errors
                    .push(format!("Failed to delete zone {}: {e}", zone.zone_id)),
            }
        }

        if config.remove_delegated_zone(subdomain) {
            self.ctx.config_store.save(&config).await?;
        }
        Ok(outcome)
    }

    async fn delete_subdomain_zone(&self, zone: &DelegatedZone) -> CoreResult<()> {
        let profile = self
            .ctx
            .credentials
            .require_profile_for_account(&zone.account_id)
            .await?;
        let provider = self.ctx.provider(&profile).await?;
        provider.delete_hosted_zone(&zone.zone_id).await?;
        Ok(())
    }

    async fn require_config(&self) -> CoreResult<DelegationConfig> {
        self.ctx
            .config_store
            .load()
            .await?
            .ok_or_else(|| CoreError::Configuration("No DNS configuration found".to_string()))
    }
}
