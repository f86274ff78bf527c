//! Root zone provisioning

use std::sync::Arc;

use chrono::Utc;
use dns_delegation_provider::ProviderError;
use dns_delegation_toolbox::{normalize_nameserver, normalize_set, validate_domain};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::RootZone;

/// Creates and validates the root hosted zone.
pub struct ZoneProvisioner {
    ctx: Arc<ServiceContext>,
}

impl ZoneProvisioner {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Profile to act as for the root account.
    ///
    /// An explicit selection wins; otherwise the first local profile authenticating as
    /// `account_id` is used. No match is a [`CoreError::ProfileNotFound`], which is
    /// expected the first time a new root account is introduced.
    pub async fn resolve_root_profile(
        &self,
        explicit: Option<&str>,
        account_id: &str,
    ) -> CoreResult<String> {
        if let Some(profile) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
            return Ok(profile.to_string());
        }
        self.ctx
            .credentials
            .require_profile_for_account(account_id)
            .await
    }

    /// Create the root zone for `domain`, reusing it if it already exists.
    pub async fn create_root_zone(&self, profile: &str, domain: &str) -> CoreResult<RootZone> {
        let domain = validate_domain(domain)?;
        let provider = self.ctx.provider(profile).await?;

        let caller_reference = format!("{domain}-{}", Utc::now().timestamp());
        let comment = format!("DNS zone for {domain}");

        let zone = match provider
            .create_hosted_zone(&domain, &caller_reference, &comment)
            .await
        {
            Ok(zone) => {
                log::info!("Created hosted zone {} for {domain}", zone.id);
                zone
            }
            Err(ProviderError::ZoneAlreadyExists { .. }) => {
                log::info!("Hosted zone for {domain} already exists, reusing it");
                provider
                    .find_hosted_zone_by_name(&domain)
                    .await?
                    .ok_or_else(|| ProviderError::ZoneNotFound {
                        provider: provider.id().to_string(),
                        zone: domain.clone(),
                        raw_message: Some(
                            "Zone reported as existing but not found by name".to_string(),
                        ),
                    })?
            }
            Err(e) => return Err(e.into()),
        };

        let nameservers = normalize_set(&provider.list_zone_nameservers(&zone.id).await?);
        Ok(RootZone {
            domain,
            zone_id: zone.id,
            nameservers,
        })
    }

    /// Read back an existing root zone and check it still serves `expected_domain`.
    pub async fn validate_existing_zone(
        &self,
        profile: &str,
        zone_id: &str,
        expected_domain: &str,
    ) -> CoreResult<RootZone> {
        let provider = self.ctx.provider(profile).await?;
        let zone = provider.get_hosted_zone(zone_id).await?;

        let actual = normalize_nameserver(&zone.name);
        let expected = normalize_nameserver(expected_domain);
        if actual != expected {
            return Err(CoreError::DomainMismatch {
                zone_id: zone.id,
                actual,
                expected,
            });
        }

        let nameservers = normalize_set(&provider.list_zone_nameservers(&zone.id).await?);
        Ok(RootZone {
            domain: actual,
            zone_id: zone.id,
            nameservers,
        })
    }
}
