//! Configuration checkpoints
//!
//! Everything the wizard persists goes through here: `dns.yaml`, the environment files'
//! `domain` sections and the resume token.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{PermissionAuditService, ServiceContext};
use crate::types::{
    DelegationConfig, Environment, EnvironmentDomainUpdate, NewRootEnvironment, ResumeToken,
    RootAccount,
};

/// Region written into a new root environment when the profile has none.
const DEFAULT_REGION: &str = "us-east-1";

/// Everything needed to write the final configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfigurationRequest {
    pub root_domain: String,
    pub account_id: String,
    pub profile: String,
    pub zone_id: String,
    pub delegation_role_arn: String,
}

/// 配置检查点服务
pub struct ConfigurationService {
    ctx: Arc<ServiceContext>,
}

impl ConfigurationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Existing DNS configuration, if any.
    pub async fn load_existing(&self) -> CoreResult<Option<DelegationConfig>> {
        self.ctx.config_store.load().await
    }

    /// The root environment, if its file exists.
    pub async fn load_root_environment(&self) -> CoreResult<Option<Environment>> {
        self.ctx.environments.load(&self.ctx.root_environment).await
    }

    /// Remember an in-progress root setup across a restart.
    pub async fn save_resume_token(&self, domain: &str, account_id: &str) -> CoreResult<()> {
        self.ctx
            .resume_tokens
            .save(&ResumeToken {
                domain: domain.to_string(),
                account_id: account_id.to_string(),
            })
            .await
    }

    /// Read and delete the resume token.
    pub async fn take_resume_token(&self) -> CoreResult<Option<ResumeToken>> {
        let token = self.ctx.resume_tokens.take().await?;
        if let Some(t) = &token {
            log::info!("Resuming root setup for {} ({})", t.domain, t.account_id);
        }
        Ok(token)
    }

    /// Create the root environment file unless it already exists.
    ///
    /// Returns whether a file was created.
    pub async fn ensure_root_environment(
        &self,
        root_domain: &str,
        account_id: &str,
        profile: &str,
    ) -> CoreResult<bool> {
        if self.load_root_environment().await?.is_some() {
            return Ok(false);
        }

        let region = match self.ctx.provider(profile).await {
            Ok(provider) if !provider.region().is_empty() => provider.region().to_string(),
            Ok(_) => DEFAULT_REGION.to_string(),
            Err(e) => {
                log::warn!("Could not read region of profile {profile}: {e}");
                DEFAULT_REGION.to_string()
            }
        };

        let env = NewRootEnvironment {
            account_id: account_id.to_string(),
            aws_profile: profile.to_string(),
            region,
            domain: EnvironmentDomainUpdate::pending_root(root_domain),
        };
        self.ctx
            .environments
            .create_root(&self.ctx.root_environment, &env)
            .await?;
        log::info!("Created {}.yaml for account {account_id}", self.ctx.root_environment);
        Ok(true)
    }

    /// Write the final configuration.
    ///
    /// The profile must still authenticate as the selected root account. Delegated zones
    /// already recorded for the same root domain are kept. The root environment and every
    /// delegated environment on disk get their `domain` section. Environment file updates
    /// are best-effort: failures are logged and do not fail the save.
    pub async fn save_configuration(
        &self,
        req: &SaveConfigurationRequest,
    ) -> CoreResult<DelegationConfig> {
        if req.account_id.is_empty() || req.profile.is_empty() {
            return Err(CoreError::Configuration(
                "missing account ID or profile information".to_string(),
            ));
        }

        let actual = self.ctx.credentials.account_id(&req.profile).await?;
        if actual != req.account_id {
            return Err(CoreError::AccountMismatch {
                profile: req.profile.clone(),
                actual,
                expected: req.account_id.clone(),
            });
        }

        let delegated_zones = match self.ctx.config_store.load().await? {
            Some(existing) if existing.root_domain == req.root_domain => existing.delegated_zones,
            _ => Vec::new(),
        };
        let config = DelegationConfig {
            root_domain: req.root_domain.clone(),
            root_account: RootAccount {
                account_id: req.account_id.clone(),
                zone_id: req.zone_id.clone(),
                delegation_role_arn: req.delegation_role_arn.clone(),
            },
            delegated_zones,
        };
        self.ctx.config_store.save(&config).await?;
        log::info!("Saved DNS configuration for {}", config.root_domain);

        self.update_environment(
            &self.ctx.root_environment,
            &EnvironmentDomainUpdate::root(&req.root_domain, &req.zone_id),
        )
        .await;
        // Every other environment on disk creates its own subdomain zone and
        // self-delegates into the root zone.
        let delegated = EnvironmentDomainUpdate::delegated(&req.root_domain, &req.zone_id, &req.account_id);
        match PermissionAuditService::new(self.ctx.clone())
            .delegated_environments()
            .await
        {
            Ok(environments) => {
                for env in &environments {
                    self.update_environment(&env.name, &delegated).await;
                }
            }
            Err(e) => log::warn!("Could not list environments to update: {e}"),
        }

        Ok(config)
    }

    async fn update_environment(&self, name: &str, update: &EnvironmentDomainUpdate) {
        if let Err(e) = self.ctx.environments.update_domain(name, update).await {
            log::warn!("Could not update {name}.yaml: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{
        DEV_ACCOUNT, ROOT_ACCOUNT, ROOT_PROFILE, STAGING_ACCOUNT, create_test_context, env,
    };
    use crate::types::{DelegatedZone, DelegationStatus};

    fn request() -> SaveConfigurationRequest {
        SaveConfigurationRequest {
            root_domain: "example.com".to_string(),
            account_id: ROOT_ACCOUNT.to_string(),
            profile: ROOT_PROFILE.to_string(),
            zone_id: "Z1".to_string(),
            delegation_role_arn: "arn:aws:iam::999999999999:role/dns-delegation-role".to_string(),
        }
    }

    #[tokio::test]
    async fn save_writes_config_and_environments() {
        let t = create_test_context();
        t.environments.insert(env("dev", Some(DEV_ACCOUNT), Some("dev"))).await;
        t.environments.insert(env("staging", Some(STAGING_ACCOUNT), Some("staging"))).await;
        let service = ConfigurationService::new(t.ctx.clone());

        let config = service.save_configuration(&request()).await.unwrap();
        assert_eq!(t.config_store.get().await, Some(config.clone()));
        assert_eq!(config.root_account.zone_id, "Z1");

        let prod = t.environments.domain_update("prod").await.unwrap();
        assert_eq!(prod, EnvironmentDomainUpdate::root("example.com", "Z1"));
        for name in ["dev", "staging"] {
            let update = t.environments.domain_update(name).await.unwrap();
            assert_eq!(
                update,
                EnvironmentDomainUpdate::delegated("example.com", "Z1", ROOT_ACCOUNT),
                "{name}"
            );
        }
    }

    #[tokio::test]
    async fn save_skips_environments_without_a_file() {
        let t = create_test_context();
        t.environments.insert(env("staging", Some(STAGING_ACCOUNT), None)).await;
        let service = ConfigurationService::new(t.ctx.clone());

        service.save_configuration(&request()).await.unwrap();
        assert!(t.environments.domain_update("staging").await.is_some());
        assert!(t.environments.domain_update("dev").await.is_none());
    }

    #[tokio::test]
    async fn save_rejects_wrong_account() {
        let t = create_test_context();
        let service = ConfigurationService::new(t.ctx.clone());

        let mut req = request();
        req.account_id = DEV_ACCOUNT.to_string();
        let err = service.save_configuration(&req).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("profile {ROOT_PROFILE} has account ID {ROOT_ACCOUNT} but expected {DEV_ACCOUNT}")
        );
        assert!(t.config_store.get().await.is_none());
    }

    #[tokio::test]
    async fn environment_failures_do_not_fail_save() {
        let t = create_test_context();
        t.environments.fail_updates(true).await;
        let service = ConfigurationService::new(t.ctx.clone());

        assert!(service.save_configuration(&request()).await.is_ok());
        assert!(t.config_store.get().await.is_some());
    }

    #[tokio::test]
    async fn delegated_zones_survive_resave() {
        let t = create_test_context();
        let service = ConfigurationService::new(t.ctx.clone());
        let mut existing = service.save_configuration(&request()).await.unwrap();
        existing.upsert_delegated_zone(DelegatedZone {
            subdomain: "dev.example.com".to_string(),
            account_id: DEV_ACCOUNT.to_string(),
            zone_id: "Z2".to_string(),
            ns_records: vec![],
            status: DelegationStatus::Active,
        });
        t.config_store.set(existing).await;

        let config = service.save_configuration(&request()).await.unwrap();
        assert_eq!(config.delegated_zones.len(), 1);

        let mut other = request();
        other.root_domain = "other.org".to_string();
        let config = service.save_configuration(&other).await.unwrap();
        assert!(config.delegated_zones.is_empty());
    }

    #[tokio::test]
    async fn root_environment_created_once() {
        let t = create_test_context();
        let service = ConfigurationService::new(t.ctx.clone());

        assert!(
            service
                .ensure_root_environment("example.com", ROOT_ACCOUNT, ROOT_PROFILE)
                .await
                .unwrap()
        );
        let created = t.environments.created_root("prod").await.unwrap();
        assert_eq!(created.region, "eu-west-1");
        assert_eq!(created.aws_profile, ROOT_PROFILE);
        assert!(created.domain.create_domain_zone);

        assert!(
            !service
                .ensure_root_environment("example.com", ROOT_ACCOUNT, ROOT_PROFILE)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn existing_root_environment_is_left_alone() {
        let t = create_test_context();
        t.environments.insert(env("prod", Some(ROOT_ACCOUNT), None)).await;
        let service = ConfigurationService::new(t.ctx.clone());

        assert!(
            !service
                .ensure_root_environment("example.com", ROOT_ACCOUNT, ROOT_PROFILE)
                .await
                .unwrap()
        );
        assert!(t.environments.created_root("prod").await.is_none());
    }

    #[tokio::test]
    async fn resume_token_is_single_use() {
        let t = create_test_context();
        let service = ConfigurationService::new(t.ctx.clone());

        service
            .save_resume_token("example.com", ROOT_ACCOUNT)
            .await
            .unwrap();
        let token = service.take_resume_token().await.unwrap().unwrap();
        assert_eq!(token.domain, "example.com");
        assert_eq!(token.account_id, ROOT_ACCOUNT);
        assert!(service.take_resume_token().await.unwrap().is_none());
    }
}
