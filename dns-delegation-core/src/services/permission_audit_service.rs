//! Environment permission audit
//!
//! Checks, one environment at a time, whether each non-root environment's account is
//! trusted by the delegation role, and widens the trust for those that are not.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{DelegationRoleService, ServiceContext};
use crate::types::{ENVIRONMENT_NAMES, Environment, PermissionAudit, PermissionStatus};

/// Environment permission auditor
pub struct PermissionAuditService {
    ctx: Arc<ServiceContext>,
    roles: DelegationRoleService,
}

impl PermissionAuditService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let roles = DelegationRoleService::new(ctx.clone());
        Self { ctx, roles }
    }

    /// All known environments that exist on disk, in audit order.
    pub async fn list_environments(&self) -> CoreResult<Vec<Environment>> {
        let mut environments = Vec::new();
        for name in ENVIRONMENT_NAMES {
            if let Some(env) = self.ctx.environments.load(name).await? {
                environments.push(env);
            }
        }
        Ok(environments)
    }

    /// Environments subject to the audit (everything but the root environment).
    pub async fn delegated_environments(&self) -> CoreResult<Vec<Environment>> {
        Ok(self
            .list_environments()
            .await?
            .into_iter()
            .filter(|env| !env.is_root(&self.ctx.root_environment))
            .collect())
    }

    /// Account of an environment: its configured ID, else the one its profile
    /// authenticates as. `None` when neither works.
    pub async fn resolve_account_id(&self, env: &Environment) -> Option<String> {
        if let Some(id) = env.account_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }
        let profile = env.credential_profile.as_deref().filter(|p| !p.is_empty())?;
        match self.ctx.credentials.account_id(profile).await {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!(
                    "Could not resolve account for environment {} via profile {profile}: {e}",
                    env.name
                );
                None
            }
        }
    }

    /// Permission state of one environment.
    pub async fn check_environment(
        &self,
        root_profile: &str,
        role_arn: &str,
        env: &Environment,
    ) -> PermissionStatus {
        let account_id = self.resolve_account_id(env).await;
        let has_access = match &account_id {
            Some(id) => self
                .roles
                .read_trusted_accounts(root_profile, role_arn)
                .await
                .contains(id),
            None => false,
        };
        PermissionStatus {
            environment: env.name.clone(),
            account_id,
            has_access,
        }
    }

    /// Audit every delegated environment sequentially, reporting each result to
    /// `progress` as soon as it is known.
    ///
    /// The result has exactly one entry per delegated environment.
    pub async fn audit<F>(
        &self,
        root_profile: &str,
        role_arn: &str,
        mut progress: F,
    ) -> CoreResult<PermissionAudit>
    where
        F: FnMut(usize, usize, &PermissionStatus) + Send,
    {
        let environments = self.delegated_environments().await?;
        let total = environments.len();
        let mut statuses = Vec::with_capacity(total);
        for (index, env) in environments.iter().enumerate() {
            let status = self.check_environment(root_profile, role_arn, env).await;
            progress(index, total, &status);
            statuses.push(status);
        }
        Ok(PermissionAudit { statuses })
    }

    /// Grant the delegation role's trust to every environment in `missing`.
    ///
    /// Fails with [`CoreError::UnresolvedAccounts`] when none of them resolves to an
    /// account. Environments that do resolve are added even if others do not.
    pub async fn fix_permissions(
        &self,
        root_profile: &str,
        role_arn: &str,
        missing: &[String],
    ) -> CoreResult<String> {
        let mut resolved = BTreeSet::new();
        let mut unresolved = Vec::new();
        for name in missing {
            let account = match self.ctx.environments.load(name).await? {
                Some(env) => self.resolve_account_id(&env).await,
                None => None,
            };
            match account {
                Some(id) => {
                    resolved.insert(id);
                }
                None => unresolved.push(name.clone()),
            }
        }

        if resolved.is_empty() {
            return Err(CoreError::UnresolvedAccounts(unresolved));
        }
        if !unresolved.is_empty() {
            log::warn!(
                "Skipping environments without a resolvable account: {}",
                unresolved.join(", ")
            );
        }

        let mut trusted = self.roles.read_trusted_accounts(root_profile, role_arn).await;
        trusted.extend(resolved);
        let trusted: Vec<String> = trusted.into_iter().collect();
        self.roles.ensure_role(root_profile, &trusted).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{
        DEV_ACCOUNT, ROOT_ACCOUNT, ROOT_PROFILE, STAGING_ACCOUNT, create_test_context, env,
    };

    #[tokio::test]
    async fn audit_then_fix() {
        let t = create_test_context();
        t.environments.insert(env("dev", Some(DEV_ACCOUNT), None)).await;
        t.environments
            .insert(env("staging", Some(STAGING_ACCOUNT), None))
            .await;
        t.environments
            .insert(env("prod", Some(ROOT_ACCOUNT), Some(ROOT_PROFILE)))
            .await;

        let roles = DelegationRoleService::new(t.ctx.clone());
        let arn = roles
            .ensure_role(ROOT_PROFILE, &[DEV_ACCOUNT.to_string()])
            .await
            .unwrap();

        let audit_service = PermissionAuditService::new(t.ctx.clone());
        let mut seen = Vec::new();
        let audit = audit_service
            .audit(ROOT_PROFILE, &arn, |i, total, s| {
                seen.push((i, total, s.environment.clone()));
            })
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![(0, 2, "dev".to_string()), (1, 2, "staging".to_string())]
        );
        let map = audit.by_environment();
        assert_eq!(map.len(), 2);
        assert!(map["dev"]);
        assert!(!map["staging"]);
        assert_eq!(audit.missing(), vec!["staging".to_string()]);

        audit_service
            .fix_permissions(ROOT_PROFILE, &arn, &audit.missing())
            .await
            .unwrap();

        let audit = audit_service.audit(ROOT_PROFILE, &arn, |_, _, _| {}).await.unwrap();
        assert!(audit.all_granted());
        assert_eq!(audit.statuses.len(), 2);
    }

    #[tokio::test]
    async fn unresolvable_environment_is_reported_not_skipped() {
        let t = create_test_context();
        t.environments.insert(env("dev", None, None)).await;
        t.environments
            .insert(env("staging", None, Some("staging")))
            .await;

        let audit_service = PermissionAuditService::new(t.ctx.clone());
        let audit = audit_service
            .audit(ROOT_PROFILE, "arn", |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(audit.statuses.len(), 2);
        let dev = &audit.statuses[0];
        assert_eq!(dev.environment, "dev");
        assert!(dev.account_id.is_none());
        assert!(!dev.has_access);
        // Resolved through its profile.
        assert_eq!(audit.statuses[1].account_id.as_deref(), Some(STAGING_ACCOUNT));
    }

    #[tokio::test]
    async fn fix_without_any_account_fails() {
        let t = create_test_context();
        t.environments.insert(env("dev", None, None)).await;

        let audit_service = PermissionAuditService::new(t.ctx.clone());
        let err = audit_service
            .fix_permissions(
                ROOT_PROFILE,
                "arn",
                &["dev".to_string(), "staging".to_string()],
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not determine account IDs for environments: [dev, staging]"
        );
    }

    #[tokio::test]
    async fn environments_listed_in_fixed_order() {
        let t = create_test_context();
        t.environments.insert(env("prod", Some(ROOT_ACCOUNT), None)).await;
        t.environments.insert(env("staging", None, None)).await;
        t.environments.insert(env("dev", None, None)).await;

        let audit_service = PermissionAuditService::new(t.ctx.clone());
        let names: Vec<String> = audit_service
            .list_environments()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["dev", "staging", "prod"]);

        let delegated = audit_service.delegated_environments().await.unwrap();
        assert_eq!(delegated.len(), 2);
    }
}
