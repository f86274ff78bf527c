//! 委派角色管理服务

use std::collections::BTreeSet;
use std::sync::Arc;

use dns_delegation_provider::{CloudProvider, CreateRoleRequest, ProviderError, log_sanitizer};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::services::trust_policy::{build_trust_policy, parse_trusted_accounts};
use crate::types::{RoleOutcome, is_valid_account_id};

/// Fixed name of the delegation role; repeated runs address the same role.
pub const DELEGATION_ROLE_NAME: &str = "dns-delegation-role";

const DELEGATION_ROLE_DESCRIPTION: &str = "Role for cross-account DNS delegation";

/// Managed policy the role needs to edit delegation records.
const DELEGATION_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonRoute53FullAccess";

/// ARN reported when the role could not be set up.
#[must_use]
pub fn placeholder_role_arn(root_account_id: &str) -> String {
    format!("arn:aws:iam::{root_account_id}:role/dns-delegation")
}

/// Delegation role manager
pub struct DelegationRoleService {
    ctx: Arc<ServiceContext>,
}

impl DelegationRoleService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Create the delegation role, or widen the trust policy of the existing one.
    ///
    /// The resulting trust is the union of what the role already trusted and
    /// `trusted_accounts`; existing environments never lose access. The Route 53
    /// policy is attached on both paths, so a role left without it by an earlier
    /// failed run is repaired.
    pub async fn ensure_role(&self, profile: &str, trusted_accounts: &[String]) -> CoreResult<String> {
        let provider = self.ctx.provider(profile).await?;
        let accounts: BTreeSet<String> = trusted_accounts
            .iter()
            .filter(|id| is_valid_account_id(id))
            .cloned()
            .collect();

        let request = CreateRoleRequest {
            role_name: DELEGATION_ROLE_NAME.to_string(),
            trust_policy_document: build_trust_policy(&accounts),
            description: Some(DELEGATION_ROLE_DESCRIPTION.to_string()),
        };
        log::debug!(
            "Ensuring delegation role with trust policy {}",
            log_sanitizer::sanitize_for_log(&request.trust_policy_document)
        );

        match provider.create_role(&request).await {
            Ok(role) => {
                attach_route53_policy(provider.as_ref()).await?;
                log::info!("Created delegation role {}", role.arn);
                Ok(role.arn)
            }
            Err(ProviderError::RoleAlreadyExists { .. }) => {
                let existing = provider.get_role(DELEGATION_ROLE_NAME).await?;
                let mut merged = existing
                    .trust_policy_document
                    .as_deref()
                    .map(parse_trusted_accounts)
                    .unwrap_or_default();
                let before = merged.len();
                merged.extend(accounts);

                provider
                    .update_assume_role_policy(DELEGATION_ROLE_NAME, &build_trust_policy(&merged))
                    .await?;
                attach_route53_policy(provider.as_ref()).await?;
                log::info!(
                    "Updated trust policy of {} ({} -> {} accounts)",
                    existing.arn,
                    before,
                    merged.len()
                );
                Ok(existing.arn)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// [`Self::ensure_role`] with soft failure.
    ///
    /// The root zone stays usable without working delegation, so a failure yields a
    /// placeholder ARN and a warning instead of an error. With no trusted accounts
    /// the root account itself is trusted, so the role can still be created.
    pub async fn ensure_delegation_role(
        &self,
        profile: &str,
        root_account_id: &str,
        trusted_accounts: &[String],
    ) -> RoleOutcome {
        let mut trusted: Vec<String> = trusted_accounts
            .iter()
            .filter(|id| id.as_str() != root_account_id)
            .cloned()
            .collect();
        if trusted.is_empty() {
            trusted.push(root_account_id.to_string());
        }

        match self.ensure_role(profile, &trusted).await {
            Ok(arn) => RoleOutcome {
                arn,
                placeholder: false,
                warning: None,
            },
            Err(e) => {
                e.log("Delegation role setup failed");
                RoleOutcome {
                    arn: placeholder_role_arn(root_account_id),
                    placeholder: true,
                    warning: Some(format!(
                        "Delegation role could not be set up ({e}). The root zone is usable; fix permissions later."
                    )),
                }
            }
        }
    }

    /// Accounts the delegation role currently trusts.
    ///
    /// Unreadable roles and malformed policies yield an empty set: no visible trust is
    /// a normal state (the role may not exist yet).
    pub async fn read_trusted_accounts(&self, profile: &str, role_arn: &str) -> BTreeSet<String> {
        let provider = match self.ctx.provider(profile).await {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Cannot read trust policy of {role_arn}: {e}");
                return BTreeSet::new();
            }
        };

        match provider.get_role(DELEGATION_ROLE_NAME).await {
            Ok(role) => role
                .trust_policy_document
                .as_deref()
                .map(parse_trusted_accounts)
                .unwrap_or_default(),
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Cannot read trust policy of {role_arn}: {e}");
                } else {
                    log::error!("Cannot read trust policy of {role_arn}: {e}");
                }
                BTreeSet::new()
            }
        }
    }
}

async fn attach_route53_policy(provider: &dyn CloudProvider) -> CoreResult<()> {
    provider
        .attach_role_policy(DELEGATION_ROLE_NAME, DELEGATION_POLICY_ARN)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{ROOT_ACCOUNT, ROOT_PROFILE, create_test_context};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn trust_union_never_overwrites() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());

        let arn = service
            .ensure_role(ROOT_PROFILE, &ids(&["111111111111", "222222222222"]))
            .await
            .unwrap();
        let trusted = service.read_trusted_accounts(ROOT_PROFILE, &arn).await;
        assert!(trusted.contains("111111111111"));
        assert!(trusted.contains("222222222222"));

        service
            .ensure_role(ROOT_PROFILE, &ids(&["333333333333"]))
            .await
            .unwrap();
        let trusted = service.read_trusted_accounts(ROOT_PROFILE, &arn).await;
        assert_eq!(
            trusted.into_iter().collect::<Vec<_>>(),
            ids(&["111111111111", "222222222222", "333333333333"])
        );
    }

    #[tokio::test]
    async fn policy_attached_once() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());

        service.ensure_role(ROOT_PROFILE, &ids(&["111111111111"])).await.unwrap();
        service.ensure_role(ROOT_PROFILE, &ids(&["222222222222"])).await.unwrap();

        assert_eq!(
            t.root.attached_policies().await,
            vec![DELEGATION_POLICY_ARN.to_string()]
        );
    }

    #[tokio::test]
    async fn failed_attach_is_repaired_on_next_run() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());

        t.root.fail_attach(true).await;
        assert!(service.ensure_role(ROOT_PROFILE, &ids(&["111111111111"])).await.is_err());
        assert!(t.root.attached_policies().await.is_empty());

        // The role now exists, so this run takes the update path.
        t.root.fail_attach(false).await;
        let arn = service
            .ensure_role(ROOT_PROFILE, &ids(&["222222222222"]))
            .await
            .unwrap();
        assert_eq!(
            t.root.attached_policies().await,
            vec![DELEGATION_POLICY_ARN.to_string()]
        );
        let trusted = service.read_trusted_accounts(ROOT_PROFILE, &arn).await;
        assert_eq!(
            trusted.into_iter().collect::<Vec<_>>(),
            ids(&["111111111111", "222222222222"])
        );
    }

    #[tokio::test]
    async fn encoded_trust_document_is_read() {
        let t = create_test_context();
        // The mock returns documents percent-encoded, as IAM does.
        t.root
            .set_role_document(
                r#"{"Statement":[{"Principal":{"AWS":"arn:aws:iam::444444444444:root"}}]}"#,
            )
            .await;
        let service = DelegationRoleService::new(t.ctx.clone());

        let trusted = service.read_trusted_accounts(ROOT_PROFILE, "arn").await;
        assert_eq!(trusted.into_iter().collect::<Vec<_>>(), ids(&["444444444444"]));
    }

    #[tokio::test]
    async fn missing_role_reads_as_empty() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());
        assert!(service.read_trusted_accounts(ROOT_PROFILE, "arn").await.is_empty());
        assert!(service.read_trusted_accounts("nope", "arn").await.is_empty());
    }

    #[tokio::test]
    async fn failure_yields_placeholder() {
        let t = create_test_context();
        t.root.fail_roles(true).await;
        let service = DelegationRoleService::new(t.ctx.clone());

        let outcome = service
            .ensure_delegation_role(ROOT_PROFILE, ROOT_ACCOUNT, &ids(&["222222222222"]))
            .await;
        assert!(outcome.placeholder);
        assert_eq!(outcome.arn, placeholder_role_arn(ROOT_ACCOUNT));
        assert!(outcome.warning.is_some());
    }

    #[tokio::test]
    async fn empty_trust_falls_back_to_root_account() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());

        let outcome = service
            .ensure_delegation_role(ROOT_PROFILE, ROOT_ACCOUNT, &[])
            .await;
        assert!(!outcome.placeholder);
        let trusted = service.read_trusted_accounts(ROOT_PROFILE, &outcome.arn).await;
        assert!(trusted.contains(ROOT_ACCOUNT));
    }

    #[tokio::test]
    async fn invalid_account_ids_are_dropped() {
        let t = create_test_context();
        let service = DelegationRoleService::new(t.ctx.clone());

        let arn = service
            .ensure_role(ROOT_PROFILE, &ids(&["", "12345", "555555555555"]))
            .await
            .unwrap();
        let trusted = service.read_trusted_accounts(ROOT_PROFILE, &arn).await;
        assert_eq!(trusted.into_iter().collect::<Vec<_>>(), ids(&["555555555555"]));
    }
}
