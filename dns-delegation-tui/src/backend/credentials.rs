//! AWS profile 解析
//!
//! 实现 dns-delegation-core 的 `CredentialResolver` trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dns_delegation_core::CoreResult;
use dns_delegation_core::traits::CredentialResolver;
use dns_delegation_provider::{CloudProvider, create_provider, profiles};
use tokio::sync::RwLock;

/// Resolves profiles from the shared AWS config and credentials files.
///
/// Providers and caller identities are cached per profile for the lifetime of the
/// resolver, so scanning every profile for an account ID costs one STS call each.
#[derive(Default)]
pub struct AwsCredentialResolver {
    providers: RwLock<HashMap<String, Arc<dyn CloudProvider>>>,
    account_ids: RwLock<HashMap<String, String>>,
}

impl AwsCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialResolver for AwsCredentialResolver {
    async fn list_profiles(&self) -> CoreResult<Vec<String>> {
        Ok(profiles::list_local_profiles().await?)
    }

    async fn provider(&self, profile: &str) -> CoreResult<Arc<dyn CloudProvider>> {
        if let Some(provider) = self.providers.read().await.get(profile) {
            return Ok(provider.clone());
        }
        let provider = create_provider(profile).await?;
        self.providers
            .write()
            .await
            .insert(profile.to_string(), provider.clone());
        Ok(provider)
    }

    async fn account_id(&self, profile: &str) -> CoreResult<String> {
        if let Some(id) = self.account_ids.read().await.get(profile) {
            return Ok(id.clone());
        }
        let id = self.provider(profile).await?.caller_account_id().await?;
        log::debug!("Profile {profile} authenticates as {id}");
        self.account_ids
            .write()
            .await
            .insert(profile.to_string(), id.clone());
        Ok(id)
    }
}
