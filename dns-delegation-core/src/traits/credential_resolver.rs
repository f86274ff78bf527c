//! Credential profile resolution abstract Trait

use std::sync::Arc;

use async_trait::async_trait;
use dns_delegation_provider::CloudProvider;

use crate::error::{CoreError, CoreResult};

/// Credential resolver Trait
///
/// Turns named credential profiles into provider instances. This replaces any ambient
/// "current profile/region" state: every service call names the profile it acts as.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Names of every locally configured profile.
    async fn list_profiles(&self) -> CoreResult<Vec<String>>;

    /// Provider bound to a profile
    ///
    /// # Arguments
    /// * `profile` - Credential profile name
    async fn provider(&self, profile: &str) -> CoreResult<Arc<dyn CloudProvider>>;

    /// Account ID a profile authenticates as.
    async fn account_id(&self, profile: &str) -> CoreResult<String> {
        let provider = self.provider(profile).await?;
        Ok(provider.caller_account_id().await?)
    }

    /// First profile (in listing order) that authenticates as `account_id`.
    ///
    /// Profiles that fail to resolve are skipped.
    async fn find_profile_for_account(&self, account_id: &str) -> CoreResult<Option<String>> {
        for profile in self.list_profiles().await? {
            match self.account_id(&profile).await {
                Ok(id) if id == account_id => return Ok(Some(profile)),
                Ok(_) => {}
                Err(e) => log::debug!("Skipping profile {profile}: {e}"),
            }
        }
        Ok(None)
    }

    /// Like [`Self::find_profile_for_account`], but a missing profile is an error.
    async fn require_profile_for_account(&self, account_id: &str) -> CoreResult<String> {
        self.find_profile_for_account(account_id)
            .await?
            .ok_or_else(|| CoreError::ProfileNotFound(account_id.to_string()))
    }
}
