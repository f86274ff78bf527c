//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::CloudProvider;

#[cfg(feature = "aws")]
use crate::providers::AwsProvider;

/// Creates a [`CloudProvider`] bound to the given credential profile.
///
/// The returned provider is wrapped in `Arc<dyn CloudProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// # use dns_delegation_provider::CloudProvider;
/// # async fn example() -> dns_delegation_provider::Result<()> {
/// let provider = dns_delegation_provider::create_provider("root-account").await?;
/// println!("{}", provider.caller_account_id().await?);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "aws")]
pub async fn create_provider(profile: &str) -> Result<Arc<dyn CloudProvider>> {
    Ok(Arc::new(AwsProvider::from_profile(profile).await?))
}
