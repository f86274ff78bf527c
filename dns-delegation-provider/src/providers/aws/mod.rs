//! AWS provider (Route 53 + IAM + STS)

mod error;
mod provider;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::error::{ProviderError, Result};
use crate::profiles;

/// Region used when the profile does not configure one.
pub(crate) const DEFAULT_REGION: &str = "us-east-1";
/// Route 53 returns zone IDs with this prefix.
pub(crate) const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

/// AWS provider bound to a single credential profile.
pub struct AwsProvider {
    pub(crate) profile: String,
    pub(crate) region: String,
    pub(crate) route53: aws_sdk_route53::Client,
    pub(crate) iam: aws_sdk_iam::Client,
    pub(crate) sts: aws_sdk_sts::Client,
}

impl AwsProvider {
    /// Build a provider from a named profile in the shared AWS config/credentials files.
    ///
    /// Fails with [`ProviderError::ProfileNotFound`] when no such profile is defined locally.
    pub async fn from_profile(profile: &str) -> Result<Self> {
        let known = profiles::list_local_profiles().await?;
        if !known.iter().any(|p| p == profile) {
            return Err(ProviderError::ProfileNotFound {
                provider: "aws".to_string(),
                profile: profile.to_string(),
            });
        }

        let mut config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .load()
            .await;
        if config.region().is_none() {
            config = config
                .into_builder()
                .region(Region::new(DEFAULT_REGION))
                .build();
        }

        log::debug!("[aws] loaded profile '{profile}'");
        Ok(Self::from_sdk_config(profile, &config))
    }

    /// Build a provider from an already-loaded SDK config.
    pub fn from_sdk_config(profile: &str, config: &SdkConfig) -> Self {
        let region = config
            .region()
            .map_or_else(|| DEFAULT_REGION.to_string(), ToString::to_string);
        Self {
            profile: profile.to_string(),
            region,
            route53: aws_sdk_route53::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            sts: aws_sdk_sts::Client::new(config),
        }
    }
}

/// Strip the `/hostedzone/` prefix Route 53 puts on zone IDs.
pub(crate) fn clean_zone_id(id: &str) -> String {
    id.strip_prefix(HOSTED_ZONE_PREFIX).unwrap_or(id).to_string()
}

/// Record and zone names come back fully qualified with a trailing dot.
pub(crate) fn trim_fqdn(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

#[cfg(test)]
pub(crate) fn test_provider() -> AwsProvider {
    let config = SdkConfig::builder()
        .region(Region::new(DEFAULT_REGION))
        .behavior_version(BehaviorVersion::latest())
        .build();
    AwsProvider::from_sdk_config("test", &config)
}
