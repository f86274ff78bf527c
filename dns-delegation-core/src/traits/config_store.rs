//! Persisted DNS configuration abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DelegationConfig;

/// DNS configuration store Trait
///
/// Platform implementation:
/// - TUI: `YamlConfigStore` (`dns.yaml` in the working directory)
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the configuration. `None` means no setup exists yet.
    async fn load(&self) -> CoreResult<Option<DelegationConfig>>;

    /// Save the configuration, replacing the previous document
    ///
    /// # Arguments
    /// * `config` - Configuration to persist
    async fn save(&self, config: &DelegationConfig) -> CoreResult<()>;
}
