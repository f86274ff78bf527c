//! Per-environment configuration abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Environment, EnvironmentDomainUpdate, NewRootEnvironment};

/// Environment configuration store Trait
///
/// The document format belongs to the infrastructure tooling; implementations only touch
/// the keys named by [`EnvironmentDomainUpdate`] and keep everything else intact.
#[async_trait]
pub trait EnvironmentStore: Send + Sync {
    /// Load an environment. `None` when its file does not exist.
    ///
    /// # Arguments
    /// * `name` - Environment name (`dev`, `staging`, `prod`)
    async fn load(&self, name: &str) -> CoreResult<Option<Environment>>;

    /// Create the root environment file
    ///
    /// # Arguments
    /// * `name` - Environment name
    /// * `env` - Initial contents
    async fn create_root(&self, name: &str, env: &NewRootEnvironment) -> CoreResult<()>;

    /// Merge the orchestrator-owned `domain` keys into an environment, creating a
    /// minimal document if the environment does not exist yet
    ///
    /// # Arguments
    /// * `name` - Environment name
    /// * `update` - Domain section keys to set
    async fn update_domain(&self, name: &str, update: &EnvironmentDomainUpdate) -> CoreResult<()>;
}
