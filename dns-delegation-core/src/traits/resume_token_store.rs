//! Resume token abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ResumeToken;

/// Resume token store Trait
#[async_trait]
pub trait ResumeTokenStore: Send + Sync {
    async fn save(&self, token: &ResumeToken) -> CoreResult<()>;

    /// Read and delete the token. A token can be taken once.
    async fn take(&self) -> CoreResult<Option<ResumeToken>>;
}
