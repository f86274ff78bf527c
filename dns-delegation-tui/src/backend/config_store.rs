//! `dns.yaml` 与恢复令牌存储
//!
//! 实现 dns-delegation-core 的 `ConfigStore` / `ResumeTokenStore` trait

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dns_delegation_core::traits::{ConfigStore, ResumeTokenStore};
use dns_delegation_core::types::{DelegationConfig, ResumeToken};
use dns_delegation_core::{CoreError, CoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

/// Persisted DNS state, relative to the working directory.
pub const CONFIG_FILE: &str = "dns.yaml";

/// Root setup interrupted by missing credentials.
pub const RESUME_TOKEN_FILE: &str = ".dns_setup_temp.yaml";

/// 读取 YAML 文件，文件不存在时返回 `None`
async fn read_yaml<T: DeserializeOwned>(path: &Path) -> CoreResult<Option<T>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CoreError::StorageError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };
    parse_yaml(path, &content).map(Some)
}

fn parse_yaml<T: DeserializeOwned>(path: &Path, content: &str) -> CoreResult<T> {
    serde_yaml::from_str(content).map_err(|e| {
        CoreError::SerializationError(format!("failed to parse {}: {e}", path.display()))
    })
}

/// 写入 YAML 文件
async fn write_yaml<T: Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    let content = serde_yaml::to_string(value)
        .map_err(|e| CoreError::SerializationError(e.to_string()))?;
    write_file(path, &content).await
}

/// Replace `path` with `content` via a sibling temp file, so concurrent readers never
/// see a partial document.
pub(super) async fn write_file(path: &Path, content: &str) -> CoreResult<()> {
    static NEXT_TMP: AtomicU64 = AtomicU64::new(0);
    let tmp = path.with_extension(format!(
        "tmp.{}.{}",
        std::process::id(),
        NEXT_TMP.fetch_add(1, Ordering::Relaxed)
    ));
    let result = async {
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, path).await
    }
    .await;
    if result.is_err() {
        let _ = fs::remove_file(&tmp).await;
    }
    result.map_err(|e| CoreError::StorageError(format!("failed to write {}: {e}", path.display())))
}

/// `dns.yaml` in a working directory.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CONFIG_FILE),
        }
    }
}

#[async_trait]
impl ConfigStore for YamlConfigStore {
    async fn load(&self) -> CoreResult<Option<DelegationConfig>> {
        read_yaml(&self.path).await
    }

    async fn save(&self, config: &DelegationConfig) -> CoreResult<()> {
        write_yaml(&self.path, config).await?;
        log::debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// `.dns_setup_temp.yaml` in a working directory.
pub struct YamlResumeTokenStore {
    path: PathBuf,
}

impl YamlResumeTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(RESUME_TOKEN_FILE),
        }
    }
}

#[async_trait]
impl ResumeTokenStore for YamlResumeTokenStore {
    async fn save(&self, token: &ResumeToken) -> CoreResult<()> {
        write_yaml(&self.path, token).await
    }

    /// The file is removed before it is parsed, so a corrupt token is only reported once.
    async fn take(&self) -> CoreResult<Option<ResumeToken>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CoreError::StorageError(e.to_string())),
        };
        if let Err(e) = fs::remove_file(&self.path).await {
            log::warn!("Could not remove {}: {e}", self.path.display());
        }
        parse_yaml(&self.path, &content).map(Some)
    }
}
