//! 环境文件存储（`<env>.yaml`）
//!
//! Environment files belong to other tooling as well, so they are read and written as
//! untyped YAML documents: only the keys below are interpreted, and only the `domain`
//! section is ever modified.
//!
//! ```yaml
//! env: dev
//! account_id: "111111111111"
//! aws_profile: dev
//! region: eu-west-1
//! domain:
//!   enabled: true
//!   domain_name: example.com
//!   create_domain_zone: true
//!   add_env_domain_prefix: true
//!   root_zone_id: Z123
//!   root_account_id: "999999999999"
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dns_delegation_core::traits::EnvironmentStore;
use dns_delegation_core::types::{Environment, EnvironmentDomainUpdate, NewRootEnvironment};
use dns_delegation_core::{CoreError, CoreResult};
use serde_yaml::{Mapping, Value};
use tokio::fs;

use super::config_store::write_file;

/// Environment files in a working directory.
pub struct YamlEnvironmentStore {
    dir: PathBuf,
}

impl YamlEnvironmentStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.yaml"))
    }

    async fn read_document(&self, name: &str) -> CoreResult<Option<Mapping>> {
        let path = self.path(name);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        match serde_yaml::from_str::<Value>(&content) {
            Ok(Value::Mapping(map)) => Ok(Some(map)),
            // 空文件
            Ok(Value::Null) => Ok(Some(Mapping::new())),
            Ok(_) => Err(CoreError::SerializationError(format!(
                "{} is not a YAML mapping",
                path.display()
            ))),
            Err(e) => Err(CoreError::SerializationError(format!(
                "failed to parse {}: {e}",
                path.display()
            ))),
        }
    }

    async fn write_document(&self, name: &str, doc: &Mapping) -> CoreResult<()> {
        let path = self.path(name);
        let content = serde_yaml::to_string(doc)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        write_file(&path, &content).await
    }
}

/// String value of `key`. Numbers are accepted because unquoted account IDs parse as such.
fn string_field(doc: &Mapping, key: &str) -> Option<String> {
    match doc.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

/// Write the orchestrator-owned keys into `section`, keeping the others.
fn apply_domain_update(section: &mut Mapping, update: &EnvironmentDomainUpdate) {
    section.insert(key("enabled"), Value::Bool(update.enabled));
    section.insert(key("domain_name"), key(&update.domain_name));
    section.insert(key("create_domain_zone"), Value::Bool(update.create_domain_zone));
    section.insert(
        key("add_env_domain_prefix"),
        Value::Bool(update.add_env_domain_prefix),
    );
    let optional = [
        ("zone_id", &update.zone_id),
        ("root_zone_id", &update.root_zone_id),
        ("root_account_id", &update.root_account_id),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            section.insert(key(name), key(value));
        }
    }
}

#[async_trait]
impl EnvironmentStore for YamlEnvironmentStore {
    async fn load(&self, name: &str) -> CoreResult<Option<Environment>> {
        let Some(doc) = self.read_document(name).await? else {
            return Ok(None);
        };
        Ok(Some(Environment {
            name: name.to_string(),
            credential_profile: string_field(&doc, "aws_profile"),
            account_id: string_field(&doc, "account_id"),
            region: string_field(&doc, "region"),
        }))
    }

    async fn create_root(&self, name: &str, env: &NewRootEnvironment) -> CoreResult<()> {
        let mut doc = Mapping::new();
        doc.insert(key("env"), key(name));
        doc.insert(key("is_prod"), Value::Bool(true));
        doc.insert(key("account_id"), key(&env.account_id));
        doc.insert(key("aws_profile"), key(&env.aws_profile));
        doc.insert(key("region"), key(&env.region));
        let mut domain = Mapping::new();
        apply_domain_update(&mut domain, &env.domain);
        doc.insert(key("domain"), Value::Mapping(domain));
        self.write_document(name, &doc).await
    }

    async fn update_domain(&self, name: &str, update: &EnvironmentDomainUpdate) -> CoreResult<()> {
        let mut doc = match self.read_document(name).await? {
            Some(doc) => doc,
            None => {
                let mut doc = Mapping::new();
                doc.insert(key("env"), key(name));
                doc
            }
        };

        let section = doc
            .entry(key("domain"))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !section.is_mapping() {
            *section = Value::Mapping(Mapping::new());
        }
        if let Value::Mapping(section) = section {
            apply_domain_update(section, update);
        }

        self.write_document(name, &doc).await?;
        log::debug!("Updated domain section of {name}.yaml");
        Ok(())
    }
}
