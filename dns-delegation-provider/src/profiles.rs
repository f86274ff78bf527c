//! Local credential profile discovery.
//!
//! Profiles are read with the AWS SDK's own profile loader, so a profile is listed
//! exactly when [`aws_config`] can load it. The default file set honours
//! `AWS_CONFIG_FILE` and `AWS_SHARED_CREDENTIALS_FILE`, else `~/.aws/config` and
//! `~/.aws/credentials`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use aws_config::profile::ProfileSet;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use aws_types::os_shim_internal::{Env, Fs};

use crate::error::{ProviderError, Result};

/// All profile names defined locally, sorted and deduplicated.
pub async fn list_local_profiles() -> Result<Vec<String>> {
    load_names(&EnvConfigFiles::default()).await
}

/// Profile names from explicit config/credentials file paths. Missing files are skipped.
pub async fn list_profiles_in(
    config_file: Option<PathBuf>,
    credentials_file: Option<PathBuf>,
) -> Result<Vec<String>> {
    let files: Vec<(EnvConfigFileKind, PathBuf)> = [
        (EnvConfigFileKind::Config, config_file),
        (EnvConfigFileKind::Credentials, credentials_file),
    ]
    .into_iter()
    .filter_map(|(kind, path)| path.map(|p| (kind, p)))
    .filter(|(_, path)| path.is_file())
    .collect();

    // 构建器要求至少一个文件
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let builder = files
        .into_iter()
        .fold(EnvConfigFiles::builder(), |b, (kind, path)| b.with_file(kind, path));
    load_names(&builder.build()).await
}

async fn load_names(files: &EnvConfigFiles) -> Result<Vec<String>> {
    let set = aws_config::profile::load(&Fs::real(), &Env::real(), files, None)
        .await
        .map_err(|e| ProviderError::ParseError {
            provider: "aws".to_string(),
            detail: format!("failed to load AWS profiles: {e}"),
        })?;
    Ok(profile_names(&set))
}

fn profile_names(set: &ProfileSet) -> Vec<String> {
    set.profiles()
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
