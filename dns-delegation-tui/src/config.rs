//! 工具配置
//!
//! Optional `.dns-delegation.yaml` in the working directory. Every key has a default and
//! every key can be overridden on the command line.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dns_delegation_core::types::{MatchPolicy, ROOT_ENVIRONMENT};
use dns_delegation_toolbox::{DEFAULT_DEBUG_LOG_CAP, DEFAULT_DOH_ENDPOINT, VerifierOptions};
use serde::Deserialize;

/// Settings file name, relative to the working directory.
pub const SETTINGS_FILE: &str = ".dns-delegation.yaml";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub match_policy: MatchPolicy,
    /// Seconds between automatic propagation checks.
    pub poll_interval_secs: u64,
    /// Lines kept in the propagation debug log.
    pub debug_log_cap: usize,
    pub doh_endpoint: String,
    /// Environment that owns the root zone.
    pub root_environment: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            debug_log_cap: DEFAULT_DEBUG_LOG_CAP,
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            root_environment: ROOT_ENVIRONMENT.to_string(),
        }
    }
}

/// Command-line overrides. `None` keeps the file's value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub match_policy: Option<MatchPolicy>,
    pub poll_interval_secs: Option<u64>,
    pub debug_log_cap: Option<usize>,
    pub doh_endpoint: Option<String>,
    pub root_environment: Option<String>,
}

impl Settings {
    /// Read `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    #[must_use]
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(policy) = overrides.match_policy {
            self.match_policy = policy;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        if let Some(cap) = overrides.debug_log_cap {
            self.debug_log_cap = cap;
        }
        if let Some(endpoint) = overrides.doh_endpoint {
            self.doh_endpoint = endpoint;
        }
        if let Some(env) = overrides.root_environment {
            self.root_environment = env;
        }
        self
    }

    /// Interval of the propagation poller, at least one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            doh_endpoint: self.doh_endpoint.clone(),
            match_policy: self.match_policy,
            ..VerifierOptions::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.poll_interval(), Duration::from_secs(10));
        assert_eq!(settings.root_environment, "prod");
    }

    #[test]
    fn partial_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "match_policy: majority\npoll_interval_secs: 30\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.match_policy, MatchPolicy::Majority);
        assert_eq!(settings.poll_interval_secs, 30);
        assert_eq!(settings.doh_endpoint, DEFAULT_DOH_ENDPOINT);

        let settings = settings.apply(SettingsOverrides {
            poll_interval_secs: Some(0),
            root_environment: Some("production".to_string()),
            ..SettingsOverrides::default()
        });
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.root_environment, "production");
        assert_eq!(settings.verifier_options().match_policy, MatchPolicy::Majority);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "match_policy: all\n").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
