//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use dns_delegation_provider::ProviderError;
pub use dns_delegation_toolbox::ToolboxError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Missing or inconsistent setup (no root environment, empty profile, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No local credential profile belongs to the account
    #[error(
        "No AWS profile found for account {0}. Configure a profile for this account (the account ID is recorded in dns.yaml) and run the setup again"
    )]
    ProfileNotFound(String),

    /// The profile authenticates as a different account than the one selected
    #[error("profile {profile} has account ID {actual} but expected {expected}")]
    AccountMismatch {
        profile: String,
        actual: String,
        expected: String,
    },

    /// The hosted zone belongs to another domain than the configured root domain
    #[error("Hosted zone {zone_id} serves {actual}, but the configured root domain is {expected}")]
    DomainMismatch {
        zone_id: String,
        actual: String,
        expected: String,
    },

    /// Remediation could not resolve any account to add
    #[error("Could not determine account IDs for environments: [{}]", .0.join(", "))]
    UnresolvedAccounts(Vec<String>),

    /// Delegated zone not present in the configuration
    #[error("Subdomain {0} not found in configuration")]
    SubdomainNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// DNS verification error (converting from library)
    #[error("{0}")]
    Toolbox(#[from] ToolboxError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Configuration(_)
            | Self::ProfileNotFound(_)
            | Self::AccountMismatch { .. }
            | Self::DomainMismatch { .. }
            | Self::UnresolvedAccounts(_)
            | Self::SubdomainNotFound(_)
            | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Toolbox(e) => matches!(
                e,
                ToolboxError::ValidationError(_) | ToolboxError::NoAnswer(_)
            ),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }

    /// Log at `warn` or `error` depending on [`Self::is_expected`].
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_accounts_message_lists_environments() {
        let err = CoreError::UnresolvedAccounts(vec!["dev".to_string(), "staging".to_string()]);
        assert_eq!(
            err.to_string(),
            "Could not determine account IDs for environments: [dev, staging]"
        );
        assert!(err.is_expected());
    }

    #[test]
    fn account_mismatch_message() {
        let err = CoreError::AccountMismatch {
            profile: "root".to_string(),
            actual: "111111111111".to_string(),
            expected: "222222222222".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "profile root has account ID 111111111111 but expected 222222222222"
        );
    }

    #[test]
    fn profile_not_found_mentions_dns_yaml() {
        let err = CoreError::ProfileNotFound("123456789012".to_string());
        assert!(err.to_string().contains("dns.yaml"));
        assert!(err.to_string().contains("123456789012"));
    }

    #[test]
    fn provider_classification_is_forwarded() {
        let expected = CoreError::from(ProviderError::RoleNotFound {
            provider: "aws".to_string(),
            role_name: "dns-delegation-role".to_string(),
            raw_message: None,
        });
        assert!(expected.is_expected());

        let unexpected = CoreError::from(ProviderError::NetworkError {
            provider: "aws".to_string(),
            detail: "connection reset".to_string(),
        });
        assert!(!unexpected.is_expected());
    }
}
