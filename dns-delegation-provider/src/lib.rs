//! # dns-delegation-provider
//!
//! Cloud capability abstraction for standing up a delegated DNS hierarchy:
//! hosted zones, NS record sets, a cross-account delegation role and caller identity.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Services |
//! |----------|-------------|----------|
//! | [AWS](https://aws.amazon.com/) | `aws` *(default)* | Route 53, IAM, STS |
//!
//! Credentials come from named profiles in the shared AWS config and credentials
//! files. See [`profiles`] for local discovery.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_delegation_provider::{CloudProvider, create_provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Bind a provider to a profile
//!     let provider = create_provider("root-account").await?;
//!
//!     // 2. Who am I?
//!     println!("account: {}", provider.caller_account_id().await?);
//!
//!     // 3. Look up a zone and its nameservers
//!     if let Some(zone) = provider.find_hosted_zone_by_name("example.com").await? {
//!         for ns in provider.list_zone_nameservers(&zone.id).await? {
//!             println!("{ns}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! AWS error codes are mapped to structured variants:
//!
//! - [`ProviderError::ZoneAlreadyExists`]: `HostedZoneAlreadyExists` / `ConflictingDomainExists`
//! - [`ProviderError::RoleAlreadyExists`]: `EntityAlreadyExists`
//! - [`ProviderError::RoleNotFound`]: `NoSuchEntity`
//! - [`ProviderError::RateLimited`]: throttling (transient)
//!
//! See [`ProviderError`] for the full list.

mod error;
mod factory;
mod providers;
mod traits;
mod types;
mod utils;

#[cfg(feature = "aws")]
pub mod profiles;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
#[cfg(feature = "aws")]
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::CloudProvider;

// Re-export types
pub use types::{CreateRoleRequest, HostedZone, NsRecordRequest, RoleInfo};

// Re-export log helpers
pub use utils::log_sanitizer;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "aws")]
pub use providers::AwsProvider;
