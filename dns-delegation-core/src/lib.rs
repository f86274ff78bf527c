//! DNS Delegation Core Library
//!
//! Platform-independent services for standing up and auditing a delegated DNS hierarchy:
//! - Zone Provisioner (root hosted zone)
//! - Delegation Role Manager (cross-account trust policy)
//! - Environment Permission Auditor
//! - Configuration checkpoints, subdomain delegation bookkeeping and reports
//!
//! Storage and credential resolution are abstracted behind traits so the services run
//! unchanged against files, profiles and live APIs or against in-memory fakes.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{ConfigStore, CredentialResolver, EnvironmentStore, ResumeTokenStore};
