//! 类型定义模块

mod config;
mod environment;
mod report;

pub use config::{DelegatedZone, DelegationConfig, DelegationStatus, ResumeToken, RootAccount};
pub use environment::{
    ENVIRONMENT_NAMES, Environment, EnvironmentDomainUpdate, NewRootEnvironment,
    ROOT_ENVIRONMENT, is_valid_account_id,
};
pub use report::{
    NameserverLookupResult, PermissionAudit, PermissionStatus, RemovalOutcome, RoleOutcome,
    RootZone, StatusReport, ValidationReport, ZoneValidation,
};

// Re-export provider / toolbox 库的公共类型
pub use dns_delegation_provider::{HostedZone, RoleInfo};
pub use dns_delegation_toolbox::{DebugLog, MatchPolicy, PropagationReport};
