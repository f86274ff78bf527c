//! 业务逻辑服务层

mod configuration_service;
mod delegation_role_service;
mod delegation_service;
mod permission_audit_service;
mod report_service;
pub mod trust_policy;
mod zone_provisioner;

pub use configuration_service::{ConfigurationService, SaveConfigurationRequest};
pub use delegation_role_service::{
    DELEGATION_ROLE_NAME, DelegationRoleService, placeholder_role_arn,
};
pub use delegation_service::DelegationService;
pub use permission_audit_service::PermissionAuditService;
pub use report_service::ReportService;
pub use zone_provisioner::ZoneProvisioner;

use std::sync::Arc;

use dns_delegation_provider::CloudProvider;

use crate::error::CoreResult;
use crate::traits::{ConfigStore, CredentialResolver, EnvironmentStore, ResumeTokenStore};
use crate::types::ROOT_ENVIRONMENT;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// `dns.yaml`
    pub config_store: Arc<dyn ConfigStore>,
    /// Per-environment files
    pub environments: Arc<dyn EnvironmentStore>,
    /// Resume token
    pub resume_tokens: Arc<dyn ResumeTokenStore>,
    /// Credential profiles
    pub credentials: Arc<dyn CredentialResolver>,
    /// Environment that owns the root zone
    pub root_environment: String,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        environments: Arc<dyn EnvironmentStore>,
        resume_tokens: Arc<dyn ResumeTokenStore>,
        credentials: Arc<dyn CredentialResolver>,
    ) -> Self {
        Self {
            config_store,
            environments,
            resume_tokens,
            credentials,
            root_environment: ROOT_ENVIRONMENT.to_string(),
        }
    }

    /// Use another environment as the root.
    #[must_use]
    pub fn with_root_environment(mut self, name: impl Into<String>) -> Self {
        self.root_environment = name.into();
        self
    }

    /// 获取 Provider 实例
    pub async fn provider(&self, profile: &str) -> CoreResult<Arc<dyn CloudProvider>> {
        self.credentials.provider(profile).await
    }
}
