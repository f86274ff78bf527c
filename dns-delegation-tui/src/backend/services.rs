//! 核心服务
//!
//! 封装 dns-delegation-core 的各种服务，
//! 提供给 TUI 层和子命令使用的统一接口

use std::path::Path;
use std::sync::Arc;

use dns_delegation_core::services::{
    ConfigurationService, DelegationRoleService, DelegationService, PermissionAuditService,
    ReportService, ServiceContext, ZoneProvisioner,
};
use dns_delegation_toolbox::PropagationVerifier;

use super::config_store::{YamlConfigStore, YamlResumeTokenStore};
use super::credentials::AwsCredentialResolver;
use super::environment_store::YamlEnvironmentStore;
use crate::config::Settings;

/// 核心服务
///
/// 持有服务上下文和传播检查器，各业务服务按需创建
#[derive(Clone)]
pub struct CoreServices {
    ctx: Arc<ServiceContext>,
    verifier: PropagationVerifier,
}

impl CoreServices {
    pub fn new(ctx: Arc<ServiceContext>, verifier: PropagationVerifier) -> Self {
        Self { ctx, verifier }
    }

    /// Services backed by the YAML files in `dir` and the local AWS profiles.
    pub fn from_settings(dir: &Path, settings: &Settings) -> Self {
        // 1. 创建平台存储
        let config_store = Arc::new(YamlConfigStore::new(dir));
        let environments = Arc::new(YamlEnvironmentStore::new(dir));
        let resume_tokens = Arc::new(YamlResumeTokenStore::new(dir));
        let credentials = Arc::new(AwsCredentialResolver::new());

        // 2. 创建 ServiceContext
        let ctx = ServiceContext::new(config_store, environments, resume_tokens, credentials)
            .with_root_environment(settings.root_environment.clone());

        Self::new(
            Arc::new(ctx),
            PropagationVerifier::new(settings.verifier_options()),
        )
    }

    // ========== 根区域 ==========

    pub fn zones(&self) -> ZoneProvisioner {
        ZoneProvisioner::new(self.ctx.clone())
    }

    pub fn roles(&self) -> DelegationRoleService {
        DelegationRoleService::new(self.ctx.clone())
    }

    // ========== 权限检查 ==========

    pub fn permissions(&self) -> PermissionAuditService {
        PermissionAuditService::new(self.ctx.clone())
    }

    // ========== 配置与子域 ==========

    pub fn configuration(&self) -> ConfigurationService {
        ConfigurationService::new(self.ctx.clone())
    }

    pub fn delegations(&self) -> DelegationService {
        DelegationService::new(self.ctx.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.ctx.clone(), self.verifier.clone())
    }

    // ========== 传播检查 ==========

    pub fn verifier(&self) -> &PropagationVerifier {
        &self.verifier
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }
}
