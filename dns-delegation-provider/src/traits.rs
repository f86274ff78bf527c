use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateRoleRequest, HostedZone, NsRecordRequest, RoleInfo};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// AWS error code (e.g. `NoSuchHostedZone`)
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Domain being operated on (for `ZoneAlreadyExists`)
    pub domain: Option<String>,
    /// Zone ID (for `ZoneNotFound`)
    pub zone_id: Option<String>,
    /// Role name (for `RoleAlreadyExists` / `RoleNotFound`)
    pub role_name: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            ..Self::default()
        }
    }

    pub fn role(role_name: &str) -> Self {
        Self {
            role_name: Some(role_name.to_string()),
            ..Self::default()
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Cloud capabilities needed to stand up and audit a DNS delegation.
///
/// One instance is bound to one credential profile (and therefore one account).
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Credential profile this instance was created from.
    fn profile(&self) -> &str;

    /// Region resolved for the profile.
    fn region(&self) -> &str;

    /// Account ID of the authenticated caller.
    async fn caller_account_id(&self) -> Result<String>;

    // ---- Hosted zones ----

    /// Create a public hosted zone.
    ///
    /// Fails with [`ProviderError::ZoneAlreadyExists`] when the provider reports a conflict.
    async fn create_hosted_zone(
        &self,
        domain: &str,
        caller_reference: &str,
        comment: &str,
    ) -> Result<HostedZone>;

    /// Look up a hosted zone by its exact domain name.
    async fn find_hosted_zone_by_name(&self, domain: &str) -> Result<Option<HostedZone>>;

    /// Fetch a hosted zone by ID.
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone>;

    /// Nameservers from the zone's first NS record set, trailing dots trimmed.
    async fn list_zone_nameservers(&self, zone_id: &str) -> Result<Vec<String>>;

    /// Delete a hosted zone, removing every non-default record set first.
    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<()>;

    // ---- Records ----

    /// Create or replace an NS record set.
    async fn upsert_ns_records(&self, req: &NsRecordRequest) -> Result<()>;

    /// Delete the NS record set with the given name. Absent records are not an error.
    async fn delete_ns_records(&self, zone_id: &str, record_name: &str) -> Result<()>;

    // ---- Roles ----

    /// Create a role. Returns the created role.
    ///
    /// Fails with [`ProviderError::RoleAlreadyExists`] when the name is taken.
    async fn create_role(&self, req: &CreateRoleRequest) -> Result<RoleInfo>;

    /// Read a role, including its trust policy document.
    async fn get_role(&self, role_name: &str) -> Result<RoleInfo>;

    /// Replace the trust policy document of a role.
    async fn update_assume_role_policy(&self, role_name: &str, document: &str) -> Result<()>;

    /// Attach a managed policy to a role.
    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()>;
}
