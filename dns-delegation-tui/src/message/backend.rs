//! 后台任务结果消息
//!
//! Errors are carried as display strings: the wizard only shows them.

use dns_delegation_core::types::{
    DelegationConfig, Environment, PermissionAudit, PermissionStatus, PropagationReport,
    ResumeToken, RoleOutcome, RootZone,
};

use super::Checkpoint;

/// What the wizard finds on start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingSetup {
    pub config: Option<DelegationConfig>,
    pub resume: Option<ResumeToken>,
}

#[derive(Debug, Clone)]
pub enum BackendMessage {
    ExistingLoaded(Result<ExistingSetup, String>),
    /// Root profile and the zone read back from the provider.
    ExistingValidated(Result<(String, RootZone), String>),
    RootEnvironmentLoaded(Result<Option<Environment>, String>),
    /// `Ok(None)` when no local profile authenticates as the root account.
    ProfileResolved(Result<Option<String>, String>),
    /// `Ok(true)` when the root environment file was created.
    RootEnvironmentEnsured(Result<bool, String>),
    ZoneCreated(Result<RootZone, String>),
    RoleEnsured(RoleOutcome),
    ConfigurationSaved {
        checkpoint: Checkpoint,
        result: Result<(), String>,
    },
    /// `generation` is copied from the effect that started the work.
    PropagationChecked {
        generation: u64,
        report: PropagationReport,
    },
    PermissionProgress {
        generation: u64,
        index: usize,
        total: usize,
        status: PermissionStatus,
    },
    PermissionsAudited {
        generation: u64,
        result: Result<PermissionAudit, String>,
    },
    /// ARN of the updated delegation role.
    PermissionsFixed(Result<String, String>),
    ResumeTokenSaved(Result<(), String>),
}
