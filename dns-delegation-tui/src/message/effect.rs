//! 副作用描述
//!
//! The update layer never performs I/O. It returns [`Effect`] values and the backend
//! runtime executes them off the control loop.

use dns_delegation_core::services::SaveConfigurationRequest;

/// Which configuration checkpoint a save belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// After zone and role creation.
    Zone,
    /// After propagation was confirmed.
    Propagation,
    /// After a permission audit.
    Permissions,
    /// When the wizard completes.
    Completion,
}

/// A unit of asynchronous work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read `dns.yaml` and take the resume token.
    LoadExisting,
    /// Resolve the root profile and read back the configured zone.
    ValidateExisting {
        account_id: String,
        zone_id: String,
        domain: String,
    },
    LoadRootEnvironment,
    ResolveProfile {
        account_id: String,
        explicit: Option<String>,
    },
    EnsureRootEnvironment {
        domain: String,
        account_id: String,
        profile: String,
    },
    CreateRootZone {
        profile: String,
        domain: String,
    },
    /// Trust every delegated environment's account in the delegation role.
    SetupDelegationRole {
        profile: String,
        root_account_id: String,
    },
    SaveConfiguration {
        request: SaveConfigurationRequest,
        checkpoint: Checkpoint,
    },
    CheckPropagation {
        generation: u64,
        domain: String,
        expected: Vec<String>,
    },
    AuditPermissions {
        generation: u64,
        profile: String,
        role_arn: String,
    },
    FixPermissions {
        profile: String,
        role_arn: String,
        missing: Vec<String>,
    },
    SaveResumeToken {
        domain: String,
        account_id: String,
    },
    /// Start the propagation re-check timer. A running timer is kept.
    StartPoller,
    StopPoller,
}
