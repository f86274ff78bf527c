//! 向导状态机的状态定义

/// Wizard states.
///
/// The happy path runs `CheckExisting → InputDomain → SelectRootAccount → CreateRootZone →
/// DisplayNameservers → CheckPermissions → Complete`. `SetupProduction`, `InputAccountId`
/// and `ResolveProfile` form the sub-flow taken when no root environment exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Looking for `dns.yaml` and a resume token.
    CheckExisting,
    /// Typing the root domain.
    InputDomain,
    /// Confirming the root environment's account.
    SelectRootAccount,
    /// No root environment: explain what happens next.
    SetupProduction,
    /// Typing the root account ID.
    InputAccountId,
    /// Finding a credential profile for the root account and writing the root environment.
    ResolveProfile,
    /// No profile matches the root account; the user has to configure one and restart.
    AwaitingCredentials,
    /// Zone, role and first configuration checkpoint.
    CreateRootZone,
    /// Showing the nameservers while polling for propagation.
    DisplayNameservers,
    /// Auditing which environments may assume the delegation role.
    CheckPermissions,
    /// Extending the delegation role's trust policy.
    FixPermissions,
    /// Summary of an existing configuration.
    DnsDetails,
    Complete,
    /// Unrecoverable failure with its cause. Only retry-from-start or quit are possible.
    Error(String),
}

impl WizardState {
    /// 标题栏显示的名称
    pub fn title(&self) -> &'static str {
        match self {
            Self::CheckExisting => "Checking existing setup",
            Self::InputDomain => "Root domain",
            Self::SelectRootAccount => "Root account",
            Self::SetupProduction => "Production setup",
            Self::InputAccountId => "Root account ID",
            Self::ResolveProfile => "Resolving credentials",
            Self::AwaitingCredentials => "Credentials required",
            Self::CreateRootZone => "Creating root zone",
            Self::DisplayNameservers => "Nameservers",
            Self::CheckPermissions => "Delegation permissions",
            Self::FixPermissions => "Fixing permissions",
            Self::DnsDetails => "DNS configuration",
            Self::Complete => "Complete",
            Self::Error(_) => "Error",
        }
    }

    /// Whether printable keys are text input in this state.
    pub fn accepts_text(&self) -> bool {
        matches!(self, Self::InputDomain | Self::InputAccountId)
    }

    /// Whether background work drives this state without user input.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::CheckExisting | Self::ResolveProfile | Self::CreateRootZone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_input_states_take_text() {
        assert!(WizardState::InputDomain.accepts_text());
        assert!(WizardState::InputAccountId.accepts_text());
        assert!(!WizardState::DisplayNameservers.accepts_text());
        assert!(!WizardState::Error("x".to_string()).accepts_text());
    }
}
