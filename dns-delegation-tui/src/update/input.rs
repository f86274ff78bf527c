//! 用户操作

use dns_delegation_core::types::is_valid_account_id;
use dns_delegation_toolbox::{is_domain_char, validate_domain};

use super::{begin_setup, check_now, complete, enter_check_permissions, fail, restart};
use crate::message::{AppMessage, Effect};
use crate::model::{App, WizardState};

const MAX_DOMAIN_LEN: usize = 253;
const ACCOUNT_ID_LEN: usize = 12;

pub fn update(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match app.state.clone() {
        WizardState::InputDomain => input_domain(app, msg),
        WizardState::SelectRootAccount => select_root_account(app, msg),
        WizardState::SetupProduction => match msg {
            AppMessage::Advance => {
                app.input.clear();
                app.enter(WizardState::InputAccountId);
                Vec::new()
            }
            AppMessage::Back => back_to_domain(app),
            _ => Vec::new(),
        },
        WizardState::InputAccountId => input_account_id(app, msg),
        WizardState::AwaitingCredentials | WizardState::Complete | WizardState::DnsDetails => {
            if matches!(msg, AppMessage::Advance) {
                app.should_quit = true;
            }
            Vec::new()
        }
        WizardState::DisplayNameservers => display_nameservers(app, msg),
        WizardState::CheckPermissions => check_permissions(app, msg),
        WizardState::FixPermissions => fix_permissions(app, msg),
        WizardState::Error(_) => match msg {
            AppMessage::Refresh | AppMessage::Advance => restart(app),
            _ => Vec::new(),
        },
        WizardState::CheckExisting | WizardState::ResolveProfile | WizardState::CreateRootZone => {
            Vec::new()
        }
    }
}

fn input_domain(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::Input(c) => {
            app.input.push(c, is_domain_char, MAX_DOMAIN_LEN);
            Vec::new()
        }
        AppMessage::Backspace => {
            app.input.backspace();
            Vec::new()
        }
        AppMessage::Advance => match validate_domain(app.input.value()) {
            Ok(domain) => {
                app.session.root_domain = domain;
                app.session.root_environment = None;
                app.input.clear();
                app.enter(WizardState::SelectRootAccount);
                vec![Effect::LoadRootEnvironment]
            }
            Err(e) => {
                app.input.error = Some(e.to_string());
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

fn back_to_domain(app: &mut App) -> Vec<Effect> {
    app.input.set(app.session.root_domain.clone());
    app.enter(WizardState::InputDomain);
    Vec::new()
}

fn select_root_account(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::Advance => {
            let Some(env) = app.session.root_environment.clone() else {
                // Still loading.
                return Vec::new();
            };
            begin_setup(app, env.credential_profile.filter(|p| !p.is_empty()))
        }
        AppMessage::Back => back_to_domain(app),
        _ => Vec::new(),
    }
}

fn input_account_id(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::Input(c) => {
            app.input.push(c, |c| c.is_ascii_digit(), ACCOUNT_ID_LEN);
            Vec::new()
        }
        AppMessage::Backspace => {
            app.input.backspace();
            Vec::new()
        }
        AppMessage::Advance => {
            let account_id = app.input.value().to_string();
            if !is_valid_account_id(&account_id) {
                app.input.error = Some("Account ID must be exactly 12 digits".to_string());
                return Vec::new();
            }
            app.session.root_account_id = account_id;
            app.input.clear();
            begin_setup(app, None)
        }
        AppMessage::Back => {
            app.input.clear();
            app.enter(WizardState::SetupProduction);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn display_nameservers(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::Refresh => {
            let effects = check_now(app);
            if effects.is_empty() {
                app.set_status("A propagation check is already running");
            }
            effects
        }
        AppMessage::Advance => {
            if app.session.propagated {
                enter_check_permissions(app)
            } else {
                app.set_status("Waiting for propagation. Press r to check now or s to skip.");
                Vec::new()
            }
        }
        AppMessage::Skip => {
            log::info!("Propagation wait skipped for {}", app.session.root_domain);
            complete(app)
        }
        _ => Vec::new(),
    }
}

fn check_permissions(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    if app.session.audit_running {
        return Vec::new();
    }
    match msg {
        AppMessage::Refresh => enter_check_permissions(app),
        AppMessage::FixPermissions => {
            if app.session.missing_permissions.is_empty() {
                app.set_status("Every environment already has access");
                return Vec::new();
            }
            start_fix(app)
        }
        AppMessage::Advance | AppMessage::Skip => complete(app),
        _ => Vec::new(),
    }
}

fn fix_permissions(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    // Input is only accepted once a fix attempt has failed.
    if app.session.fix_error.is_none() {
        return Vec::new();
    }
    match msg {
        AppMessage::Refresh | AppMessage::FixPermissions => start_fix(app),
        AppMessage::Skip => complete(app),
        AppMessage::Back => {
            app.session.fix_error = None;
            app.enter(WizardState::CheckPermissions);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn start_fix(app: &mut App) -> Vec<Effect> {
    let Some(profile) = app.session.root_profile.clone() else {
        return fail(app, "No credential profile resolved for the root account");
    };
    app.session.fix_error = None;
    app.enter(WizardState::FixPermissions);
    vec![Effect::FixPermissions {
        profile,
        role_arn: app.session.delegation_role_arn.clone(),
        missing: app.session.missing_permissions.iter().cloned().collect(),
    }]
}
