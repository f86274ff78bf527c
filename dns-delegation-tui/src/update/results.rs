//! 后台任务结果
//!
//! Results that arrive after the wizard has moved on are dropped: by state for one-shot
//! steps, by session generation for propagation checks and audits, which can still be in
//! flight when the user restarts from the error state.

use dns_delegation_core::types::{PropagationReport, RoleOutcome, is_valid_account_id};

use super::{
    begin_setup, check_now, enter_check_permissions, fail, save_checkpoint, start_poller,
    stop_poller,
};
use crate::message::{BackendMessage, Checkpoint, Effect, ExistingSetup};
use crate::model::{App, StepStatus, WizardState, steps};

pub fn update(app: &mut App, msg: BackendMessage) -> Vec<Effect> {
    match msg {
        BackendMessage::ExistingLoaded(result) => {
            expect_state(app, &WizardState::CheckExisting, |app| match result {
                Ok(setup) => existing_loaded(app, setup),
                Err(e) => fail(app, e),
            })
        }
        BackendMessage::ExistingValidated(result) => {
            expect_state(app, &WizardState::CheckExisting, |app| match result {
                Ok((profile, zone)) => {
                    app.session.root_profile = Some(profile);
                    app.session.nameservers = zone.nameservers;
                    app.set_status("Checking propagation...");
                    check_now(app)
                }
                Err(e) => fail(app, format!("Existing configuration is invalid: {e}")),
            })
        }
        BackendMessage::RootEnvironmentLoaded(result) => {
            expect_state(app, &WizardState::SelectRootAccount, |app| match result {
                Ok(Some(env))
                    if env
                        .account_id
                        .as_deref()
                        .is_some_and(is_valid_account_id) =>
                {
                    app.session.root_account_id = env.account_id.clone().unwrap_or_default();
                    app.session.root_environment = Some(env);
                    Vec::new()
                }
                Ok(_) => {
                    app.enter(WizardState::SetupProduction);
                    Vec::new()
                }
                Err(e) => fail(app, e),
            })
        }
        BackendMessage::ProfileResolved(result) => {
            expect_state(app, &WizardState::ResolveProfile, |app| profile_resolved(app, result))
        }
        BackendMessage::ResumeTokenSaved(result) => {
            expect_state(app, &WizardState::AwaitingCredentials, |app| {
                if let Err(e) = result {
                    log::warn!("Could not save resume token: {e}");
                    app.set_status(format!("Could not save resume token: {e}"));
                }
                app.exit_message = Some(format!(
                    "No AWS profile authenticates as account {}. Configure one and run \
                     dns-delegation again to resume the setup of {}.",
                    app.session.root_account_id, app.session.root_domain
                ));
                Vec::new()
            })
        }
        BackendMessage::RootEnvironmentEnsured(result) => {
            expect_state(app, &WizardState::ResolveProfile, |app| {
                match result {
                    Ok(true) => app.session.steps.finish(
                        steps::STEP_ENV_FILE,
                        StepStatus::Done,
                        Some("created".to_string()),
                    ),
                    Ok(false) => app.session.steps.finish(
                        steps::STEP_ENV_FILE,
                        StepStatus::Skipped,
                        Some("already exists".to_string()),
                    ),
                    Err(e) => {
                        log::warn!("Could not create the root environment file: {e}");
                        app.session
                            .steps
                            .finish(steps::STEP_ENV_FILE, StepStatus::Warning, Some(e));
                    }
                }
                let Some(profile) = app.session.root_profile.clone() else {
                    return fail(app, "No credential profile resolved for the root account");
                };
                app.session.steps.start(steps::STEP_ZONE);
                app.enter(WizardState::CreateRootZone);
                vec![Effect::CreateRootZone {
                    profile,
                    domain: app.session.root_domain.clone(),
                }]
            })
        }
        BackendMessage::ZoneCreated(result) => {
            expect_state(app, &WizardState::CreateRootZone, |app| match result {
                Ok(zone) => {
                    app.session.steps.finish(
                        steps::STEP_ZONE,
                        StepStatus::Done,
                        Some(zone.zone_id.clone()),
                    );
                    app.session.root_domain = zone.domain;
                    app.session.zone_id = zone.zone_id;
                    app.session.nameservers = zone.nameservers;
                    app.session.steps.start(steps::STEP_ROLE);
                    let Some(profile) = app.session.root_profile.clone() else {
                        return fail(app, "No credential profile resolved for the root account");
                    };
                    vec![Effect::SetupDelegationRole {
                        profile,
                        root_account_id: app.session.root_account_id.clone(),
                    }]
                }
                Err(e) => fail(app, format!("Failed to create hosted zone: {e}")),
            })
        }
        BackendMessage::RoleEnsured(outcome) => {
            expect_state(app, &WizardState::CreateRootZone, |app| role_ensured(app, outcome))
        }
        BackendMessage::ConfigurationSaved { checkpoint, result } => {
            configuration_saved(app, checkpoint, result)
        }
        BackendMessage::PropagationChecked { generation, report } => {
            if !is_current(app, generation) {
                return Vec::new();
            }
            propagation_checked(app, report)
        }
        BackendMessage::PermissionProgress {
            generation,
            index,
            total,
            status,
        } => {
            if is_current(app, generation)
                && app.state == WizardState::CheckPermissions
                && app.session.audit_running
            {
                app.session.apply_audit_progress(index, total, status);
            }
            Vec::new()
        }
        BackendMessage::PermissionsAudited { generation, result } => {
            if !is_current(app, generation) {
                return Vec::new();
            }
            expect_state(app, &WizardState::CheckPermissions, |app| match result {
                Ok(audit) => {
                    app.session.apply_audit(&audit);
                    if app.session.missing_permissions.is_empty() {
                        app.set_status("All environments can use the delegation role");
                    } else {
                        app.set_status(format!(
                            "{} environment(s) missing access. Press y to fix or s to skip.",
                            app.session.missing_permissions.len()
                        ));
                    }
                    if app.session.is_existing() {
                        Vec::new()
                    } else {
                        save_checkpoint(app, Checkpoint::Permissions)
                    }
                }
                Err(e) => fail(app, format!("Permission audit failed: {e}")),
            })
        }
        BackendMessage::PermissionsFixed(result) => {
            expect_state(app, &WizardState::FixPermissions, |app| match result {
                Ok(arn) => {
                    app.session.delegation_role_arn = arn;
                    app.session.role_warning = None;
                    enter_check_permissions(app)
                }
                Err(e) => {
                    log::warn!("Fixing permissions failed: {e}");
                    app.session.fix_error = Some(e);
                    Vec::new()
                }
            })
        }
    }
}

/// The result belongs to the running session, not one abandoned by a restart.
fn is_current(app: &App, generation: u64) -> bool {
    if generation == app.generation {
        true
    } else {
        log::debug!(
            "Dropping result of session {generation}, current session is {}",
            app.generation
        );
        false
    }
}

/// Run `f` only while the wizard is in `state`.
fn expect_state(
    app: &mut App,
    state: &WizardState,
    f: impl FnOnce(&mut App) -> Vec<Effect>,
) -> Vec<Effect> {
    if &app.state == state {
        f(app)
    } else {
        log::debug!("Dropping result for {state:?} while in {:?}", app.state);
        Vec::new()
    }
}

fn existing_loaded(app: &mut App, setup: ExistingSetup) -> Vec<Effect> {
    if let Some(token) = setup.resume {
        app.session.root_domain = token.domain;
        app.session.root_account_id = token.account_id;
        return begin_setup(app, None);
    }

    match setup.config {
        Some(config) => {
            let effect = Effect::ValidateExisting {
                account_id: config.root_account.account_id.clone(),
                zone_id: config.root_account.zone_id.clone(),
                domain: config.root_domain.clone(),
            };
            app.set_status(format!("Found configuration for {}", config.root_domain));
            app.session.load_existing(config);
            vec![effect]
        }
        None => {
            app.enter(WizardState::InputDomain);
            Vec::new()
        }
    }
}

fn profile_resolved(app: &mut App, result: Result<Option<String>, String>) -> Vec<Effect> {
    match result {
        Ok(Some(profile)) => {
            app.session.steps.finish(
                steps::STEP_PROFILE,
                StepStatus::Done,
                Some(profile.clone()),
            );
            app.session.root_profile = Some(profile.clone());
            app.session.steps.start(steps::STEP_ENV_FILE);
            vec![Effect::EnsureRootEnvironment {
                domain: app.session.root_domain.clone(),
                account_id: app.session.root_account_id.clone(),
                profile,
            }]
        }
        Ok(None) => {
            app.session.steps.finish(
                steps::STEP_PROFILE,
                StepStatus::Failed,
                Some(format!(
                    "no profile for account {}",
                    app.session.root_account_id
                )),
            );
            app.enter(WizardState::AwaitingCredentials);
            vec![Effect::SaveResumeToken {
                domain: app.session.root_domain.clone(),
                account_id: app.session.root_account_id.clone(),
            }]
        }
        Err(e) => fail(app, e),
    }
}

fn role_ensured(app: &mut App, outcome: RoleOutcome) -> Vec<Effect> {
    app.session.delegation_role_arn = outcome.arn;
    if outcome.placeholder {
        app.session
            .steps
            .finish(steps::STEP_ROLE, StepStatus::Warning, outcome.warning.clone());
        app.session.role_warning = outcome
            .warning
            .or_else(|| Some("Delegation role is a placeholder".to_string()));
    } else {
        app.session.steps.finish(
            steps::STEP_ROLE,
            StepStatus::Done,
            Some(app.session.delegation_role_arn.clone()),
        );
        app.session.role_warning = None;
    }
    app.session.steps.start(steps::STEP_SAVE);
    save_checkpoint(app, Checkpoint::Zone)
}

fn configuration_saved(
    app: &mut App,
    checkpoint: Checkpoint,
    result: Result<(), String>,
) -> Vec<Effect> {
    match checkpoint {
        Checkpoint::Zone => expect_state(app, &WizardState::CreateRootZone, |app| match result {
            Ok(()) => {
                app.session
                    .steps
                    .finish(steps::STEP_SAVE, StepStatus::Done, None);
                app.enter(WizardState::DisplayNameservers);
                let mut effects = check_now(app);
                effects.extend(start_poller(app));
                effects
            }
            Err(e) => fail(app, format!("Failed to save configuration: {e}")),
        }),
        Checkpoint::Propagation | Checkpoint::Permissions => {
            if let Err(e) = result {
                log::warn!("Configuration checkpoint failed: {e}");
                app.set_status(format!("Could not save configuration: {e}"));
            }
            Vec::new()
        }
        Checkpoint::Completion => expect_state(app, &WizardState::Complete, |app| match result {
            Ok(()) => {
                app.set_status("Configuration saved to dns.yaml");
                Vec::new()
            }
            Err(e) => fail(app, format!("Failed to save configuration: {e}")),
        }),
    }
}

fn propagation_checked(app: &mut App, report: PropagationReport) -> Vec<Effect> {
    app.session.checking = false;
    if !matches!(
        app.state,
        WizardState::CheckExisting | WizardState::DisplayNameservers
    ) {
        return Vec::new();
    }

    app.session.debug_log.extend(report.log);
    app.session.observed_nameservers = report.observed;
    app.session.cache_ttl = report.ttl;
    app.session.last_source = report.source;
    app.session.checks = app.session.checks.saturating_add(1);

    if report.propagated {
        app.session.propagated = true;
        let mut effects = stop_poller(app);
        effects.extend(enter_check_permissions(app));
        if !app.session.is_existing() {
            effects.extend(save_checkpoint(app, Checkpoint::Propagation));
        }
        effects
    } else {
        if app.state == WizardState::CheckExisting {
            app.enter(WizardState::DisplayNameservers);
        }
        start_poller(app)
    }
}
