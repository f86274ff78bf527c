//!
//! src/update/mod.rs
//! Update 层：状态转换
//!
//! `update(app, msg)` 是整个向导唯一修改状态的地方。它是纯函数：
//! 不做任何 I/O，只返回需要执行的 [`Effect`] 列表，由 backend 层的运行时执行，
//! 执行结果再以 `AppMessage::Backend` 的形式送回这里。
//!
//!     input.rs      用户操作（按键产生的消息）
//!     results.rs    后台任务结果
//!

mod input;
mod results;

use crate::message::{AppMessage, Checkpoint, Effect};
use crate::model::{App, WizardSession, WizardState, steps};

/// Effects to run when the wizard starts.
pub fn init(app: &mut App) -> Vec<Effect> {
    app.enter(WizardState::CheckExisting);
    vec![Effect::LoadExisting]
}

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
            stop_poller(app)
        }
        AppMessage::Tick => {
            app.spinner = app.spinner.wrapping_add(1);
            Vec::new()
        }
        AppMessage::PollTick => poll_tick(app),
        AppMessage::ToggleDebug => {
            app.show_debug = !app.show_debug;
            app.scroll = 0;
            Vec::new()
        }
        AppMessage::ScrollUp => {
            app.scroll = app.scroll.saturating_sub(1);
            Vec::new()
        }
        AppMessage::ScrollDown => {
            app.scroll = app.scroll.saturating_add(1);
            Vec::new()
        }
        AppMessage::Backend(result) => results::update(app, result),
        AppMessage::Noop => Vec::new(),
        action => input::update(app, action),
    }
}

/// Timer-driven re-check while waiting for propagation.
fn poll_tick(app: &mut App) -> Vec<Effect> {
    if app.state == WizardState::DisplayNameservers && !app.session.propagated {
        check_now(app)
    } else {
        Vec::new()
    }
}

/// Issue a propagation check unless one is already in flight.
pub(crate) fn check_now(app: &mut App) -> Vec<Effect> {
    if app.session.checking {
        return Vec::new();
    }
    app.session.checking = true;
    vec![Effect::CheckPropagation {
        generation: app.generation,
        domain: app.session.root_domain.clone(),
        expected: app.session.nameservers.clone(),
    }]
}

pub(crate) fn start_poller(app: &mut App) -> Vec<Effect> {
    if app.poller_active {
        return Vec::new();
    }
    app.poller_active = true;
    vec![Effect::StartPoller]
}

pub(crate) fn stop_poller(app: &mut App) -> Vec<Effect> {
    if !app.poller_active {
        return Vec::new();
    }
    app.poller_active = false;
    vec![Effect::StopPoller]
}

/// Enter the error state.
pub(crate) fn fail(app: &mut App, cause: impl Into<String>) -> Vec<Effect> {
    let cause = cause.into();
    log::error!("Wizard failed in {:?}: {cause}", app.state);
    app.session.steps.fail_running(&cause);
    app.session.checking = false;
    app.session.audit_running = false;
    app.enter(WizardState::Error(cause));
    stop_poller(app)
}

/// Start over from `CheckExisting`. The debug log survives the restart.
///
/// Work still in flight for the old session reports an older generation and is ignored.
pub(crate) fn restart(app: &mut App) -> Vec<Effect> {
    app.generation = app.generation.wrapping_add(1);
    let debug_log = std::mem::take(&mut app.session.debug_log);
    app.session = WizardSession::new(app.debug_log_cap);
    app.session.debug_log = debug_log;
    app.input.clear();
    let mut effects = stop_poller(app);
    effects.extend(init(app));
    effects
}

/// Start the root setup sub-flow for `session.root_account_id`.
pub(crate) fn begin_setup(app: &mut App, explicit_profile: Option<String>) -> Vec<Effect> {
    app.session.steps = steps::SetupSteps::default();
    app.session.steps.start(steps::STEP_PROFILE);
    app.enter(WizardState::ResolveProfile);
    vec![Effect::ResolveProfile {
        account_id: app.session.root_account_id.clone(),
        explicit: explicit_profile,
    }]
}

/// Save a configuration checkpoint.
pub(crate) fn save_checkpoint(app: &mut App, checkpoint: Checkpoint) -> Vec<Effect> {
    match app.session.save_request() {
        Some(request) => vec![Effect::SaveConfiguration {
            request,
            checkpoint,
        }],
        None => fail(app, "No credential profile resolved for the root account"),
    }
}

/// Start (or restart) the permission audit.
pub(crate) fn enter_check_permissions(app: &mut App) -> Vec<Effect> {
    let Some(profile) = app.session.root_profile.clone() else {
        return fail(app, "No credential profile resolved for the root account");
    };
    app.enter(WizardState::CheckPermissions);
    app.session.begin_audit();
    vec![Effect::AuditPermissions {
        generation: app.generation,
        profile,
        role_arn: app.session.delegation_role_arn.clone(),
    }]
}

/// Leave the wizard: save and complete, or show details of an existing configuration.
pub(crate) fn complete(app: &mut App) -> Vec<Effect> {
    let mut effects = stop_poller(app);
    if app.session.is_existing() {
        app.enter(WizardState::DnsDetails);
    } else {
        app.enter(WizardState::Complete);
        app.set_status("Saving configuration...");
        effects.extend(save_checkpoint(app, Checkpoint::Completion));
    }
    effects
}
