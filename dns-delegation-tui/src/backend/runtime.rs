//! Effect 执行器
//!
//! Runs the effects returned by the update layer on the tokio runtime and reports their
//! results back to the main loop as `AppMessage::Backend`.

use std::time::Duration;

use dns_delegation_core::CoreError;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use super::services::CoreServices;
use crate::message::{AppMessage, BackendMessage, Effect, ExistingSetup};

/// Effect 执行器
pub struct EffectRuntime {
    services: CoreServices,
    tx: UnboundedSender<AppMessage>,
    poll_interval: Duration,
    /// 传播轮询任务，同一时刻至多一个
    poller: Option<JoinHandle<()>>,
}

impl EffectRuntime {
    pub fn new(
        services: CoreServices,
        tx: UnboundedSender<AppMessage>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            services,
            tx,
            poll_interval,
            poller: None,
        }
    }

    pub fn dispatch_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    pub fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::StartPoller => self.start_poller(),
            Effect::StopPoller => self.stop_poller(),
            effect => {
                let services = self.services.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if let Some(msg) = execute(&services, effect, &tx).await {
                        // 接收端已关闭说明应用正在退出
                        let _ = tx.send(AppMessage::Backend(msg));
                    }
                });
            }
        }
    }

    /// Whether the propagation poller is running.
    pub fn poller_running(&self) -> bool {
        self.poller.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn start_poller(&mut self) {
        if self.poller_running() {
            return;
        }
        let tx = self.tx.clone();
        let period = self.poll_interval;
        log::debug!("Starting propagation poller every {period:?}");
        self.poller = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if tx.send(AppMessage::PollTick).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            log::debug!("Stopping propagation poller");
            handle.abort();
        }
    }

    /// 停止所有后台定时任务
    pub fn shutdown(&mut self) {
        self.stop_poller();
    }
}

impl Drop for EffectRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Accounts of every delegated environment that resolves to one.
async fn delegated_accounts(services: &CoreServices) -> Vec<String> {
    let permissions = services.permissions();
    let environments = match permissions.delegated_environments().await {
        Ok(environments) => environments,
        Err(e) => {
            log::warn!("Could not list environments for the trust policy: {e}");
            return Vec::new();
        }
    };
    let mut accounts = Vec::with_capacity(environments.len());
    for env in &environments {
        if let Some(id) = permissions.resolve_account_id(env).await {
            accounts.push(id);
        }
    }
    accounts
}

/// Run one effect to completion.
///
/// Poller effects never reach a worker task; they yield `None`.
async fn execute(
    services: &CoreServices,
    effect: Effect,
    tx: &UnboundedSender<AppMessage>,
) -> Option<BackendMessage> {
    let msg = match effect {
        Effect::LoadExisting => {
            let configuration = services.configuration();
            let result = async {
                let resume = configuration.take_resume_token().await?;
                let config = configuration.load_existing().await?;
                Ok::<_, CoreError>(ExistingSetup { config, resume })
            }
            .await;
            BackendMessage::ExistingLoaded(result.map_err(|e| e.to_string()))
        }
        Effect::ValidateExisting {
            account_id,
            zone_id,
            domain,
        } => {
            let result = async {
                let profile = services
                    .context()
                    .credentials
                    .require_profile_for_account(&account_id)
                    .await?;
                let zone = services
                    .zones()
                    .validate_existing_zone(&profile, &zone_id, &domain)
                    .await?;
                Ok::<_, CoreError>((profile, zone))
            }
            .await;
            BackendMessage::ExistingValidated(result.map_err(|e| e.to_string()))
        }
        Effect::LoadRootEnvironment => BackendMessage::RootEnvironmentLoaded(
            services
                .configuration()
                .load_root_environment()
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::ResolveProfile {
            account_id,
            explicit,
        } => {
            let result = match services
                .zones()
                .resolve_root_profile(explicit.as_deref(), &account_id)
                .await
            {
                Ok(profile) => Ok(Some(profile)),
                Err(CoreError::ProfileNotFound(_)) => Ok(None),
                Err(e) => Err(e.to_string()),
            };
            BackendMessage::ProfileResolved(result)
        }
        Effect::EnsureRootEnvironment {
            domain,
            account_id,
            profile,
        } => BackendMessage::RootEnvironmentEnsured(
            services
                .configuration()
                .ensure_root_environment(&domain, &account_id, &profile)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::CreateRootZone { profile, domain } => BackendMessage::ZoneCreated(
            services
                .zones()
                .create_root_zone(&profile, &domain)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::SetupDelegationRole {
            profile,
            root_account_id,
        } => {
            let trusted = delegated_accounts(services).await;
            BackendMessage::RoleEnsured(
                services
                    .roles()
                    .ensure_delegation_role(&profile, &root_account_id, &trusted)
                    .await,
            )
        }
        Effect::SaveConfiguration {
            request,
            checkpoint,
        } => BackendMessage::ConfigurationSaved {
            checkpoint,
            result: services
                .configuration()
                .save_configuration(&request)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
        },
        Effect::CheckPropagation {
            generation,
            domain,
            expected,
        } => BackendMessage::PropagationChecked {
            generation,
            report: services.verifier().check_propagation(&domain, &expected).await,
        },
        Effect::AuditPermissions {
            generation,
            profile,
            role_arn,
        } => {
            let progress = tx.clone();
            let result = services
                .permissions()
                .audit(&profile, &role_arn, move |index, total, status| {
                    let _ = progress.send(AppMessage::Backend(BackendMessage::PermissionProgress {
                        generation,
                        index,
                        total,
                        status: status.clone(),
                    }));
                })
                .await;
            BackendMessage::PermissionsAudited {
                generation,
                result: result.map_err(|e| e.to_string()),
            }
        }
        Effect::FixPermissions {
            profile,
            role_arn,
            missing,
        } => BackendMessage::PermissionsFixed(
            services
                .permissions()
                .fix_permissions(&profile, &role_arn, &missing)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::SaveResumeToken { domain, account_id } => BackendMessage::ResumeTokenSaved(
            services
                .configuration()
                .save_resume_token(&domain, &account_id)
                .await
                .map_err(|e| e.to_string()),
        ),
        Effect::StartPoller | Effect::StopPoller => return None,
    };
    Some(msg)
}
