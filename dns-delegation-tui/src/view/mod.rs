//!
//! src/view/mod.rs
//! View 层：界面渲染
//!
//! 有模块结构：
//!     layout.rs       三层布局：标题栏 + 主内容区 + 状态栏
//!     theme.rs        颜色与样式
//!     components/     调试日志、spinner、状态栏
//!     pages/          每个向导状态对应的页面
//!         setup.rs        域名 / 根账号 / 账号 ID 输入
//!         root_zone.rs    根区域创建步骤
//!         nameservers.rs  名称服务器与传播状态
//!         permissions.rs  委派权限检查与修复
//!         summary.rs      完成、现有配置与错误
//!
//! View 层只读取 App，不修改任何状态。
//!

pub mod components;
mod layout;
pub mod pages;
mod theme;

pub use layout::render;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use dns_delegation_core::types::{
        DelegatedZone, DelegationConfig, DelegationStatus, Environment, PermissionStatus,
        RootAccount,
    };

    use super::render;
    use crate::model::{App, StepStatus, WizardState, steps};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn populated_app() -> App {
        let mut app = App::new(50);
        let session = &mut app.session;
        session.root_domain = "example.com".to_string();
        session.root_account_id = "111111111111".to_string();
        session.root_profile = Some("root".to_string());
        session.zone_id = "ZROOT".to_string();
        session.delegation_role_arn =
            "arn:aws:iam::111111111111:role/dns-delegation-role".to_string();
        session.nameservers = vec![
            "ns-1.awsdns-01.org".to_string(),
            "ns-2.awsdns-02.net".to_string(),
        ];
        session.root_environment = Some(Environment {
            name: "prod".to_string(),
            credential_profile: Some("root".to_string()),
            account_id: Some("111111111111".to_string()),
            region: Some("us-east-1".to_string()),
        });
        session.environments = vec![
            PermissionStatus {
                environment: "dev".to_string(),
                account_id: Some("222222222222".to_string()),
                has_access: true,
            },
            PermissionStatus {
                environment: "staging".to_string(),
                account_id: None,
                has_access: false,
            },
        ];
        session.permission_by_environment = [("dev".to_string(), true), ("staging".to_string(), false)]
            .into_iter()
            .collect();
        session.missing_permissions = std::iter::once("staging".to_string()).collect();
        session.debug_log.push("[12:00:00] checking example.com".to_string());
        session.steps.finish(steps::STEP_PROFILE, StepStatus::Done, Some("root".to_string()));
        session.steps.start(steps::STEP_ZONE);
        app
    }

    #[test]
    fn every_state_renders() {
        let states = [
            WizardState::CheckExisting,
            WizardState::InputDomain,
            WizardState::SelectRootAccount,
            WizardState::SetupProduction,
            WizardState::InputAccountId,
            WizardState::ResolveProfile,
            WizardState::AwaitingCredentials,
            WizardState::CreateRootZone,
            WizardState::DisplayNameservers,
            WizardState::CheckPermissions,
            WizardState::FixPermissions,
            WizardState::DnsDetails,
            WizardState::Complete,
            WizardState::Error("zone creation failed".to_string()),
        ];
        for state in states {
            let mut app = populated_app();
            app.state = state.clone();
            let text = screen(&app);
            assert!(text.contains("DNS Delegation"), "{state:?}");
            assert!(text.contains(state.title()), "{state:?}");
        }
    }

    #[test]
    fn nameservers_page_lists_nameservers() {
        let mut app = populated_app();
        app.state = WizardState::DisplayNameservers;
        let text = screen(&app);
        assert!(text.contains("ns-1.awsdns-01.org"));
        assert!(text.contains("ns-2.awsdns-02.net"));
        assert!(text.contains("Waiting for propagation"));
    }

    #[test]
    fn details_list_delegated_zones() {
        let mut app = populated_app();
        let mut config = DelegationConfig::new(
            "example.com",
            RootAccount {
                account_id: "111111111111".to_string(),
                zone_id: "ZROOT".to_string(),
                delegation_role_arn: String::new(),
            },
        );
        config.upsert_delegated_zone(DelegatedZone {
            subdomain: "dev.example.com".to_string(),
            account_id: "222222222222".to_string(),
            zone_id: "ZDEV".to_string(),
            ns_records: Vec::new(),
            status: DelegationStatus::Active,
        });
        app.session.existing = Some(config);
        app.state = WizardState::DnsDetails;
        let text = screen(&app);
        assert!(text.contains("dev.example.com"));
        assert!(text.contains("active"));
    }

    #[test]
    fn debug_log_takes_the_body() {
        let mut app = populated_app();
        app.state = WizardState::DisplayNameservers;
        app.show_debug = true;
        let text = screen(&app);
        assert!(text.contains("Debug log (1/50 lines)"));
        assert!(text.contains("checking example.com"));
    }
}
