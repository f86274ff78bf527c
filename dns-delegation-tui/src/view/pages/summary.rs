//! 完成 / 现有配置 / 错误页面

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::model::{App, WizardState};
use crate::view::theme::Styles;

use super::setup::field;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let lines = match &app.state {
        WizardState::Error(message) => error_lines(message),
        WizardState::DnsDetails => details_lines(app),
        _ => complete_lines(app),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn root_fields(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    let mut lines = vec![
        field("Domain", &session.root_domain),
        field("Account", &session.root_account_id),
        field("Zone ID", &session.zone_id),
        field("Role", &session.delegation_role_arn),
    ];
    if let Some(profile) = &session.root_profile {
        lines.push(field("Profile", profile));
    }
    lines
}

fn permission_lines(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    if session.permission_by_environment.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(""), Line::styled("  Delegation access", Styles::title())];
    for (env, granted) in &session.permission_by_environment {
        let (mark, style) = if *granted {
            ("✓", Styles::success())
        } else {
            ("✗", Styles::error())
        };
        lines.push(Line::styled(format!("    {mark} {env}"), style));
    }
    lines
}

fn complete_lines(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    let mut lines = vec![
        Line::from(""),
        Line::styled("  ✓ Root DNS setup complete", Styles::success()),
        Line::from(""),
    ];
    lines.extend(root_fields(app));
    if !session.propagated {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "  Nameserver propagation was not confirmed. Run `dns-delegation validate` later.",
            Styles::warning(),
        ));
    }
    lines.extend(permission_lines(app));
    lines.push(Line::from(""));
    lines.push(Line::raw(
        "  Environments can now delegate their subdomains with `dns-delegation delegate`.",
    ));
    lines.push(Line::styled("  Press Enter or q to exit.", Styles::muted()));
    lines
}

fn details_lines(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    let mut lines = vec![Line::from("")];
    lines.extend(root_fields(app));
    lines.push(Line::from(""));
    lines.push(Line::styled("  Nameservers", Styles::title()));
    for ns in &session.nameservers {
        lines.push(Line::styled(format!("    {ns}"), Styles::value()));
    }

    if let Some(config) = &session.existing {
        lines.push(Line::from(""));
        lines.push(Line::styled("  Delegated zones", Styles::title()));
        if config.delegated_zones.is_empty() {
            lines.push(Line::styled("    (none)", Styles::muted()));
        }
        for zone in &config.delegated_zones {
            lines.push(Line::raw(format!(
                "    {}  {}  {}  {}",
                zone.subdomain, zone.account_id, zone.zone_id, zone.status
            )));
        }
    }

    lines.extend(permission_lines(app));
    lines.push(Line::from(""));
    lines.push(Line::styled("  Press Enter or q to exit.", Styles::muted()));
    lines
}

fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::styled("  Setup failed", Styles::error()),
        Line::from(""),
        Line::raw(format!("  {message}")),
        Line::from(""),
        Line::styled(
            "  Press r to start over or q to quit.",
            Styles::muted(),
        ),
    ]
}
