//! 委派权限检查页面

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
};

use crate::model::{App, WizardState};
use crate::view::components::spinner;
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 说明
            Constraint::Min(3),    // 环境表格
            Constraint::Length(4), // 状态 / 操作
        ])
        .split(area);

    let intro = vec![
        Line::from(""),
        Line::raw(format!(
            "  Environments that may assume {}",
            if session.delegation_role_arn.is_empty() {
                "the delegation role"
            } else {
                session.delegation_role_arn.as_str()
            }
        )),
    ];
    frame.render_widget(Paragraph::new(intro), layout[0]);

    let rows = session.environments.iter().map(|status| {
        let (mark, style) = if status.has_access {
            ("✓ access", Styles::success())
        } else {
            ("✗ missing", Styles::error())
        };
        Row::new(vec![
            Cell::from(format!("  {}", status.environment)),
            Cell::from(status.account_id.clone().unwrap_or_else(|| "unknown".to_string())),
            Cell::from(Span::styled(mark, style)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["  Environment", "Account", "Delegation"]).style(Styles::title()),
    );
    frame.render_widget(table, layout[1]);

    frame.render_widget(
        Paragraph::new(footer(app)).wrap(Wrap { trim: false }),
        layout[2],
    );
}

fn footer(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    let busy = |text: String| {
        Line::from(vec![
            Span::styled(format!("  {} ", spinner::frame(app.spinner)), Styles::value()),
            Span::raw(text),
        ])
    };

    if app.state == WizardState::FixPermissions {
        return match &session.fix_error {
            None => vec![busy(format!(
                "Adding {} to the trust policy...",
                join(session.missing_permissions.iter())
            ))],
            Some(error) => vec![
                Line::styled(format!("  Fix failed: {error}"), Styles::error()),
                Line::styled(
                    "  Press r to retry, s to skip or b to go back.",
                    Styles::muted(),
                ),
            ],
        };
    }

    if session.audit_running {
        let progress = match session.audit_total {
            Some(total) => format!(
                "Checking environments ({}/{total})...",
                session.environments.len()
            ),
            None => "Listing environments...".to_string(),
        };
        return vec![busy(progress)];
    }

    if session.environments.is_empty() {
        return vec![Line::styled(
            "  No delegated environments found (dev.yaml, staging.yaml).",
            Styles::muted(),
        )];
    }

    if session.missing_permissions.is_empty() {
        vec![Line::styled(
            "  ✓ Every environment can manage its delegation.",
            Styles::success(),
        )]
    } else {
        vec![
            Line::styled(
                format!(
                    "  Missing access: {}",
                    join(session.missing_permissions.iter())
                ),
                Styles::warning(),
            ),
            Line::styled(
                "  Press y to add them to the trust policy, or Enter to finish without.",
                Styles::muted(),
            ),
        ]
    }
}

fn join<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(", ")
}
