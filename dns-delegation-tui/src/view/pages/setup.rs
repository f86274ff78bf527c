//! 域名与根账号输入页面

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::model::{App, WizardState};
use crate::view::components::spinner;
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    match app.state {
        WizardState::CheckExisting => render_loading(app, frame, area),
        WizardState::InputDomain => render_input(
            app,
            frame,
            area,
            &[
                "Enter the root domain to host in Route 53.",
                "Each environment gets a delegated subdomain, e.g. dev.<domain>.",
            ],
            "Domain",
        ),
        WizardState::InputAccountId => render_input(
            app,
            frame,
            area,
            &[
                "Enter the 12-digit AWS account ID that will own the root zone.",
                "A local profile authenticating as this account is looked up next.",
            ],
            "Account ID",
        ),
        WizardState::SelectRootAccount => render_root_account(app, frame, area),
        _ => render_setup_production(app, frame, area),
    }
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let text = if app.session.root_domain.is_empty() {
        "Looking for an existing configuration...".to_string()
    } else {
        format!(
            "Checking the existing configuration for {}...",
            app.session.root_domain
        )
    };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", spinner::frame(app.spinner)), Styles::value()),
            Span::raw(text),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect, intro: &[&str], label: &str) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::try_from(intro.len() + 2).unwrap_or(4)),
            Constraint::Length(3), // 输入框
            Constraint::Min(1),    // 错误提示
        ])
        .split(area);

    let mut lines = vec![Line::from("")];
    lines.extend(
        intro
            .iter()
            .map(|l| Line::styled(format!("  {l}"), Style::default().fg(Color::Gray))),
    );
    frame.render_widget(Paragraph::new(lines), layout[0]);

    let input_area = Rect {
        x: layout[1].x + 2,
        width: layout[1].width.saturating_sub(4).min(70),
        ..layout[1]
    };
    let border = if app.input.error.is_some() {
        Styles::error()
    } else {
        Styles::border_focused()
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input.value()),
        Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(input, input_area);

    if let Some(error) = &app.input.error {
        let error = Paragraph::new(Line::styled(format!("  {error}"), Styles::error()))
            .wrap(Wrap { trim: false });
        frame.render_widget(error, layout[2]);
    }
}

fn render_root_account(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];
    match &app.session.root_environment {
        None => lines.push(Line::from(vec![
            Span::styled(format!("  {} ", spinner::frame(app.spinner)), Styles::value()),
            Span::raw("Loading the production environment..."),
        ])),
        Some(env) => {
            lines.push(Line::raw(
                "  The root zone will be created in the production account:",
            ));
            lines.push(Line::from(""));
            lines.push(field("Account ID", env.account_id.as_deref().unwrap_or("-")));
            lines.push(field(
                "Profile",
                env.credential_profile
                    .as_deref()
                    .unwrap_or("(resolved by account ID)"),
            ));
            if let Some(region) = &env.region {
                lines.push(field("Region", region));
            }
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "  Press Enter to continue or b to change the domain.",
                Styles::muted(),
            ));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_setup_production(app: &App, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::raw(format!(
            "  No production environment file was found for {}.",
            app.session.root_domain
        )),
        Line::from(""),
        Line::raw("  The wizard will:"),
        Line::raw("    1. ask for the root account ID"),
        Line::raw("    2. find a local AWS profile for that account"),
        Line::raw("    3. create prod.yaml, the root hosted zone and the delegation role"),
        Line::from(""),
        Line::styled(
            "  Press Enter to continue or b to change the domain.",
            Styles::muted(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// "  Label:  value" line.
pub fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), Styles::muted()),
        Span::styled(value.to_string(), Styles::value()),
    ])
}
