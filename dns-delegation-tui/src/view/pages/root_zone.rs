//! 根区域创建进度页面

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::model::{App, StepStatus, WizardState};
use crate::view::components::spinner;
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let mut lines = vec![
        Line::from(""),
        Line::raw(format!(
            "  Setting up {} in account {}",
            session.root_domain, session.root_account_id
        )),
        Line::from(""),
    ];

    for step in session.steps.iter() {
        let (icon, style) = if step.status == StepStatus::Running {
            (spinner::frame(app.spinner), Styles::value())
        } else {
            Styles::step(step.status)
        };
        let mut spans = vec![
            Span::styled(format!("  {icon} "), style),
            Span::styled(step.label, style),
        ];
        if let Some(detail) = &step.detail {
            spans.push(Span::styled(format!("  {detail}"), Styles::muted()));
        }
        lines.push(Line::from(spans));
    }

    if app.state == WizardState::AwaitingCredentials {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!(
                "  No local AWS profile authenticates as account {}.",
                session.root_account_id
            ),
            Styles::warning(),
        ));
        lines.push(Line::raw(
            "  Add a profile for it to ~/.aws/config (or ~/.aws/credentials) and run",
        ));
        lines.push(Line::raw(
            "  dns-delegation again: the setup resumes where it stopped.",
        ));
        lines.push(Line::from(""));
        lines.push(Line::styled("  Press Enter to exit.", Styles::muted()));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
