//! 名称服务器与传播状态页面

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::model::App;
use crate::view::components::{debug_log, spinner};
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let ns_height = u16::try_from(session.nameservers.len()).unwrap_or(4);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ns_height + 9), // 名称服务器与状态
            Constraint::Min(3),                // 日志尾部
        ])
        .split(area);

    let mut lines = vec![Line::from("")];

    if let Some(warning) = &session.role_warning {
        lines.push(Line::styled(format!("  ! {warning}"), Styles::warning()));
        lines.push(Line::from(""));
    }

    lines.push(Line::raw(format!(
        "  Set these nameservers for {} at your registrar:",
        session.root_domain
    )));
    lines.push(Line::from(""));
    for ns in &session.nameservers {
        lines.push(Line::styled(format!("    {ns}"), Styles::value()));
    }
    lines.push(Line::from(""));

    let status = if session.propagated {
        Line::styled("  ✓ Propagated", Styles::success())
    } else if session.checking {
        Line::from(vec![
            Span::styled(format!("  {} ", spinner::frame(app.spinner)), Styles::value()),
            Span::raw("Checking public DNS..."),
        ])
    } else {
        Line::styled(
            format!(
                "  Waiting for propagation ({} check{} so far)",
                session.checks,
                if session.checks == 1 { "" } else { "s" }
            ),
            Styles::warning(),
        )
    };
    lines.push(status);

    if !session.observed_nameservers.is_empty() {
        lines.push(Line::styled(
            format!(
                "  Public DNS currently returns: {}",
                session.observed_nameservers.join(", ")
            ),
            Styles::muted(),
        ));
    }
    if let Some(source) = &session.last_source {
        let mut text = format!("  Source: {source}");
        if !session.cache_ttl.is_zero() {
            text.push_str(&format!(" (cached up to {}s)", session.cache_ttl.as_secs()));
        }
        lines.push(Line::styled(text, Styles::muted()));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        layout[0],
    );
    debug_log::render_tail(app, frame, layout[1]);
}
