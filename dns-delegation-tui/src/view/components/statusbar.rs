//! 底部状态栏组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::event::keymap::{DefaultKeymap, KeyBinding};
use crate::model::{App, WizardState};
use crate::view::theme::Styles;

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(key.clone(), Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 状态消息显示在右侧
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

fn hint(binding: &KeyBinding, desc: &'static str) -> (String, &'static str) {
    (binding.label(), desc)
}

/// 根据当前状态生成快捷键提示
pub fn get_hints(app: &App) -> Vec<(String, &'static str)> {
    let mut hints = Vec::new();

    if app.show_debug {
        hints.push(("↑↓".to_string(), "Scroll"));
        hints.push(hint(&DefaultKeymap::TOGGLE_DEBUG, "Close log"));
        hints.push(hint(&DefaultKeymap::QUIT, "Quit"));
        return hints;
    }

    match &app.state {
        WizardState::InputDomain | WizardState::InputAccountId => {
            hints.push(hint(&DefaultKeymap::ADVANCE, "Continue"));
            if app.state == WizardState::InputAccountId {
                hints.push(hint(&DefaultKeymap::ESCAPE, "Back"));
            }
            hints.push(hint(&DefaultKeymap::FORCE_QUIT, "Quit"));
            return hints;
        }
        WizardState::SelectRootAccount | WizardState::SetupProduction => {
            hints.push(hint(&DefaultKeymap::ADVANCE, "Continue"));
            hints.push(hint(&DefaultKeymap::BACK, "Back"));
        }
        WizardState::DisplayNameservers => {
            hints.push(hint(&DefaultKeymap::REFRESH, "Check now"));
            hints.push(hint(&DefaultKeymap::SKIP, "Skip"));
            if app.session.propagated {
                hints.push(hint(&DefaultKeymap::ADVANCE, "Continue"));
            }
        }
        WizardState::CheckPermissions if !app.session.audit_running => {
            if !app.session.missing_permissions.is_empty() {
                hints.push(hint(&DefaultKeymap::FIX, "Fix"));
            }
            hints.push(hint(&DefaultKeymap::REFRESH, "Re-check"));
            hints.push(hint(&DefaultKeymap::ADVANCE, "Continue"));
        }
        WizardState::FixPermissions if app.session.fix_error.is_some() => {
            hints.push(hint(&DefaultKeymap::REFRESH, "Retry"));
            hints.push(hint(&DefaultKeymap::SKIP, "Skip"));
            hints.push(hint(&DefaultKeymap::BACK, "Back"));
        }
        WizardState::AwaitingCredentials | WizardState::Complete | WizardState::DnsDetails => {
            hints.push(hint(&DefaultKeymap::ADVANCE, "Exit"));
        }
        WizardState::Error(_) => {
            hints.push(hint(&DefaultKeymap::REFRESH, "Retry"));
        }
        _ => {}
    }

    hints.push(hint(&DefaultKeymap::TOGGLE_DEBUG, "Debug log"));
    hints.push(hint(&DefaultKeymap::QUIT, "Quit"));
    hints
}
