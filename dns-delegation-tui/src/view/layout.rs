//! 主布局渲染

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{App, WizardState};

use super::components;
use super::pages;
use super::theme::{Styles, colors};

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 三层布局：标题栏 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);

    if app.show_debug {
        components::debug_log::render_full(app, frame, main_layout[1]);
    } else {
        render_page_content(app, frame, main_layout[1]);
    }

    components::statusbar::render(app, frame, main_layout[2]);
}

/// 渲染标题栏
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let mut title = format!(" DNS Delegation v{}", env!("CARGO_PKG_VERSION"));
    if !app.session.root_domain.is_empty() {
        title.push_str(&format!("  ·  {}", app.session.root_domain));
    }
    let paragraph =
        Paragraph::new(title).style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(paragraph, area);
}

/// 根据当前状态渲染内容
fn render_page_content(app: &App, frame: &mut Frame, area: Rect) {
    let border_style = if matches!(app.state, WizardState::Error(_)) {
        Styles::error()
    } else {
        Styles::border_focused()
    };

    let block = Block::default()
        .title(format!(" {} ", app.state.title()))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match &app.state {
        WizardState::CheckExisting
        | WizardState::InputDomain
        | WizardState::SelectRootAccount
        | WizardState::SetupProduction
        | WizardState::InputAccountId => pages::setup::render(app, frame, inner_area),
        WizardState::ResolveProfile
        | WizardState::AwaitingCredentials
        | WizardState::CreateRootZone => pages::root_zone::render(app, frame, inner_area),
        WizardState::DisplayNameservers => pages::nameservers::render(app, frame, inner_area),
        WizardState::CheckPermissions | WizardState::FixPermissions => {
            pages::permissions::render(app, frame, inner_area);
        }
        WizardState::DnsDetails | WizardState::Complete | WizardState::Error(_) => {
            pages::summary::render(app, frame, inner_area);
        }
    }
}
