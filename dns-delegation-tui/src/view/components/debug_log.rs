//! 传播检查调试日志

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::model::App;
use crate::view::theme::Styles;

/// 全屏调试日志，支持滚动
pub fn render_full(app: &App, frame: &mut Frame, area: Rect) {
    let log = &app.session.debug_log;
    let block = Block::default()
        .title(format!(" Debug log ({}/{} lines) ", log.len(), log.cap()))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused());

    let lines: Vec<Line> = if log.is_empty() {
        vec![Line::styled("No propagation checks yet.", Styles::muted())]
    } else {
        log.iter().map(|l| Line::raw(l.as_str())).collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

/// 最近的几行日志
pub fn render_tail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Last check ")
        .title_style(Styles::muted())
        .borders(Borders::TOP)
        .border_style(Styles::border());

    let visible = usize::from(area.height.saturating_sub(1));
    let log = &app.session.debug_log;
    let lines: Vec<Line> = log
        .iter()
        .skip(log.len().saturating_sub(visible))
        .map(|l| Line::styled(l.as_str(), Styles::muted()))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
