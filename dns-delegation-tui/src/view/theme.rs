//! 主题和样式定义

use ratatui::style::{Color, Modifier, Style};

use crate::model::StepStatus;

/// 向导只有一套深色配色
const PALETTE: ThemeColors = ThemeColors {
    fg: Color::Rgb(212, 212, 212),
    border: Color::Rgb(62, 62, 62),
    border_focused: Color::Rgb(0, 122, 204),
    highlight: Color::Rgb(0, 122, 204),
    selected_fg: Color::White,
    running: Color::Yellow,
    success: Color::Rgb(78, 201, 176),
    warning: Color::Rgb(206, 145, 120),
    error: Color::Rgb(244, 135, 113),
    muted: Color::Rgb(128, 128, 128),
};

/// 获取颜色方案
pub fn colors() -> ThemeColors {
    PALETTE
}

/// 主题颜色
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    /// 标题栏和状态栏背景
    pub highlight: Color,
    pub selected_fg: Color,
    /// 进行中的步骤、spinner
    pub running: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

/// 常用样式
pub struct Styles;

impl Styles {
    /// 普通边框样式
    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    /// 焦点边框样式
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// 标题样式
    pub fn title() -> Style {
        Style::default().fg(colors().fg).add_modifier(Modifier::BOLD)
    }

    /// 状态栏样式
    pub fn statusbar() -> Style {
        Style::default().bg(colors().highlight).fg(Color::White)
    }

    /// 快捷键提示样式
    pub fn hint_key() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// 快捷键说明样式
    pub fn hint_desc() -> Style {
        Style::default().fg(Color::Rgb(180, 180, 180))
    }

    pub fn running() -> Style {
        Style::default().fg(colors().running)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors().muted)
    }

    /// Nameservers, zone IDs and other values the user copies out.
    pub fn value() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// 设置步骤的图标和样式
    pub fn step(status: StepStatus) -> (&'static str, Style) {
        match status {
            StepStatus::Pending => ("○", Self::muted()),
            StepStatus::Running => ("◐", Self::running()),
            StepStatus::Done => ("✓", Self::success()),
            StepStatus::Skipped => ("–", Self::muted()),
            StepStatus::Warning => ("!", Self::warning()),
            StepStatus::Failed => ("✗", Self::error()),
        }
    }
}
