//! 应用主状态结构

use super::{TextInput, WizardSession, WizardState};

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前向导状态
    pub state: WizardState,

    /// 向导会话
    pub session: WizardSession,

    /// 当前输入框
    pub input: TextInput,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// Printed to the terminal after the wizard exits.
    pub exit_message: Option<String>,

    /// 全屏调试日志
    pub show_debug: bool,
    /// Scroll offset of the debug log.
    pub scroll: u16,

    /// 动画帧计数
    pub spinner: usize,

    /// The propagation poller is running.
    pub poller_active: bool,

    /// Cap for the session's debug log, kept for restarts.
    pub debug_log_cap: usize,

    /// 会话代数：每次从头重试时加一。
    /// 检查和审计结果带着发起时的代数，旧会话的结果被丢弃。
    pub generation: u64,
}

impl App {
    /// 创建新的应用实例
    pub fn new(debug_log_cap: usize) -> Self {
        Self {
            should_quit: false,
            state: WizardState::CheckExisting,
            session: WizardSession::new(debug_log_cap),
            input: TextInput::default(),
            status_message: None,
            exit_message: None,
            show_debug: false,
            scroll: 0,
            spinner: 0,
            poller_active: false,
            debug_log_cap,
            generation: 0,
        }
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Move to `state`, clearing transient UI state.
    pub fn enter(&mut self, state: WizardState) {
        self.state = state;
        self.status_message = None;
        self.input.error = None;
    }
}
