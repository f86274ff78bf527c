//! 快捷键配置

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    ///
    /// Letters match in either case; Shift is otherwise ignored.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.modifiers - KeyModifiers::SHIFT != self.modifiers {
            return false;
        }
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }

    /// Label shown in the key hints.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else {
            key
        }
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const TOGGLE_DEBUG: KeyBinding = KeyBinding::key(KeyCode::Char('d'));
    pub const SCROLL_UP: KeyBinding = KeyBinding::key(KeyCode::Up);
    pub const SCROLL_DOWN: KeyBinding = KeyBinding::key(KeyCode::Down);

    // 向导
    pub const ADVANCE: KeyBinding = KeyBinding::key(KeyCode::Enter);
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Char('b'));
    pub const ESCAPE: KeyBinding = KeyBinding::key(KeyCode::Esc);
    pub const SKIP: KeyBinding = KeyBinding::key(KeyCode::Char('s'));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));
    pub const FIX: KeyBinding = KeyBinding::key(KeyCode::Char('y'));
}
