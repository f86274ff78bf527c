//! 事件处理器

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::AppMessage;
use crate::model::App;

/// 处理事件，返回对应的消息
pub fn handle_event(event: &Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app), // 键盘事件
        _ => AppMessage::Noop,                                     // 窗口大小改变时主循环自动重绘
    }
}

/// 处理键盘事件
fn handle_key_event(key: &KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // 全局快捷键
    if DefaultKeymap::FORCE_QUIT.matches(key) {
        return AppMessage::Quit;
    }

    // 输入框获得焦点时，字母都是文本
    if app.state.accepts_text() && !app.show_debug {
        return handle_input_keys(key);
    }

    if DefaultKeymap::QUIT.matches(key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::TOGGLE_DEBUG.matches(key) {
        return AppMessage::ToggleDebug;
    }
    if DefaultKeymap::SCROLL_UP.matches(key) {
        return AppMessage::ScrollUp;
    }
    if DefaultKeymap::SCROLL_DOWN.matches(key) {
        return AppMessage::ScrollDown;
    }

    // 调试日志全屏时只响应上面的按键，Esc 关闭
    if app.show_debug {
        return if DefaultKeymap::ESCAPE.matches(key) {
            AppMessage::ToggleDebug
        } else {
            AppMessage::Noop
        };
    }

    handle_wizard_keys(key)
}

/// 输入框中的按键
fn handle_input_keys(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter => AppMessage::Advance,
        KeyCode::Esc => AppMessage::Back,
        KeyCode::Backspace => AppMessage::Backspace,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            AppMessage::Input(c)
        }
        _ => AppMessage::Noop,
    }
}

/// 向导步骤中的按键
fn handle_wizard_keys(key: &KeyEvent) -> AppMessage {
    if DefaultKeymap::ADVANCE.matches(key) {
        AppMessage::Advance
    } else if DefaultKeymap::BACK.matches(key) || DefaultKeymap::ESCAPE.matches(key) {
        AppMessage::Back
    } else if DefaultKeymap::SKIP.matches(key) {
        AppMessage::Skip
    } else if DefaultKeymap::REFRESH.matches(key) {
        AppMessage::Refresh
    } else if DefaultKeymap::FIX.matches(key) {
        AppMessage::FixPermissions
    } else {
        AppMessage::Noop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WizardState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn letters_are_text_in_inputs() {
        let mut app = App::new(10);
        app.state = WizardState::InputDomain;
        assert!(matches!(
            handle_event(&press(KeyCode::Char('q')), &app),
            AppMessage::Input('q')
        ));
        assert!(matches!(
            handle_event(&press(KeyCode::Esc), &app),
            AppMessage::Back
        ));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(handle_event(&ctrl_c, &app), AppMessage::Quit));
    }

    #[test]
    fn wizard_bindings() {
        let mut app = App::new(10);
        app.state = WizardState::DisplayNameservers;
        let cases = [
            ('q', "Quit"),
            ('s', "Skip"),
            ('r', "Refresh"),
            ('y', "FixPermissions"),
            ('b', "Back"),
            ('d', "ToggleDebug"),
        ];
        for (c, expected) in cases {
            let msg = handle_event(&press(KeyCode::Char(c)), &app);
            assert_eq!(format!("{msg:?}"), expected, "key {c}");
        }
        assert!(matches!(
            handle_event(&press(KeyCode::Enter), &app),
            AppMessage::Advance
        ));
    }

    #[test]
    fn debug_view_swallows_wizard_keys() {
        let mut app = App::new(10);
        app.state = WizardState::DisplayNameservers;
        app.show_debug = true;
        assert!(matches!(
            handle_event(&press(KeyCode::Char('s')), &app),
            AppMessage::Noop
        ));
        assert!(matches!(
            handle_event(&press(KeyCode::Down), &app),
            AppMessage::ScrollDown
        ));
        assert!(matches!(
            handle_event(&press(KeyCode::Esc), &app),
            AppMessage::ToggleDebug
        ));
    }

    #[test]
    fn release_events_are_ignored() {
        let app = App::new(10);
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(matches!(
            handle_event(&Event::Key(key), &app),
            AppMessage::Noop
        ));
    }
}
