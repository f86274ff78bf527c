//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│   ┌─────────┐          ┌───────────┐          ┌──────────┐                 │
//！│   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │                 │
//！│   │   层    │   翻译    │    层     │   消费    │    层    │                 │
//！│   └─────────┘          └───────────┘          └──────────┘                 │
//！└─────────────────────────────────────────────────────────────────────────────┘


//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入事件转换为 AppMessage。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::handle_event;
//!
//!
//!     事件来源：
//!         主循环通过 crossterm 的 EventStream 异步读取终端事件，
//!         与定时器和后台结果在同一个 select! 中等待。
//!
//!
//!     handle_event 的判断顺序：
//!         1. 只处理 Press 事件
//!         2. Ctrl+C 在任何状态下都退出
//!         3. 输入框（域名、账号 ID）获得焦点时，字母都是文本，
//!            Enter 继续，Esc 返回，Backspace 删除
//!         4. 全局快捷键：q 退出，d 切换调试日志，↑/↓ 滚动
//!         5. 调试日志全屏时忽略其他按键
//!         6. 向导按键：Enter / b / s / r / y
//!
//!     Event 层只做翻译，不修改状态；按键在当前状态下是否有意义由 update 层决定。
//!

mod handler;
pub mod keymap;

pub use handler::handle_event;
