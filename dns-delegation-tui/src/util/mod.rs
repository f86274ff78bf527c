//！┌──────────────────────────────────────────────────────────────────────┐
//！│                         主循环 (app.rs)                               │
//！│                                                                      │
//！│   按键 ──▶ Event 层 ──▶ AppMessage ──▶ update() ──▶ Vec<Effect>       │
//！│                             ▲              │             │           │
//！│                             │              ▼             ▼           │
//！│   Tick / PollTick ──────────┤          Model 层    EffectRuntime     │
//！│                             │              │        (tokio 任务)      │
//！│   BackendMessage ◀──────────┴──── mpsc ◀───┼─────────────┘           │
//！│                                            ▼                         │
//！│                                         View 层 ──▶ 屏幕              │
//！│                                                                      │
//！│   Util 层：终端守卫、日志订阅器，只被 main.rs 使用                        │
//！└──────────────────────────────────────────────────────────────────────┘

//!
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! Util 层提供与业务逻辑无关的基础设施代码：
//!
//!     src/util/mod.rs
//!         mod terminal;       // 终端初始化和恢复
//!         mod logging;        // tracing 订阅器
//!
//!
//!     终端：
//!         TerminalGuard 在创建时启用原始模式并进入备用屏幕，
//!         在 Drop 时恢复终端。即使主循环返回错误，终端也会先恢复，
//!         错误信息随后才打印到主屏幕上。
//!
//!             let mut guard = TerminalGuard::new()?;
//!             let result = app::run(guard.terminal(), ...).await;
//!             guard.restore()?;
//!
//!     日志：
//!         向导模式下日志写入缓存目录中的文件，子命令模式下写入 stderr。
//!         两种模式都通过 RUST_LOG 控制级别，默认 info。
//!
//!
//!     主循环见 src/app.rs
//!

mod logging;
mod terminal;

pub use logging::{init_cli_logging, init_wizard_logging, wizard_log_path};
pub use terminal::{Term, TerminalGuard, init_terminal, restore_terminal};
