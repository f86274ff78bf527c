//! DNS Delegation TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息与副作用 (`message/`)
//! - **Update**: 状态更新，纯函数 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 文件存储、凭证解析与副作用执行 (`backend/`)
//!
//! 另外 `commands/` 提供 status / validate / delegate / remove 四个非交互子命令。

pub mod app;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod event;
pub mod message;
pub mod model;
pub mod update;
pub mod util;
pub mod view;
