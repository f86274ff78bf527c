//!
//! src/message/mod.rs
//! Message 层：消息定义
//!
//!     AppMessage       主消息，由 event 层（按键）、定时器和后台任务产生
//!     BackendMessage   后台任务完成后送回的结果
//!     Effect           update 层返回的待执行副作用
//!
//! 所有消息都经由同一个通道回到主循环，由 update 层逐条消费。
//!

mod backend;
mod effect;

pub use backend::{BackendMessage, ExistingSetup};
pub use effect::{Checkpoint, Effect};

/// 应用主消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// Enter：继续
    Advance,
    /// 返回上一步
    Back,
    /// 跳过传播等待或权限修复
    Skip,
    /// 重新检查，或在错误状态下从头重试
    Refresh,
    /// 修复缺失的委派权限
    FixPermissions,
    /// 切换全屏调试日志
    ToggleDebug,
    ScrollUp,
    ScrollDown,

    /// 文本输入
    Input(char),
    Backspace,

    /// 动画定时器
    Tick,
    /// 传播重检定时器
    PollTick,

    /// 后台任务结果
    Backend(BackendMessage),

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
