//! 可复用组件

pub mod debug_log;
pub mod spinner;
pub mod statusbar;
