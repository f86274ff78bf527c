//!
//! src/model/mod.rs
//! Model 层：应用状态
//!
//! 有模块结构：
//!     app.rs          App 主状态（退出标志、当前状态、输入框、调试日志开关……）
//!     wizard.rs       WizardState 向导状态机
//!     session.rs      WizardSession 向导会话数据
//!     steps.rs        根账号设置的五个步骤
//!     input.rs        单行文本输入
//!
//! Model 只被 update 层修改，view 层只读。
//!

mod app;
mod input;
mod session;
pub mod steps;
mod wizard;

pub use app::App;
pub use input::TextInput;
pub use session::WizardSession;
pub use steps::{SetupStep, SetupSteps, StepStatus};
pub use wizard::WizardState;
