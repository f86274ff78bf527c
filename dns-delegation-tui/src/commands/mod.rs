//!
//! src/commands/mod.rs
//! 非交互子命令
//!
//!     status      打印根区域、实时名称服务器和委派子域表
//!     validate    检查传播情况，记录状态提升，有问题时以非零状态退出
//!     delegate    把子域的名称服务器发布到根区域
//!     remove      撤销子域委派并删除其托管区域
//!
//! 子命令与向导共用 CoreServices，日志写到 stderr，结果写到 stdout。
//!

mod delegate;
mod remove;
mod status;
mod validate;

use anyhow::Result;

use crate::backend::CoreServices;
use crate::cli::Command;

/// 执行子命令
pub async fn run(services: &CoreServices, command: Command) -> Result<()> {
    match command {
        Command::Status => status::run(services).await,
        Command::Validate => validate::run(services).await,
        Command::Delegate {
            subdomain,
            account_id,
            zone_id,
            nameservers,
        } => delegate::run(services, &subdomain, &account_id, &zone_id, &nameservers).await,
        Command::Remove { subdomain } => remove::run(services, &subdomain).await,
    }
}

const NO_CONFIGURATION: &str =
    "No DNS configuration found. Run dns-delegation without a subcommand to set one up.";
