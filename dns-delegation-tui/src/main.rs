//!
//! main.rs
//! dns-delegation 的程序入口
//!
//! 其执行：
//! async fn `main()` {
//!
//!     Cli::parse()                    // 解析命令行
//!     Settings::load().apply()        // 读取 .dns-delegation.yaml，叠加命令行覆盖
//!     CoreServices::from_settings()   // 基于工作目录的 YAML 存储和本地 AWS profile
//!
//!     有子命令：
//!         init_cli_logging()          // 日志写 stderr
//!         commands::run()
//!
//!     无子命令（向导）：
//!         init_wizard_logging()       // 日志写文件，避免破坏界面
//!         TerminalGuard::new()        // raw mode + 备用屏幕
//!         app::run()                  // 运行 app.rs 主循环
//!         guard.restore()             // 无论成功与否，都恢复终端
//!         打印 exit_message           // 例如需要配置凭证后重新运行
//!
//! }

use anyhow::Result;
use clap::Parser;

use dns_delegation_tui::app;
use dns_delegation_tui::backend::CoreServices;
use dns_delegation_tui::cli::Cli;
use dns_delegation_tui::commands;
use dns_delegation_tui::config::Settings;
use dns_delegation_tui::model::App;
use dns_delegation_tui::util::{TerminalGuard, init_cli_logging, init_wizard_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings_path())?.apply(cli.overrides());
    let services = CoreServices::from_settings(&cli.dir, &settings);

    match cli.command {
        Some(command) => {
            init_cli_logging()?;
            commands::run(&services, command).await
        }
        None => run_wizard(services, &settings).await,
    }
}

async fn run_wizard(services: CoreServices, settings: &Settings) -> Result<()> {
    // 1. 初始化日志与终端
    let log_path = init_wizard_logging()?;
    tracing::info!(dir = ?std::env::current_dir().ok(), "Starting setup wizard");
    let mut guard = TerminalGuard::new()?;

    // 2. 创建应用实例
    let mut app = App::new(settings.debug_log_cap);

    // 3. 运行主循环
    let result = app::run(
        guard.terminal(),
        &mut app,
        services,
        settings.poll_interval(),
    )
    .await;

    // 4. 恢复终端（无论成功失败都执行）
    guard.restore()?;

    if let Some(message) = &app.exit_message {
        println!("{message}");
    }
    if result.is_err() {
        eprintln!("Wizard log: {}", log_path.display());
    }

    // 5. 返回结果
    result
}
