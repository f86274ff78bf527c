//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│  ┌────────────────────────────── UI 层 ───────────────────────────────┐   │
//！│  │                                                                     │   │
//！│  │   ┌─────────┐          ┌───────────┐          ┌──────────┐         │   │
//！│  │   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │         │   │
//！│  │   │   层    │   翻译    │    层     │   消费    │    层    │         │   │
//！│  │   └─────────┘          │           │          └────┬─────┘         │   │
//！│  │        ▲               │ AppMessage│               │ 返回 Effect   │   │
//！│  │        │               │ Backend.. │               ▼               │   │
//！│  │   ┌─────────┐          └───────────┘          ┌──────────┐         │   │
//！│  │   │  View   │ ◀──────── 读取 ──────────────── │  Model   │         │   │
//！│  │   │   层    │                                 │    层    │         │   │
//！│  │   └────┬────┘                                 └──────────┘         │   │
//！│  │        │                                                            │   │
//！│  └────────│────────────────────────────────────────────────────────────┘   │
//！│           │                         Effect │   ▲ AppMessage::Backend       │
//！│           ▼                                ▼   │                           │
//！│      ┌─────────┐                     ┌─────────────┐                      │
//！│      │  终端   │                     │   Backend   │                      │
//！│      │ (Util)  │                     │  (runtime)  │                      │
//！│      └─────────┘                     └──────┬──────┘                      │
//！│                                             ▼                             │
//！│                                  ┌─────────────────────┐                  │
//！│                                  │ dns-delegation-core │                  │
//！│                                  └─────────────────────┘                  │
//！└─────────────────────────────────────────────────────────────────────────────┘
//!
//!
//! src/backend/mod.rs
//! Backend 层：副作用执行与平台适配
//!
//! Backend 层与 UI 完全解耦。update 层返回的 [`Effect`](crate::message::Effect)
//! 在这里被执行，结果作为 `AppMessage::Backend` 送回主循环。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod services;           // 核心服务入口
//!         mod runtime;            // Effect 执行器与传播轮询
//!         mod config_store;       // dns.yaml 与恢复令牌（YAML 文件）
//!         mod environment_store;  // <env>.yaml 环境文件
//!         mod credentials;        // AWS profile 解析
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、核心服务（CoreServices）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     CoreServices 封装了 dns-delegation-core 的 ServiceContext 和传播检查器，
//!     各个业务服务按需构造：
//!
//!         let services = CoreServices::from_settings(dir, &settings);
//!         services.zones().create_root_zone(profile, domain).await?;
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、Effect 执行器（EffectRuntime）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每个 Effect 在独立的 tokio 任务中执行，不阻塞渲染。
//!     StartPoller / StopPoller 管理唯一的传播轮询任务：
//!     同一时刻至多一个轮询器，离开等待状态或退出时立即取消。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 三、平台存储
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     core 只定义存储 trait，这里提供基于工作目录中 YAML 文件的实现。
//!     环境文件按 serde_yaml::Value 读写，未知键保持原样。
//!

mod config_store;
mod credentials;
mod environment_store;
mod runtime;
mod services;

pub use config_store::{CONFIG_FILE, RESUME_TOKEN_FILE, YamlConfigStore, YamlResumeTokenStore};
pub use credentials::AwsCredentialResolver;
pub use environment_store::YamlEnvironmentStore;
pub use runtime::EffectRuntime;
pub use services::CoreServices;
