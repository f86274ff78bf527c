//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，创建终端并初始化为以下状态：
//!
//! App {
//!
//!     should_quit: bool = false,                      // 决定应用是否应该退出
//!     state: WizardState::CheckExisting,              // 向导从检查现有配置开始
//!     session: WizardSession { .. },                  // 向导收集到的数据，初始为空
//!     input: TextInput::default(),                    // 当前输入框
//!     show_debug: false,                              // 是否全屏显示调试日志
//!
//! }
//!
//!
//! 主循环在三个来源上等待（tokio::select!）：
//! loop {
//!
//!     terminal.draw(|f| view::render(&app , f))       // 渲染 UI
//!     if app.should_quit { break }                    // 检查 APP 是否应该退出
//!     select! {
//!         ticker.tick()      => AppMessage::Tick      // 每 100ms 一次，驱动 spinner
//!         rx.recv()          => 后台任务结果 / PollTick
//!         events.next()     => handle_event(..)      // 终端按键
//!     }
//!     let effects = update::update(&mut app , msg)    // 更新状态，得到副作用
//!     runtime.dispatch_all(effects)                   // 交给 backend 执行
//! }
//!
//! update 从不阻塞：所有 I/O 都在 runtime 派生的任务里进行，
//! 结果通过同一个通道送回。

use std::time::Duration;

use anyhow::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::backend::{CoreServices, EffectRuntime};
use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const TICK_RATE: Duration = Duration::from_millis(100);

/// 运行应用主循环
pub async fn run(
    terminal: &mut Term,
    app: &mut App,
    services: CoreServices,
    poll_interval: Duration,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runtime = EffectRuntime::new(services, tx, poll_interval);
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    runtime.dispatch_all(update::init(app));

    loop {
        // 1. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 等待下一条消息
        let msg = tokio::select! {
            _ = ticker.tick() => AppMessage::Tick,
            Some(msg) = rx.recv() => msg,
            event = events.next() => match event {
                Some(Ok(event)) => event::handle_event(&event, app),
                Some(Err(e)) => return Err(e.into()),
                None => AppMessage::Quit,
            },
        };

        // 4. 更新状态并执行副作用
        let effects = update::update(app, msg);
        runtime.dispatch_all(effects);
    }

    runtime.shutdown();
    Ok(())
}
