//! 订阅投递示例
//!
//! 展示如何挂接遥测单元、注册订阅者并注入 RC 通道帧。
//!
//! # 使用说明
//!
//! ```bash
//! cargo run --example subscribe_demo
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rclink_core::{
    RcChannelsFrame, RcTelemetry, StalenessWatchdog, WatchdogCookie, WorkerExecutor,
};

/// 只打印刷新事件的看门狗桩
struct LoggingWatchdog;

impl StalenessWatchdog for LoggingWatchdog {
    fn register(&self, window: Duration) -> WatchdogCookie {
        println!("⏱  看门狗注册，窗口 {:?}", window);
        WatchdogCookie(1)
    }

    fn refresh(&self, _cookie: WatchdogCookie) {}
}

fn main() {
    // 初始化日志
    tracing_subscriber::fmt::init();

    println!("════════════════════════════════════════");
    println!("       RC 遥测订阅示例");
    println!("════════════════════════════════════════");
    println!();

    let telemetry = RcTelemetry::new(Arc::new(LoggingWatchdog), Arc::new(WorkerExecutor::new()));

    // 注册订阅者（单槽，后注册者覆盖前者）
    telemetry.subscribe(Arc::new(|state| {
        if state.status {
            println!(
                "📡 收到快照：chan1 = {:.1}，共 {} 个通道",
                state.channels[0],
                state.channels.len()
            );
        } else {
            println!("📡 收到快照：无 RC 输入");
        }
    }));

    // 模拟链路注入若干帧
    for step in 0u16..5 {
        let mut chan_raw = [980u16; 18];
        chan_raw[0] = 980 + step * 260;
        let frame = RcChannelsFrame {
            time_boot_ms: u32::from(step) * 20,
            chan_raw,
            chancount: 8,
            rssi: 230,
        };
        telemetry.handle_message(&frame.to_message());
        thread::sleep(Duration::from_millis(20));
    }

    // 无信号帧同样会投递
    telemetry.handle_message(
        &RcChannelsFrame {
            chancount: 0,
            ..Default::default()
        }
        .to_message(),
    );
    thread::sleep(Duration::from_millis(50));

    let snapshot = telemetry.rc_channels();
    println!();
    println!("最终快照：status = {}", snapshot.status);
    println!("帧龄：{:?}", telemetry.frame_age());
}
