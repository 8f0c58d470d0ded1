//! RC 遥测单元（对外 API）
//!
//! 提供对外的 [`RcTelemetry`] 结构体，封装归一化流水线、状态同步
//! 与订阅分发细节。宿主侧用法：
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rclink_core::{RcTelemetry, StalenessWatchdog, WatchdogCookie, WorkerExecutor};
//!
//! struct NullWatchdog;
//!
//! impl StalenessWatchdog for NullWatchdog {
//!     fn register(&self, _window: Duration) -> WatchdogCookie {
//!         WatchdogCookie(0)
//!     }
//!     fn refresh(&self, _cookie: WatchdogCookie) {}
//! }
//!
//! let telemetry = RcTelemetry::new(Arc::new(NullWatchdog), Arc::new(WorkerExecutor::new()));
//!
//! telemetry.subscribe(Arc::new(|state| {
//!     println!("status={} channels={:?}", state.status, state.channels);
//! }));
//!
//! let snapshot = telemetry.rc_channels();
//! assert!(!snapshot.status);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::RcChannelsCallback;
use crate::pipeline::{process_frame, process_message};
use crate::result::{RcResult, invoke_result_callback};
use crate::runtime::{
    CallbackExecutor, HandlerOwner, MessageRouter, StalenessWatchdog, WatchdogCookie,
};
use crate::state::{RcChannelsState, RcContext};
use rclink_protocol::{CommandOutcome, LinkMessage, MSG_ID_RC_CHANNELS, RcChannelsFrame};

/// RC 遥测单元
///
/// 线程模型：宿主链路线程调用 [`handle_message`](Self::handle_message)，
/// 任意调用方线程并发调用 [`rc_channels`](Self::rc_channels) /
/// [`subscribe`](Self::subscribe)。内部两个互斥域（快照、订阅槽）
/// 相互独立，订阅方代码只在执行器线程上运行。
pub struct RcTelemetry {
    /// 共享状态上下文
    ctx: Arc<RcContext>,
    /// 外部看门狗
    watchdog: Arc<dyn StalenessWatchdog>,
    /// 订阅回调执行设施
    executor: Arc<dyn CallbackExecutor>,
    /// 看门狗在注册时发放的令牌（不透明，原样传回）
    cookie: WatchdogCookie,
    /// 处理器归属令牌（attach/detach 使用）
    owner: HandlerOwner,
}

impl RcTelemetry {
    /// 无新帧判定窗口（向看门狗注册的超时）
    pub const STALENESS_WINDOW: Duration = Duration::from_secs(1);

    /// 创建遥测单元并向看门狗注册超时窗口
    pub fn new(
        watchdog: Arc<dyn StalenessWatchdog>,
        executor: Arc<dyn CallbackExecutor>,
    ) -> Self {
        let cookie = watchdog.register(Self::STALENESS_WINDOW);

        Self {
            ctx: Arc::new(RcContext::new()),
            watchdog,
            executor,
            cookie,
            owner: HandlerOwner::next(),
        }
    }

    /// 向宿主路由注册本单元的帧入口
    pub fn attach(&self, router: &dyn MessageRouter) {
        let ctx = self.ctx.clone();
        let executor = self.executor.clone();
        let watchdog = self.watchdog.clone();
        let cookie = self.cookie;

        router.register_handler(
            MSG_ID_RC_CHANNELS,
            Box::new(move |msg| {
                process_message(&ctx, executor.as_ref(), watchdog.as_ref(), cookie, msg);
            }),
            self.owner,
        );
    }

    /// 从宿主路由注销本单元的全部处理器
    pub fn detach(&self, router: &dyn MessageRouter) {
        router.unregister_all(self.owner);
    }

    /// 帧入口（宿主也可以绕过路由直接调用）
    pub fn handle_message(&self, msg: &LinkMessage) {
        process_message(
            &self.ctx,
            self.executor.as_ref(),
            self.watchdog.as_ref(),
            self.cookie,
            msg,
        );
    }

    /// 处理一帧已解码的 RC 通道（跳过线格式解码）
    pub fn process_frame(&self, frame: &RcChannelsFrame) {
        process_frame(
            &self.ctx,
            self.executor.as_ref(),
            self.watchdog.as_ref(),
            self.cookie,
            frame,
        );
    }

    /// 读取最新归一化快照
    ///
    /// # 性能
    /// - 无锁读取（ArcSwap::load）
    /// - 返回快照副本（Clone 开销低，< 100 字节）
    pub fn rc_channels(&self) -> RcChannelsState {
        self.ctx.read()
    }

    /// 注册订阅者（覆盖任何已有订阅者）
    ///
    /// 之后每个入站帧都会向订阅者异步投递一份快照。
    pub fn subscribe(&self, callback: RcChannelsCallback) {
        self.ctx.subscription.register(callback);
    }

    /// 取消订阅
    ///
    /// 对之后的通知生效；已经交给执行器的投递仍可能送达。
    pub fn unsubscribe(&self) {
        self.ctx.subscription.clear();
    }

    /// 把指令层结果码翻译为本单元的结果枚举
    pub fn translate_result(&self, outcome: CommandOutcome) -> RcResult {
        RcResult::from(outcome)
    }

    /// 翻译结果码并同步调用回调，恰好一次
    pub fn invoke_result_callback(
        &self,
        outcome: CommandOutcome,
        callback: impl FnOnce(RcResult),
    ) {
        invoke_result_callback(outcome, callback);
    }

    /// 自上一帧以来经过的时间（诊断用）
    pub fn frame_age(&self) -> Duration {
        self.ctx.monitor.frame_age()
    }

    /// 窗口内是否收到过帧（诊断用）
    pub fn is_receiving(&self, window: Duration) -> bool {
        self.ctx.monitor.is_receiving(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Job;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct InlineExecutor;

    impl CallbackExecutor for InlineExecutor {
        fn execute(&self, job: Job) {
            job();
        }
    }

    #[derive(Default)]
    struct MockWatchdog {
        registrations: AtomicUsize,
        refreshes: AtomicUsize,
    }

    impl StalenessWatchdog for MockWatchdog {
        fn register(&self, window: Duration) -> WatchdogCookie {
            assert_eq!(window, RcTelemetry::STALENESS_WINDOW);
            self.registrations.fetch_add(1, Ordering::Relaxed);
            WatchdogCookie(7)
        }

        fn refresh(&self, cookie: WatchdogCookie) {
            assert_eq!(cookie, WatchdogCookie(7));
            self.refreshes.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn telemetry_with(watchdog: Arc<MockWatchdog>) -> RcTelemetry {
        RcTelemetry::new(watchdog, Arc::new(InlineExecutor))
    }

    #[test]
    fn test_new_registers_staleness_window() {
        let watchdog = Arc::new(MockWatchdog::default());
        let _telemetry = telemetry_with(watchdog.clone());
        assert_eq!(watchdog.registrations.load(Ordering::Relaxed), 1);
        assert_eq!(watchdog.refreshes.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_initial_snapshot_is_no_signal() {
        let telemetry = telemetry_with(Arc::new(MockWatchdog::default()));
        let snapshot = telemetry.rc_channels();
        assert!(!snapshot.status);
        assert!(snapshot.channels.is_empty());
    }

    #[test]
    fn test_handle_message_updates_snapshot_and_watchdog() {
        let watchdog = Arc::new(MockWatchdog::default());
        let telemetry = telemetry_with(watchdog.clone());

        let frame = RcChannelsFrame {
            time_boot_ms: 10,
            chan_raw: [2020; 18],
            chancount: 18,
            rssi: 200,
        };
        telemetry.handle_message(&frame.to_message());

        let snapshot = telemetry.rc_channels();
        assert!(snapshot.status);
        assert_eq!(snapshot.channels.len(), 18);
        assert!(snapshot.channels.iter().all(|&v| v == 2048.0));
        assert_eq!(watchdog.refreshes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_subscribe_receives_every_update() {
        let telemetry = telemetry_with(Arc::new(MockWatchdog::default()));
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_cb = seen.clone();
        telemetry.subscribe(Arc::new(move |_| {
            seen_cb.fetch_add(1, Ordering::Relaxed);
        }));

        let frame = RcChannelsFrame {
            chancount: 8,
            ..Default::default()
        };
        telemetry.process_frame(&frame);
        telemetry.process_frame(&frame);
        assert_eq!(seen.load(Ordering::Relaxed), 2);

        telemetry.unsubscribe();
        telemetry.process_frame(&frame);
        assert_eq!(seen.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_translate_result_delegates() {
        let telemetry = telemetry_with(Arc::new(MockWatchdog::default()));
        assert_eq!(
            telemetry.translate_result(CommandOutcome::Success),
            RcResult::Success
        );
        assert_eq!(
            telemetry.translate_result(CommandOutcome::InProgress),
            RcResult::Unknown
        );
    }

    #[test]
    fn test_invoke_result_callback_exactly_once() {
        let telemetry = telemetry_with(Arc::new(MockWatchdog::default()));
        let calls = AtomicUsize::new(0);
        telemetry.invoke_result_callback(CommandOutcome::Timeout, |result| {
            assert_eq!(result, RcResult::Timeout);
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_frame_age_resets_on_frame() {
        let telemetry = telemetry_with(Arc::new(MockWatchdog::default()));
        std::thread::sleep(Duration::from_millis(20));

        telemetry.process_frame(&RcChannelsFrame {
            chancount: 1,
            ..Default::default()
        });
        assert!(telemetry.frame_age() < Duration::from_millis(15));
        assert!(telemetry.is_receiving(Duration::from_secs(1)));
    }
}
