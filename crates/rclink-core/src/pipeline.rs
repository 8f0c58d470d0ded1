//! 更新流水线模块
//!
//! 入站帧的处理循环体：解码 → 归一化 → 存储 → 分发 → 刷新看门狗。
//! 在宿主的链路线程上运行，路径上除两段极短的互斥外没有任何阻塞。

use tracing::{trace, warn};

use crate::normalize::normalize_frame;
use crate::runtime::{CallbackExecutor, StalenessWatchdog, WatchdogCookie};
use crate::state::RcContext;
use rclink_protocol::{LinkMessage, RcChannelsFrame};

/// 处理一条入站线消息
///
/// 解码失败不是本核心的错误：记录后丢弃，不上浮。
pub(crate) fn process_message(
    ctx: &RcContext,
    executor: &dyn CallbackExecutor,
    watchdog: &dyn StalenessWatchdog,
    cookie: WatchdogCookie,
    msg: &LinkMessage,
) {
    let frame = match RcChannelsFrame::try_from(msg) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to decode RC channels message: {}", e);
            return;
        },
    };

    process_frame(ctx, executor, watchdog, cookie, &frame);
}

/// 处理一帧已解码的 RC 通道
///
/// 每一帧都完整走完 存储 → 分发 → 刷新 三步，顺序固定；
/// `chancount == 0` 的"无信号"帧同样不短路。
pub(crate) fn process_frame(
    ctx: &RcContext,
    executor: &dyn CallbackExecutor,
    watchdog: &dyn StalenessWatchdog,
    cookie: WatchdogCookie,
    frame: &RcChannelsFrame,
) {
    // 1. 归一化（纯函数）
    let snapshot = normalize_frame(frame);

    // 2. 存储：整体原子替换
    ctx.store(snapshot);

    // 3. 分发：从状态单元取副本后投递，快照域的引用已释放
    let delivered = ctx.read();
    ctx.subscription.notify(executor, delivered);

    // 4. 刷新外部看门狗（有无订阅者都执行）
    ctx.monitor.register_frame();
    watchdog.refresh(cookie);

    trace!(
        chancount = frame.chancount,
        status = frame.chancount != 0,
        "RC channels frame committed"
    );
}
