//! RC 遥测归一化与分发单元
//!
//! 本模块接收车辆链路送来的 RC 通道消息，完成：
//! - 脉宽 → SBUS 输出域的纯仿射归一化
//! - 最新快照的无锁共享（整体原子替换，读方永不见撕裂值）
//! - 至多一个订阅者的异步投递（单槽，后注册者覆盖）
//! - 每帧处理后刷新外部陈旧性看门狗
//! - 指令层结果码到本单元结果词汇表的全函数翻译
//!
//! 传输 I/O、消息分发、超时判定与指令发送都属于宿主运行时，
//! 本 crate 只在 [`runtime`] 模块定义其边界。

pub mod dispatch;
pub mod monitor;
pub mod normalize;
mod pipeline;
pub mod result;
pub mod runtime;
pub mod state;
mod telemetry;

pub use dispatch::{RcChannelsCallback, SubscriptionSlot};
pub use monitor::LinkMonitor;
pub use normalize::{
    RC_PULSE_MAX, RC_PULSE_MIN, SBUS_MAX, SBUS_MIN, normalize_frame, normalize_pulse,
};
pub use result::{RcResult, invoke_result_callback};
pub use runtime::{
    CallbackExecutor, HandlerOwner, Job, MessageHandler, MessageRouter, StalenessWatchdog,
    WatchdogCookie, WorkerExecutor,
};
pub use state::{ChannelValues, RcChannelsState, RcContext};
pub use telemetry::RcTelemetry;

// 方便下游只依赖 core
pub use rclink_protocol::{
    CommandOutcome, LinkMessage, MSG_ID_RC_CHANNELS, ProtocolError, RC_CHANNEL_SLOTS,
    RcChannelsFrame,
};
