//! 结果码翻译模块
//!
//! 把指令层的通用结果码（[`CommandOutcome`]）翻译成本组件自己的
//! 结果词汇表（[`RcResult`]）。映射是全函数：七个具名取值一一对应，
//! 其余一律落入 `Unknown` 兜底，翻译本身永不失败。

use rclink_protocol::CommandOutcome;

/// 本组件的结果枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcResult {
    /// 指令成功
    Success,
    /// 目标系统不存在
    NoTarget,
    /// 链路错误
    ConnectionError,
    /// 目标忙
    Busy,
    /// 指令被拒绝
    Denied,
    /// 等待应答超时
    Timeout,
    /// 指令不被支持
    Unsupported,
    /// 未识别的指令层结果码
    Unknown,
}

impl From<CommandOutcome> for RcResult {
    fn from(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Success => RcResult::Success,
            CommandOutcome::NoTarget => RcResult::NoTarget,
            CommandOutcome::ConnectionError => RcResult::ConnectionError,
            CommandOutcome::Busy => RcResult::Busy,
            CommandOutcome::Denied => RcResult::Denied,
            CommandOutcome::Timeout => RcResult::Timeout,
            CommandOutcome::Unsupported => RcResult::Unsupported,
            // 中间态与未来新增取值统一兜底，保证回调契约不被
            // 未映射的码打破
            _ => RcResult::Unknown,
        }
    }
}

/// 翻译结果码并同步调用回调，恰好一次
pub fn invoke_result_callback(outcome: CommandOutcome, callback: impl FnOnce(RcResult)) {
    callback(RcResult::from(outcome));
}
