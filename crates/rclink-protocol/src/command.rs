//! 指令层结果码定义
//!
//! 指令发送本身不在本工程范围内，这里只定义指令层在线上使用的
//! 通用结果码（ACK 字节）。上层负责把它翻译成自己的结果词汇表。

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// 指令层通用结果码（封闭枚举）
///
/// 与线上的 ACK 字节一一对应。注意本枚举包含的取值多于上层
/// 关心的集合：`InProgress`/`Cancelled` 等中间态由上层的
/// 兜底分支处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandOutcome {
    /// 指令已接受并执行
    Success = 0,
    /// 目标系统不存在或未发现
    NoTarget = 1,
    /// 链路错误（发送失败）
    ConnectionError = 2,
    /// 目标忙，暂时无法受理
    Busy = 3,
    /// 指令被拒绝
    Denied = 4,
    /// 等待应答超时
    Timeout = 5,
    /// 目标不支持该指令
    Unsupported = 6,
    /// 指令执行中（中间态）
    InProgress = 7,
    /// 指令已被取消
    Cancelled = 8,
}
