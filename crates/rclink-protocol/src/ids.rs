//! 消息 ID 常量定义
//!
//! 链路上的每类消息由宿主运行时按 ID 分发。
//! 本 crate 目前只解析 RC 通道反馈一类消息。

/// RC 通道反馈（原始脉宽，最多 18 通道）
pub const MSG_ID_RC_CHANNELS: u32 = 65;
