//! # RcLink Protocol
//!
//! 车辆遥测链路的线格式定义（无运行时依赖）
//!
//! ## 模块
//!
//! - `ids`: 消息 ID 常量定义
//! - `rc_channels`: RC 通道帧解析
//! - `command`: 指令层结果码定义
//!
//! ## 字节序
//!
//! 载荷使用 Intel (LSB) 低位在前（小端字节序）。

pub mod command;
pub mod ids;
pub mod rc_channels;

// 重新导出常用类型
pub use command::*;
pub use ids::*;
pub use rc_channels::*;

/// 已解码线消息的统一抽象
///
/// # 设计目的
///
/// `LinkMessage` 是宿主运行时和协议层之间的中间抽象：
/// - **层次解耦**：协议层不依赖底层链路实现（串口/UDP）
/// - **统一接口**：宿主按消息 ID 分发统一的消息类型
/// - **类型安全**：固定布局载荷由各消息类型自行解析
///
/// # 设计特性
///
/// - **Copy trait**：零成本复制，适合高频链路场景
/// - **固定 64 字节载荷**：避免堆分配，覆盖本协议最大消息
/// - **无生命周期**：自包含数据结构，简化 API
/// - **时间戳支持**：`timestamp_us` 字段记录到达时刻
///
/// # 示例
///
/// ```rust
/// use rclink_protocol::LinkMessage;
///
/// let msg = LinkMessage::new(65, &[0u8; 42]);
/// assert_eq!(msg.message_id, 65);
/// assert_eq!(msg.payload().len(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMessage {
    /// 消息类型 ID
    pub message_id: u32,

    /// 载荷数据（固定 64 字节，未使用部分为 0）
    pub payload: [u8; 64],

    /// 有效载荷长度 (0-64)
    pub len: u8,

    /// 到达时间戳（微秒），0 表示不可用
    pub timestamp_us: u64,
}

impl LinkMessage {
    /// 创建新消息
    ///
    /// 载荷超过 64 字节的部分会被截断。
    pub fn new(message_id: u32, payload: &[u8]) -> Self {
        let mut fixed = [0u8; 64];
        let len = payload.len().min(64);
        fixed[..len].copy_from_slice(&payload[..len]);

        Self {
            message_id,
            payload: fixed,
            len: len as u8,
            timestamp_us: 0, // 默认无时间戳
        }
    }

    /// 获取载荷切片（只包含有效数据）
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.len as usize]
    }
}

use thiserror::Error;

/// 协议解析错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid payload length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unexpected message id: expected {expected}, got {actual}")]
    UnexpectedMessageId { expected: u32, actual: u32 },
}
