//! RC 通道帧解析
//!
//! 解析 `MSG_ID_RC_CHANNELS` 消息的固定布局载荷：
//!
//! ```text
//! 偏移  0: time_boot_ms  u32 (LE)
//! 偏移  4: chan1..chan18 u16 (LE) × 18，设备原生微秒单位
//! 偏移 40: chancount     u8
//! 偏移 41: rssi          u8
//! ```
//!
//! `chancount == 0` 表示链路上没有有效的 RC 输入，此时各通道槽位的
//! 内容不具有意义，由上层决定如何表示"无信号"。

use crate::{LinkMessage, MSG_ID_RC_CHANNELS, ProtocolError};

/// RC 通道帧的载荷长度（字节）
pub const RC_CHANNELS_PAYLOAD_LEN: usize = 42;

/// 帧内通道槽位数
pub const RC_CHANNEL_SLOTS: usize = 18;

/// RC 通道反馈帧（原始脉宽）
///
/// 所有通道值为设备原生微秒单位，未做任何归一化。
/// 帧内固定 18 个槽位，`chancount` 报告实际有效的通道数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RcChannelsFrame {
    /// 设备启动后的毫秒时间戳
    pub time_boot_ms: u32,

    /// 原始脉宽（微秒单位）[chan1..chan18]
    pub chan_raw: [u16; RC_CHANNEL_SLOTS],

    /// 有效通道数（0 表示无 RC 输入）
    pub chancount: u8,

    /// 链路质量指示（本 crate 不解释其内容）
    pub rssi: u8,
}

impl RcChannelsFrame {
    /// 编码为线格式载荷（用于宿主回放与测试）
    pub fn encode(&self) -> [u8; RC_CHANNELS_PAYLOAD_LEN] {
        let mut buf = [0u8; RC_CHANNELS_PAYLOAD_LEN];
        buf[0..4].copy_from_slice(&self.time_boot_ms.to_le_bytes());
        for (i, raw) in self.chan_raw.iter().enumerate() {
            let off = 4 + i * 2;
            buf[off..off + 2].copy_from_slice(&raw.to_le_bytes());
        }
        buf[40] = self.chancount;
        buf[41] = self.rssi;
        buf
    }

    /// 编码为 `LinkMessage`（消息 ID 已设置）
    pub fn to_message(&self) -> LinkMessage {
        LinkMessage::new(MSG_ID_RC_CHANNELS, &self.encode())
    }
}

impl TryFrom<&LinkMessage> for RcChannelsFrame {
    type Error = ProtocolError;

    fn try_from(msg: &LinkMessage) -> Result<Self, Self::Error> {
        if msg.message_id != MSG_ID_RC_CHANNELS {
            return Err(ProtocolError::UnexpectedMessageId {
                expected: MSG_ID_RC_CHANNELS,
                actual: msg.message_id,
            });
        }

        let payload = msg.payload();
        if payload.len() != RC_CHANNELS_PAYLOAD_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: RC_CHANNELS_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        let time_boot_ms = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);

        let mut chan_raw = [0u16; RC_CHANNEL_SLOTS];
        for (i, raw) in chan_raw.iter_mut().enumerate() {
            let off = 4 + i * 2;
            *raw = u16::from_le_bytes([payload[off], payload[off + 1]]);
        }

        Ok(Self {
            time_boot_ms,
            chan_raw,
            chancount: payload[40],
            rssi: payload[41],
        })
    }
}
