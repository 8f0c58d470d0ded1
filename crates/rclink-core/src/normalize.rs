//! 通道归一化模块
//!
//! 把设备原生的脉宽单位（微秒）仿射映射到协议中立的 SBUS 输出域。
//!
//! # 设计说明
//!
//! 映射是纯仿射变换，**不做钳位**：输入落在 `[980, 2020]` 之外时，
//! 输出也线性落在 `[0, 2048]` 之外。下游如需钳位由下游自行处理。
//!
//! ```text
//!                     1
//!     ratio = ----------------------- * (SBUS_MAX - SBUS_MIN)
//!             (PULSE_MAX - PULSE_MIN)
//! ```

use crate::state::{ChannelValues, RcChannelsState};
use rclink_protocol::RcChannelsFrame;

/// 输入域下界：最短脉宽（微秒）
pub const RC_PULSE_MIN: f32 = 980.0;

/// 输入域上界：最长脉宽（微秒）
pub const RC_PULSE_MAX: f32 = 2020.0;

/// 输出域下界（SBUS 单位）
pub const SBUS_MIN: f32 = 0.0;

/// 输出域上界（SBUS 单位）
pub const SBUS_MAX: f32 = 2048.0;

/// 仿射映射斜率
const MAP_RATIO: f32 = (SBUS_MAX - SBUS_MIN) / (RC_PULSE_MAX - RC_PULSE_MIN);

/// 归一化单个原始脉宽值
///
/// 纯函数，无钳位。`980 → 0.0`，`2020 → 2048.0`。
#[inline]
pub fn normalize_pulse(raw: u16) -> f32 {
    SBUS_MIN + (f32::from(raw) - RC_PULSE_MIN) * MAP_RATIO
}

/// 归一化一帧 RC 通道
///
/// - `chancount == 0`：产生 `status = false`、空通道向量，表示
///   "无 RC 输入"（区别于"有输入且居于最小值"）。
/// - `chancount != 0`：无条件归一化帧内全部 18 个槽位并置
///   `status = true`。超出实际通道数的槽位原样透传，不按
///   `chancount` 截断。
///
/// 纯函数：同一输入帧多次调用产生逐位相同的输出。
pub fn normalize_frame(frame: &RcChannelsFrame) -> RcChannelsState {
    if frame.chancount == 0 {
        return RcChannelsState {
            channels: ChannelValues::new(),
            status: false,
        };
    }

    let channels: ChannelValues = frame.chan_raw.iter().map(|&raw| normalize_pulse(raw)).collect();

    RcChannelsState {
        channels,
        status: true,
    }
}
