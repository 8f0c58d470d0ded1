//! 核心模块状态结构定义

use arc_swap::ArcSwap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::dispatch::SubscriptionSlot;
use crate::monitor::LinkMonitor;
use rclink_protocol::RC_CHANNEL_SLOTS;

/// 归一化后的通道向量（≤ 18 项，内联存储不走堆）
pub type ChannelValues = SmallVec<[f32; RC_CHANNEL_SLOTS]>;

/// 归一化 RC 通道快照
///
/// 更新频率：帧率（取决于链路，典型 ~50Hz）
/// 大小：< 100 字节，Clone 开销低
/// 同步机制：ArcSwap（整体原子替换，读方永远看到完整快照）
///
/// 不变式：`status == true` 时 `channels` 恰好包含本帧归一化产生的
/// 全部条目；`status == false` 表示"无 RC 输入"，此时 `channels`
/// 为空（而不是填零）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcChannelsState {
    /// 归一化通道值，下标 0 对应通道 1
    pub channels: ChannelValues,

    /// 最近一帧是否报告了非零通道数
    pub status: bool,
}

impl RcChannelsState {
    /// 检查快照是否满足状态不变式
    pub fn is_consistent(&self) -> bool {
        if self.status {
            !self.channels.is_empty()
        } else {
            self.channels.is_empty()
        }
    }
}

/// RcLink 上下文（所有共享状态的聚合）
///
/// 两个互斥域相互独立：
/// - `rc_channels`：快照本身（ArcSwap，无锁读取）
/// - `subscription`：订阅槽（Mutex，持锁期间绝不调用订阅方代码）
///
/// 任何路径都不得在持有一个域的同时去获取另一个域。
pub struct RcContext {
    /// 最新归一化快照（整体替换，不做原位修改）
    pub rc_channels: ArcSwap<RcChannelsState>,

    /// 单槽订阅注册表（后注册者覆盖前者）
    pub subscription: SubscriptionSlot,

    /// 链路活性监视（诊断用，与外部看门狗无关）
    pub monitor: LinkMonitor,
}

impl RcContext {
    /// 创建新的上下文
    ///
    /// # Example
    ///
    /// ```
    /// use rclink_core::RcContext;
    ///
    /// let ctx = RcContext::new();
    /// let snapshot = ctx.rc_channels.load();
    /// assert!(!snapshot.status);
    /// assert!(snapshot.channels.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            rc_channels: ArcSwap::from_pointee(RcChannelsState::default()),
            subscription: SubscriptionSlot::new(),
            monitor: LinkMonitor::new(),
        }
    }

    /// 读取当前快照的副本
    ///
    /// 无锁读取（ArcSwap::load），返回完整的快照副本，
    /// 绝不会观察到部分更新的值。
    pub fn read(&self) -> RcChannelsState {
        self.rc_channels.load().as_ref().clone()
    }

    /// 整体替换当前快照
    pub fn store(&self, snapshot: RcChannelsState) {
        self.rc_channels.store(Arc::new(snapshot));
    }
}

impl Default for RcContext {
    fn default() -> Self {
        Self::new()
    }
}
