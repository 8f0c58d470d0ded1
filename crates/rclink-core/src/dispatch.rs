//! 订阅分发模块
//!
//! 单槽订阅注册表：最多一个活跃订阅者，后注册者静默覆盖前者
//! （邮箱模式，Last Write Wins）。没有多订阅者扇出，"取消订阅"
//! 就是清空槽位。
//!
//! # 锁纪律
//!
//! 槽位锁与快照（`RcContext::rc_channels`）是两个独立的互斥域。
//! `notify` 在锁内只做一次 `Arc` 克隆，随即释放锁，再把闭包交给
//! 执行器——订阅方代码永远不在任何锁内运行，订阅方重入本组件
//! 也不会死锁。

use std::sync::{Arc, Mutex};

use tracing::{error, trace};

use crate::runtime::CallbackExecutor;
use crate::state::RcChannelsState;

/// 订阅回调类型
///
/// `Arc` 包装使得回调可以在锁外被克隆并跨线程投递。
pub type RcChannelsCallback = Arc<dyn Fn(RcChannelsState) + Send + Sync>;

/// 单槽订阅注册表
#[derive(Default)]
pub struct SubscriptionSlot {
    slot: Mutex<Option<RcChannelsCallback>>,
}

impl SubscriptionSlot {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// 注册订阅者（覆盖任何已有订阅者）
    pub fn register(&self, callback: RcChannelsCallback) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(callback),
            Err(_) => error!("Subscription slot lock poisoned, registration dropped"),
        }
    }

    /// 清空槽位（等价于注册一个空回调）
    ///
    /// 对之后的所有通知生效；已经交给执行器的投递不会回滚。
    pub fn clear(&self) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = None,
            Err(_) => error!("Subscription slot lock poisoned, clear dropped"),
        }
    }

    /// 是否有活跃订阅者
    pub fn is_registered(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// 向订阅者投递一份快照
    ///
    /// 有订阅者时恰好投递一次，经由执行器异步执行；无订阅者时
    /// 静默返回。持锁时间仅为一次 `Arc` 克隆。
    pub fn notify(&self, executor: &dyn CallbackExecutor, snapshot: RcChannelsState) {
        let callback = match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => {
                error!("Subscription slot lock poisoned, notification dropped");
                return;
            },
        };
        // 锁已释放，订阅方代码在执行器线程上运行

        if let Some(callback) = callback {
            executor.execute(Box::new(move || callback(snapshot)));
        } else {
            trace!("No RC channels subscriber registered, skipping notify");
        }
    }
}
