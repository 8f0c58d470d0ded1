//! 宿主运行时边界
//!
//! 本核心不拥有传输、分发、超时和回调执行设施，它们由宿主运行时
//! 提供。这里定义核心消费的四个边界：消息路由、外部看门狗、回调
//! 执行器，以及两个不透明令牌。
//!
//! `WorkerExecutor` 是 `CallbackExecutor` 的一个开箱即用实现
//! （channel + 后台工作线程），宿主也可以注入自己的执行设施。

use std::mem::ManuallyDrop;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::error;

use rclink_protocol::LinkMessage;

/// 消息处理入口（由宿主在链路线程上调用）
pub type MessageHandler = Box<dyn Fn(&LinkMessage) + Send + Sync>;

/// 交给执行器的零参闭包
pub type Job = Box<dyn FnOnce() + Send>;

/// 处理器归属令牌
///
/// 标识一次注册的归属组件，供 `unregister_all` 成批注销。
/// 核心不解释其内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerOwner(u64);

impl HandlerOwner {
    /// 分配一个新的归属令牌（进程内唯一）
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// 看门狗超时令牌
///
/// 由外部看门狗在注册时发放，之后每次刷新原样传回。
/// 核心从不检查或解释其内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchdogCookie(pub u64);

/// 宿主消息路由（按消息 ID 分发已解码的线消息）
pub trait MessageRouter {
    /// 为指定消息 ID 注册处理器
    fn register_handler(&self, message_id: u32, handler: MessageHandler, owner: HandlerOwner);

    /// 注销某个归属组件的全部处理器
    fn unregister_all(&self, owner: HandlerOwner);
}

/// 外部数据陈旧性看门狗
///
/// 核心只负责在每帧处理后刷新；"窗口内没有新帧"如何上浮为
/// 数据缺失，由看门狗自己决定。
pub trait StalenessWatchdog: Send + Sync {
    /// 注册一个超时窗口，返回之后刷新用的令牌
    fn register(&self, window: Duration) -> WatchdogCookie;

    /// 通知看门狗有新数据到达
    fn refresh(&self, cookie: WatchdogCookie);
}

/// 回调执行设施（订阅方回调在此异步执行）
pub trait CallbackExecutor: Send + Sync {
    /// 提交一个闭包供异步执行
    ///
    /// 实现不得在提交路径上阻塞调用线程。
    fn execute(&self, job: Job);
}

/// 基于 channel + 工作线程的回调执行器
///
/// 提交端 `send` 到无界队列（不阻塞提交线程），工作线程顺序消费。
/// Drop 时先关闭发送端再 join 工作线程，已入队的任务会被执行完。
pub struct WorkerExecutor {
    /// 需要在 join 工作线程之前显式 drop，否则接收端永远
    /// 收不到 Disconnected，join 会卡住。
    job_tx: ManuallyDrop<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl WorkerExecutor {
    /// 创建执行器并启动工作线程
    pub fn new() -> Self {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();

        let worker = std::thread::spawn(move || {
            // 发送端全部 drop 后循环结束
            for job in job_rx {
                job();
            }
        });

        Self {
            job_tx: ManuallyDrop::new(job_tx),
            worker: Some(worker),
        }
    }
}

impl Default for WorkerExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackExecutor for WorkerExecutor {
    fn execute(&self, job: Job) {
        // 工作线程退出后提交失败，只记录不上浮
        if self.job_tx.send(job).is_err() {
            error!("Callback worker thread has exited, dropping job");
        }
    }
}

impl Drop for WorkerExecutor {
    fn drop(&mut self) {
        unsafe {
            ManuallyDrop::drop(&mut self.job_tx);
        }

        if let Some(handle) = self.worker.take()
            && handle.join().is_err()
        {
            error!("Callback worker thread panicked");
        }
    }
}
