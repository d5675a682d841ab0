//! 回程出口队列（Queue disciplines）
//!
//! baseline 使用单一 FIFO 尾丢弃队列；policy-enabled 使用两级严格优先队列，
//! 被规则标记或走 GBR 专用承载的包优先出队。

use crate::net::Packet;

mod drop_tail;
mod priority;

pub use drop_tail::DropTailQueue;
pub use priority::PriorityQueue;

pub const DEFAULT_PKT_BYTES: u64 = 1500;

pub fn mem_from_pkt(pkts: u64) -> u64 {
    pkts.saturating_mul(DEFAULT_PKT_BYTES)
}

/// Packet 队列抽象
pub trait PacketQueue: std::fmt::Debug + Send {
    /// 入队：返回因此被丢弃的包。为空表示没有丢包；被挤出的旧包也在其中
    fn enqueue(&mut self, pkt: Packet) -> Vec<Packet>;
    /// 出队：按队列策略返回下一个 packet
    fn dequeue(&mut self) -> Option<Packet>;

    fn len(&self) -> usize;
    fn bytes(&self) -> u64;
    fn capacity_bytes(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
