//! 链路类型
//!
//! 单向瓶颈链路：序列化时延 + 传播时延 + 出口队列。

use super::packet::Packet;
use crate::queue::{DropTailQueue, PacketQueue, PriorityQueue};
use crate::scenario::SchedulerKind;
use crate::sim::SimTime;

/// 网络链路
#[derive(Debug)]
pub struct Link {
    pub name: &'static str,
    pub latency: SimTime,
    pub bandwidth_bps: u64,
    /// 是否正在序列化一个包
    pub busy: bool,
    pub queue: Box<dyn PacketQueue>,
}

impl Link {
    /// 按调度器类型选择出口队列
    pub fn new(
        name: &'static str,
        latency: SimTime,
        bandwidth_bps: u64,
        scheduler: SchedulerKind,
        queue_bytes: u64,
    ) -> Self {
        let queue: Box<dyn PacketQueue> = match scheduler {
            SchedulerKind::RoundRobin => Box::new(DropTailQueue::new(queue_bytes)),
            SchedulerKind::ProportionalFair => Box::new(PriorityQueue::new(queue_bytes)),
        };
        Self {
            name,
            latency,
            bandwidth_bps,
            busy: false,
            queue,
        }
    }

    /// 入队，返回被丢弃的包
    pub(crate) fn enqueue(&mut self, pkt: Packet) -> Vec<Packet> {
        self.queue.enqueue(pkt)
    }

    /// 计算传输指定字节数所需的时间
    pub(crate) fn tx_time(&self, bytes: u32) -> SimTime {
        // ceil(bytes*8 / bps) 秒 -> 纳秒
        if self.bandwidth_bps == 0 {
            return SimTime(u64::MAX / 4);
        }
        let bits = u128::from(bytes) * 8;
        let bps = u128::from(self.bandwidth_bps);
        let nanos = (bits * 1_000_000_000 + (bps - 1)) / bps;
        SimTime(nanos.min(u128::from(u64::MAX)) as u64)
    }
}
