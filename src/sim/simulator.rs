//! 仿真器
//!
//! 维护当前时间与按 (时刻, seq) 排序的事件队列。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{info, trace};

/// 事件驱动仿真器。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已执行的事件数
    pub fn executed_events(&self) -> u64 {
        self.executed
    }

    /// 队列中尚未执行的事件数
    pub fn pending_events(&self) -> usize {
        self.q.len()
    }

    /// 调度事件在绝对时刻 `at` 执行
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(now = ?self.now, seq, "调度事件");

        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });
    }

    /// 调度事件在当前时刻之后 `delay` 执行
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        let at = self.now + delay;
        self.schedule(at, ev);
    }

    /// 运行直到事件队列为空或到达 `until`（含 `until` 时刻的事件）。
    #[tracing::instrument(skip(self, world))]
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        info!(until = ?until, queued = self.pending_events(), "▶️  开始运行仿真");
        while self.q.peek().is_some_and(|top| top.at <= until) {
            let Some(item) = self.q.pop() else {
                break;
            };
            self.step(item, world);
        }
        self.now = self.now.max(until);
        info!(
            total_events = self.executed,
            final_time = ?self.now,
            remaining = self.pending_events(),
            "✅ 仿真停止"
        );
    }

    fn step(&mut self, item: ScheduledEvent, world: &mut dyn World) {
        self.now = item.at;
        self.executed += 1;
        trace!(now = ?self.now, seq = item.seq, "执行事件");
        item.ev.execute(self, world);
    }
}
