//! 被动流监控器
//!
//! 以首次出现的 5 元组分配 flow id，并在发送、接收、丢弃时累计计数。

use super::record::{FlowRecord, FlowSnapshot, FlowStatsSource};
use super::tuple::{FiveTuple, FlowId};
use crate::sim::SimTime;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct FlowMonitor {
    next_id: u32,
    by_tuple: HashMap<FiveTuple, FlowId>,
    flows: BTreeMap<FlowId, FlowRecord>,
    /// 每条流上一个接收包的时延（用于 jitter 累计）
    last_delay: HashMap<FlowId, SimTime>,
}

impl Default for FlowMonitor {
    fn default() -> Self {
        Self {
            next_id: 1,
            by_tuple: HashMap::new(),
            flows: BTreeMap::new(),
            last_delay: HashMap::new(),
        }
    }
}

impl FlowMonitor {
    /// 记录一个发送的包，返回其所属 flow id
    pub fn record_tx(&mut self, tuple: FiveTuple, bytes: u32, now: SimTime) -> FlowId {
        let id = match self.by_tuple.get(&tuple) {
            Some(id) => *id,
            None => {
                let id = FlowId(self.next_id);
                self.next_id += 1;
                self.by_tuple.insert(tuple, id);
                self.flows.insert(id, FlowRecord::new(id, tuple));
                debug!(flow_id = %id, tuple = %tuple, "发现新流");
                id
            }
        };
        if let Some(rec) = self.flows.get_mut(&id) {
            if rec.tx_packets == 0 {
                rec.time_first_tx = now;
            }
            rec.time_last_tx = now;
            rec.tx_packets += 1;
            rec.tx_bytes += u64::from(bytes);
        }
        id
    }

    /// 记录一个到达目的地的包
    pub fn record_rx(&mut self, id: FlowId, bytes: u32, now: SimTime, sent_at: SimTime) {
        let Some(rec) = self.flows.get_mut(&id) else {
            return;
        };
        let delay = now - sent_at;
        if rec.rx_packets == 0 {
            rec.time_first_rx = now;
        }
        if let Some(prev) = self.last_delay.insert(id, delay) {
            rec.jitter_sum = rec.jitter_sum + delay.abs_diff(prev);
        }
        rec.time_last_rx = now;
        rec.rx_packets += 1;
        rec.rx_bytes += u64::from(bytes);
        rec.delay_sum = rec.delay_sum + delay;
        trace!(flow_id = %id, delay = ?delay, "记录接收");
    }

    /// 记录一个被丢弃的包
    pub fn record_lost(&mut self, id: FlowId) {
        if let Some(rec) = self.flows.get_mut(&id) {
            rec.lost_packets += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// 拷贝出当前所有流记录
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            flows: self.flows.values().cloned().collect(),
        }
    }
}

impl FlowStatsSource for FlowMonitor {
    fn flow_stats(&self) -> Vec<&FlowRecord> {
        self.flows.values().collect()
    }

    fn find_flow(&self, id: FlowId) -> Option<FiveTuple> {
        self.flows.get(&id).map(|r| r.tuple)
    }
}
