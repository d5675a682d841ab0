//! 流记录与快照

use super::tuple::{FiveTuple, FlowId};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 一条流的原始累计计数（由监控器拥有，QoS 归约只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub flow_id: FlowId,
    pub tuple: FiveTuple,
    #[serde(default)]
    pub tx_packets: u64,
    #[serde(default)]
    pub tx_bytes: u64,
    #[serde(default)]
    pub rx_packets: u64,
    #[serde(default)]
    pub rx_bytes: u64,
    #[serde(default)]
    pub time_first_tx: SimTime,
    #[serde(default)]
    pub time_last_tx: SimTime,
    #[serde(default)]
    pub time_first_rx: SimTime,
    #[serde(default)]
    pub time_last_rx: SimTime,
    /// 所有已接收包的单向时延之和
    #[serde(default)]
    pub delay_sum: SimTime,
    /// 相邻接收包时延差绝对值之和
    #[serde(default)]
    pub jitter_sum: SimTime,
    #[serde(default)]
    pub lost_packets: u64,
}

impl FlowRecord {
    /// 新建一条全零计数的流记录
    pub fn new(flow_id: FlowId, tuple: FiveTuple) -> Self {
        Self {
            flow_id,
            tuple,
            tx_packets: 0,
            tx_bytes: 0,
            rx_packets: 0,
            rx_bytes: 0,
            time_first_tx: SimTime::ZERO,
            time_last_tx: SimTime::ZERO,
            time_first_rx: SimTime::ZERO,
            time_last_rx: SimTime::ZERO,
            delay_sum: SimTime::ZERO,
            jitter_sum: SimTime::ZERO,
            lost_packets: 0,
        }
    }
}

/// 监控器对外暴露的查询接口：最终快照 + flow id 到 5 元组的反查。
pub trait FlowStatsSource {
    /// 按 flow id 升序返回所有流记录
    fn flow_stats(&self) -> Vec<&FlowRecord>;

    /// 反查 flow id 对应的 5 元组
    fn find_flow(&self, id: FlowId) -> Option<FiveTuple>;
}

/// 可序列化的流快照（`--dump-flows` 输出 / `--flows` 输入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub flows: Vec<FlowRecord>,
}

impl FlowStatsSource for FlowSnapshot {
    fn flow_stats(&self) -> Vec<&FlowRecord> {
        let mut out: Vec<&FlowRecord> = self.flows.iter().collect();
        out.sort_by_key(|r| r.flow_id);
        out
    }

    fn find_flow(&self, id: FlowId) -> Option<FiveTuple> {
        self.flows.iter().find(|r| r.flow_id == id).map(|r| r.tuple)
    }
}
