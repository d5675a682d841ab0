//! 数据包类型

use crate::flow::{FiveTuple, FlowId};
use crate::sim::SimTime;

/// 网络数据包
#[derive(Debug, Clone)]
pub struct Packet {
    pub id: u64,
    /// 监控器在发送时分配的流编号
    pub flow_id: FlowId,
    pub tuple: FiveTuple,
    pub size_bytes: u32,
    /// 源端发送时刻（用于计算单向时延）
    pub sent_at: SimTime,
    /// 命中的已安装规则的优先级
    pub rule_priority: Option<u16>,
    /// 是否承载在 GBR 专用承载上
    pub gbr: bool,
}
