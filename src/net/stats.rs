//! 统计信息
//!
//! 整个网络层面的收发计数（与按流的 `FlowRecord` 互补）。

use serde::Serialize;

/// 网络统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub sent_pkts: u64,
    pub delivered_pkts: u64,
    pub delivered_bytes: u64,
    pub dropped_pkts: u64,
    pub dropped_bytes: u64,
    /// 经交换机时命中已安装规则的包数
    pub rule_hits: u64,
}
