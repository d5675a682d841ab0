//! 流监控与流记录
//!
//! 被动监控器按 5 元组为每条单向流累计收发计数；QoS 归约只读取最终快照。

mod monitor;
mod record;
mod tuple;

pub use monitor::FlowMonitor;
pub use record::{FlowRecord, FlowSnapshot, FlowStatsSource};
pub use tuple::{FiveTuple, FlowId, PROTO_UDP};
