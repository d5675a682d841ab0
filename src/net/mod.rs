//! 网络模拟模块
//!
//! 为 QoS 归约提供流快照的最小接入网模型：交换机、回程链路、流监控与相关事件。

// 子模块声明
mod channel_ready;
mod deliver_packet;
mod link;
mod link_ready;
mod net_world;
mod network;
mod packet;
mod stats;
mod switch;

// 重新导出公共接口
pub use channel_ready::ChannelEstablished;
pub use deliver_packet::DeliverPacket;
pub use link::Link;
pub use link_ready::LinkReady;
pub use net_world::NetWorld;
pub use network::{Network, NetworkOpts, REMOTE_HOST_ADDR};
pub use packet::Packet;
pub use stats::Stats;
pub use switch::{FlowEntry, OfSwitch, STATUS_NO_DEVICE, STATUS_NOT_CONNECTED};
