//! Flow rule model and the controller transport seam.

use crate::flow::{FiveTuple, PROTO_UDP};
use serde::Serialize;
use std::fmt;

pub const ETH_TYPE_IPV4: u16 = 0x0800;
/// Priority used for the video rule (above the table-miss entry).
pub const VIDEO_RULE_PRIORITY: u16 = 1000;

/// Match fields. Every flow in this model is IPv4, so `eth_type` only
/// documents the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowMatch {
    pub eth_type: u16,
    pub ip_proto: u8,
    pub udp_dst: u16,
}

impl FlowMatch {
    pub fn matches(&self, tuple: &FiveTuple) -> bool {
        self.eth_type == ETH_TYPE_IPV4
            && tuple.protocol == self.ip_proto
            && tuple.dst_port == self.udp_dst
    }
}

impl fmt::Display for FlowMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eth_type={:#06x},ip_proto={},udp_dst={}",
            self.eth_type, self.ip_proto, self.udp_dst
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Flood to every port except the ingress one.
    OutputAll,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::OutputAll => write!(f, "output=all"),
        }
    }
}

/// A rule to be pushed to one datapath. Lives only for the duration of the
/// submission call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRule {
    pub dp_id: u64,
    pub table: u8,
    pub priority: u16,
    pub flow_match: FlowMatch,
    pub actions: Vec<Action>,
}

impl PolicyRule {
    /// High-priority UDP rule on the reserved video port.
    pub fn video_priority(dp_id: u64, video_port: u16) -> Self {
        Self {
            dp_id,
            table: 0,
            priority: VIDEO_RULE_PRIORITY,
            flow_match: FlowMatch {
                eth_type: ETH_TYPE_IPV4,
                ip_proto: PROTO_UDP,
                udp_dst: video_port,
            },
            actions: vec![Action::OutputAll],
        }
    }

    /// dpctl-style `flow-mod` command for this rule.
    pub fn to_dpctl(&self) -> String {
        let actions = self
            .actions
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "flow-mod cmd=add,table={},prio={} {} apply:{}",
            self.table, self.priority, self.flow_match, actions
        )
    }
}

/// Controller-to-datapath request channel. Returns 0 on success and a
/// non-zero status otherwise.
pub trait ControllerTransport {
    fn submit(&mut self, dp_id: u64, flow_match: &FlowMatch, actions: &[Action], priority: u16)
    -> i32;
}
