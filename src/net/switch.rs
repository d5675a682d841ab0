//! OpenFlow 交换机（转发单元）
//!
//! 控制通道建立前拒绝规则提交；已安装规则按优先级匹配，为命中的包打上优先级标记。

use super::packet::Packet;
use crate::policy::{Action, ControllerTransport, FlowMatch};
use tracing::{debug, info, warn};

/// 控制通道尚未建立
pub const STATUS_NOT_CONNECTED: i32 = -107;
/// 未知的 datapath id
pub const STATUS_NO_DEVICE: i32 = -19;

/// 流表中的一条规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEntry {
    pub priority: u16,
    pub flow_match: FlowMatch,
    pub actions: Vec<Action>,
}

#[derive(Debug)]
pub struct OfSwitch {
    dp_id: u64,
    channel_up: bool,
    /// 按优先级降序
    flow_table: Vec<FlowEntry>,
    submissions: u64,
}

impl OfSwitch {
    pub fn new(dp_id: u64) -> Self {
        Self {
            dp_id,
            channel_up: false,
            flow_table: Vec::new(),
            submissions: 0,
        }
    }

    /// 控制器与交换机之间的 OpenFlow 通道建立
    pub fn on_channel_established(&mut self) {
        info!(dp_id = self.dp_id, "🔗 OpenFlow 控制通道已建立");
        self.channel_up = true;
    }

    pub fn flow_table(&self) -> &[FlowEntry] {
        &self.flow_table
    }

    /// 收到的提交请求总数（含失败的）
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// 按流表处理经过的包；返回是否命中规则
    pub(crate) fn apply(&self, pkt: &mut Packet) -> bool {
        match self
            .flow_table
            .iter()
            .find(|e| e.flow_match.matches(&pkt.tuple))
        {
            Some(entry) => {
                pkt.rule_priority = Some(entry.priority);
                true
            }
            None => false,
        }
    }
}

impl ControllerTransport for OfSwitch {
    fn submit(
        &mut self,
        dp_id: u64,
        flow_match: &FlowMatch,
        actions: &[Action],
        priority: u16,
    ) -> i32 {
        self.submissions += 1;
        if dp_id != self.dp_id {
            warn!(dp_id, local = self.dp_id, "unknown datapath");
            return STATUS_NO_DEVICE;
        }
        if !self.channel_up {
            warn!(dp_id, "flow-mod before the control channel is up");
            return STATUS_NOT_CONNECTED;
        }
        let entry = FlowEntry {
            priority,
            flow_match: *flow_match,
            actions: actions.to_vec(),
        };
        let pos = self
            .flow_table
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(self.flow_table.len());
        self.flow_table.insert(pos, entry);
        debug!(dp_id, priority, entries = self.flow_table.len(), "flow-mod accepted");
        0
    }
}
