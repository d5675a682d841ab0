//! 流身份分类
//!
//! 源端口落在 `[video_port_base, video_port_base + N)` 的流是视频下行（服务端 -> 客户端），
//! 其所属用户由目的地址精确匹配得到。

use crate::config::RunConfig;
use crate::flow::FlowRecord;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowCategory {
    Background,
    VideoDownlink,
    Other,
}

impl FlowCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowCategory::Background => "background",
            FlowCategory::VideoDownlink => "video_downlink",
            FlowCategory::Other => "other",
        }
    }
}

/// 流记录 + 分类结果（只在报表阶段存在）
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedFlow<'a> {
    pub record: &'a FlowRecord,
    pub category: FlowCategory,
    /// 视频流所属的用户序号；未能归属时为 None
    pub subscriber: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct FlowClassifier {
    video_port_base: u16,
    background_port: u16,
    /// 与用户序号对齐的地址表
    subscriber_addrs: Vec<Ipv4Addr>,
}

impl FlowClassifier {
    pub fn new(video_port_base: u16, background_port: u16, subscriber_addrs: Vec<Ipv4Addr>) -> Self {
        Self {
            video_port_base,
            background_port,
            subscriber_addrs,
        }
    }

    pub fn from_config(cfg: &RunConfig) -> Self {
        let addrs = cfg.subscribers().into_iter().map(|s| s.addr).collect();
        Self::new(cfg.video_port_base, cfg.background_port, addrs)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_addrs.len()
    }

    /// 源端口是否落在保留的视频端口区间
    pub fn is_video_port(&self, port: u16) -> bool {
        let base = u32::from(self.video_port_base);
        let port = u32::from(port);
        port >= base && port < base + self.subscriber_addrs.len() as u32
    }

    pub fn subscriber_of(&self, addr: Ipv4Addr) -> Option<usize> {
        self.subscriber_addrs.iter().position(|a| *a == addr)
    }

    pub fn classify<'a>(&self, record: &'a FlowRecord) -> ClassifiedFlow<'a> {
        let t = &record.tuple;
        if self.is_video_port(t.src_port) {
            let subscriber = self.subscriber_of(t.dst_addr);
            if subscriber.is_none() {
                warn!(
                    flow_id = %record.flow_id,
                    dst = %t.dst_addr,
                    "视频流目的地址不属于任何 UE，不计入用户聚合"
                );
            }
            return ClassifiedFlow {
                record,
                category: FlowCategory::VideoDownlink,
                subscriber,
            };
        }

        let category = if t.dst_port == self.background_port {
            FlowCategory::Background
        } else {
            FlowCategory::Other
        };
        ClassifiedFlow {
            record,
            category,
            subscriber: None,
        }
    }
}
