//! 按用户聚合视频吞吐
//!
//! 每次运行各自构建聚合器，`finish` 消耗自身，保证只结算一次。
//! 加法与流的处理顺序无关。

use super::classify::{ClassifiedFlow, FlowCategory};
use super::metrics::QosMetrics;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SubscriberAggregator {
    totals: Vec<f64>,
    video_flows: Vec<usize>,
}

impl SubscriberAggregator {
    pub fn new(subscriber_count: usize) -> Self {
        Self {
            totals: vec![0.0; subscriber_count],
            video_flows: vec![0; subscriber_count],
        }
    }

    /// 累加一条流；返回是否计入了某个用户
    pub fn add(&mut self, flow: &ClassifiedFlow<'_>, metrics: &QosMetrics) -> bool {
        if flow.category != FlowCategory::VideoDownlink {
            return false;
        }
        let Some(idx) = flow.subscriber else {
            return false;
        };
        match self.totals.get_mut(idx) {
            Some(total) => {
                *total += metrics.throughput_mbps;
                self.video_flows[idx] += 1;
                true
            }
            None => false,
        }
    }

    pub fn finish(self) -> SubscriberTotals {
        SubscriberTotals {
            throughput_mbps: self.totals,
            video_flows: self.video_flows,
        }
    }
}

/// 结算后的每用户视频吞吐（Mbps），下标即用户序号
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriberTotals {
    pub throughput_mbps: Vec<f64>,
    pub video_flows: Vec<usize>,
}

impl SubscriberTotals {
    pub fn len(&self) -> usize {
        self.throughput_mbps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throughput_mbps.is_empty()
    }

    pub fn get(&self, subscriber: usize) -> Option<f64> {
        self.throughput_mbps.get(subscriber).copied()
    }

    pub fn sum(&self) -> f64 {
        self.throughput_mbps.iter().sum()
    }
}
