//! QoS 归约
//!
//! 仿真结束后对最终流快照依次执行：分类 -> 指标计算 -> 按用户聚合。

mod aggregate;
mod classify;
mod metrics;

pub use aggregate::{SubscriberAggregator, SubscriberTotals};
pub use classify::{ClassifiedFlow, FlowCategory, FlowClassifier};
pub use metrics::{MIN_DURATION_S, QosMetrics};

use crate::flow::FlowStatsSource;
use tracing::info;

/// 一条流的分类结果与 QoS 指标
#[derive(Debug, Clone)]
pub struct FlowQos<'a> {
    pub flow: ClassifiedFlow<'a>,
    pub metrics: QosMetrics,
}

/// 一次运行的归约结果
#[derive(Debug, Clone)]
pub struct QosReport<'a> {
    /// 按 flow id 升序
    pub flows: Vec<FlowQos<'a>>,
    pub totals: SubscriberTotals,
}

impl QosReport<'_> {
    /// 所有 VideoDownlink 流的吞吐之和（含未归属的流）
    pub fn video_throughput_mbps(&self) -> f64 {
        self.flows
            .iter()
            .filter(|f| f.flow.category == FlowCategory::VideoDownlink)
            .map(|f| f.metrics.throughput_mbps)
            .sum()
    }
}

/// 对快照执行一次完整归约
pub fn reduce<'a, S>(source: &'a S, classifier: &FlowClassifier) -> QosReport<'a>
where
    S: FlowStatsSource + ?Sized,
{
    let mut agg = SubscriberAggregator::new(classifier.subscriber_count());
    let mut flows = Vec::new();

    for rec in source.flow_stats() {
        let flow = classifier.classify(rec);
        let metrics = QosMetrics::from_record(rec);
        let t = rec.tuple;
        info!(
            flow_id = %rec.flow_id,
            src = %t.src_addr,
            src_port = t.src_port,
            dst = %t.dst_addr,
            dst_port = t.dst_port,
            category = ?flow.category,
            thr_mbps = metrics.throughput_mbps,
            "Flow"
        );
        agg.add(&flow, &metrics);
        flows.push(FlowQos { flow, metrics });
    }

    QosReport {
        flows,
        totals: agg.finish(),
    }
}
