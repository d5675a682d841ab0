//! FlowMonitor 风格的 XML 全量导出
//!
//! 三部分：原始计数（FlowStats）、5 元组（Ipv4FlowClassifier）、派生指标（FlowQos），
//! 最后附上每个 UE 的聚合结果。字段都是数字或地址，不需要转义。

use crate::qos::QosReport;
use crate::scenario::Subscriber;
use crate::sim::SimTime;

fn ns(t: SimTime) -> String {
    format!("+{}ns", t.as_nanos())
}

pub fn flowmonitor_xml(report: &QosReport<'_>, subscribers: &[Subscriber]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" ?>\n<FlowMonitor>\n  <FlowStats>\n");
    for f in &report.flows {
        let r = f.flow.record;
        out.push_str(&format!(
            "    <Flow flowId=\"{}\" timeFirstTxPacket=\"{}\" timeFirstRxPacket=\"{}\" \
             timeLastTxPacket=\"{}\" timeLastRxPacket=\"{}\" delaySum=\"{}\" jitterSum=\"{}\" \
             txBytes=\"{}\" txPackets=\"{}\" rxBytes=\"{}\" rxPackets=\"{}\" lostPackets=\"{}\" />\n",
            r.flow_id,
            ns(r.time_first_tx),
            ns(r.time_first_rx),
            ns(r.time_last_tx),
            ns(r.time_last_rx),
            ns(r.delay_sum),
            ns(r.jitter_sum),
            r.tx_bytes,
            r.tx_packets,
            r.rx_bytes,
            r.rx_packets,
            r.lost_packets,
        ));
    }
    out.push_str("  </FlowStats>\n  <Ipv4FlowClassifier>\n");
    for f in &report.flows {
        let r = f.flow.record;
        let t = &r.tuple;
        out.push_str(&format!(
            "    <Flow flowId=\"{}\" sourceAddress=\"{}\" destinationAddress=\"{}\" protocol=\"{}\" \
             sourcePort=\"{}\" destinationPort=\"{}\" />\n",
            r.flow_id, t.src_addr, t.dst_addr, t.protocol, t.src_port, t.dst_port,
        ));
    }
    out.push_str("  </Ipv4FlowClassifier>\n  <FlowQos>\n");
    for f in &report.flows {
        let m = &f.metrics;
        let owner = f
            .flow
            .subscriber
            .map(|i| format!(" subscriber=\"{}\"", i + 1))
            .unwrap_or_default();
        out.push_str(&format!(
            "    <Flow flowId=\"{}\" category=\"{}\"{} durationS=\"{}\" throughputMbps=\"{}\" \
             lossRatioPct=\"{}\" meanJitterS=\"{}\" meanDelayS=\"{}\" />\n",
            f.flow.record.flow_id,
            f.flow.category.as_str(),
            owner,
            m.duration_s,
            m.throughput_mbps,
            m.loss_ratio_pct,
            m.mean_jitter_s,
            m.mean_delay_s,
        ));
    }
    out.push_str("  </FlowQos>\n  <Subscribers>\n");
    for ue in subscribers {
        out.push_str(&format!(
            "    <Subscriber ue=\"{}\" address=\"{}\" vip=\"{}\" videoFlows=\"{}\" throughputMbps=\"{}\" />\n",
            ue.label(),
            ue.addr,
            ue.vip,
            report.totals.video_flows.get(ue.index).copied().unwrap_or(0),
            report.totals.get(ue.index).unwrap_or(0.0),
        ));
    }
    out.push_str("  </Subscribers>\n</FlowMonitor>\n");
    out
}
