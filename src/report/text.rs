//! 每流一行的文本报表格式

use crate::qos::FlowQos;

/// `Flow <id> (<src> -> <dst>): <thr> Mbps`
pub fn throughput_line(f: &FlowQos<'_>) -> String {
    let rec = f.flow.record;
    format!(
        "Flow {} ({} -> {}): {} Mbps",
        rec.flow_id, rec.tuple.src_addr, rec.tuple.dst_addr, f.metrics.throughput_mbps
    )
}

/// `Flow <id>: <loss> % (<lost>/<tx>)`
pub fn loss_line(f: &FlowQos<'_>) -> String {
    let rec = f.flow.record;
    format!(
        "Flow {}: {} % ({}/{})",
        rec.flow_id, f.metrics.loss_ratio_pct, rec.lost_packets, rec.tx_packets
    )
}

/// `Flow <id>: <jitter> s`
pub fn jitter_line(f: &FlowQos<'_>) -> String {
    format!("Flow {}: {} s", f.flow.record.flow_id, f.metrics.mean_jitter_s)
}

/// `Flow <id> (<src>:<sport> -> <dst>:<dport>): <delay> s`
pub fn delay_line(f: &FlowQos<'_>) -> String {
    let rec = f.flow.record;
    let t = &rec.tuple;
    format!(
        "Flow {} ({}:{} -> {}:{}): {} s",
        rec.flow_id, t.src_addr, t.src_port, t.dst_addr, t.dst_port, f.metrics.mean_delay_s
    )
}

/// `UE <label> throughput total: <thr> Mbps`
pub fn subscriber_line(label: usize, throughput_mbps: f64) -> String {
    format!("UE {label} throughput total: {throughput_mbps} Mbps")
}
