//! 单流 QoS 指标
//!
//! 对退化输入使用下限而非报错：零时长按 `MIN_DURATION_S` 计，零发送按 1 个包计，
//! 零接收时平均 jitter/delay 为 0。

use crate::flow::FlowRecord;
use serde::Serialize;

/// 流时长下限（秒）
pub const MIN_DURATION_S: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QosMetrics {
    /// 首个发送包到最后一个接收包的时长（已取下限）
    pub duration_s: f64,
    pub throughput_mbps: f64,
    pub loss_ratio_pct: f64,
    pub mean_jitter_s: f64,
    pub mean_delay_s: f64,
}

impl QosMetrics {
    pub fn from_record(rec: &FlowRecord) -> Self {
        let span = rec
            .time_last_rx
            .saturating_sub(rec.time_first_tx)
            .as_secs_f64();
        let duration_s = span.max(MIN_DURATION_S);
        let throughput_mbps = (rec.rx_bytes as f64 * 8.0) / (duration_s * 1e6);

        let loss_ratio_pct = rec.lost_packets as f64 / rec.tx_packets.max(1) as f64 * 100.0;

        let (mean_jitter_s, mean_delay_s) = if rec.rx_packets > 0 {
            let n = rec.rx_packets as f64;
            (
                rec.jitter_sum.as_secs_f64() / n,
                rec.delay_sum.as_secs_f64() / n,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            duration_s,
            throughput_mbps,
            loss_ratio_pct,
            mean_jitter_s,
            mean_delay_s,
        }
    }
}
